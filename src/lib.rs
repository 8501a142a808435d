pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod logger;
pub mod processing;
pub mod tasks;

pub use batch::{run, RunSummary};
pub use error::{CompressionError, Result};
pub use processing::{
    constrain_to_bounds, decide, encode_optimized_png, process_image, shrink_step, Action, Budget,
    Outcome,
};
pub use tasks::{collect_batch, collect_single, ImageTask};
