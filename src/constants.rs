/// Directory the source logos are read from.
pub const SOURCE_DIR: &str = "public/assets/logos";

/// Directory the compressed outputs are written to. Created on startup if absent.
pub const TARGET_DIR: &str = "public/assets/compressedLogos";

/// Maximum size of a published output file.
pub const MAX_OUTPUT_BYTES: u64 = 80 * 1024;

/// Oversized images are first constrained to fit within this square bound.
pub const MAX_INITIAL_DIMENSION: u32 = 1024;

/// Shrinking stops once either dimension reaches this floor.
pub const MIN_DIMENSION: u32 = 50;

/// Per-iteration dimension multiplier for the downscale loop.
pub const SHRINK_FACTOR: f64 = 0.9;

/// Extensions picked up in batch mode, matched in this order.
pub const BATCH_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

pub const OXIPNG_PRESET: u8 = 4;
pub const LIBDEFLATER_LEVEL: u8 = 12;
