use crate::constants::{
    LIBDEFLATER_LEVEL, MAX_INITIAL_DIMENSION, MAX_OUTPUT_BYTES, MIN_DIMENSION, OXIPNG_PRESET,
    SHRINK_FACTOR,
};
use crate::error::{CompressionError, Result};
use crate::tasks::ImageTask;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use oxipng::Deflaters;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Size limits for one processing pass. The binary always runs with the
/// default; tests tighten the fields to exercise the loop edges.
#[derive(Debug, Clone)]
pub struct Budget {
    /// Largest acceptable output file.
    pub max_bytes: u64,
    /// Shrinking stops once either dimension is at or below this.
    pub min_dimension: u32,
    /// Oversized images are constrained within this square before the
    /// first encode.
    pub max_initial_dimension: u32,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_bytes: MAX_OUTPUT_BYTES,
            min_dimension: MIN_DIMENSION,
            max_initial_dimension: MAX_INITIAL_DIMENSION,
        }
    }
}

/// What to do with one source image, given the byte sizes on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// An output within budget already exists.
    Skip { target_bytes: u64 },
    /// The source itself fits the budget; carry its bytes over unchanged.
    CopyOriginal,
    /// Decode and run the downscale loop.
    Shrink,
}

/// How one image ended up in the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped {
        bytes: u64,
    },
    Copied {
        bytes: u64,
    },
    Compressed {
        bytes: u64,
        width: u32,
        height: u32,
        /// The dimension floor stopped the loop before the byte budget
        /// was met.
        floor_reached: bool,
    },
}

pub fn decide(existing_target: Option<u64>, source_len: u64, max_bytes: u64) -> Action {
    match existing_target {
        Some(len) if len <= max_bytes => Action::Skip { target_bytes: len },
        _ if source_len <= max_bytes => Action::CopyOriginal,
        _ => Action::Shrink,
    }
}

/// Runs the full pipeline for one task: skip when a small-enough output
/// already exists, copy the source verbatim when it fits the budget,
/// otherwise decode and shrink until it does.
pub fn process_image(task: &ImageTask, budget: &Budget) -> Result<Outcome> {
    let existing = fs::metadata(&task.target_path).ok().map(|m| m.len());
    let source_len = fs::metadata(&task.source_path)?.len();

    match decide(existing, source_len, budget.max_bytes) {
        Action::Skip { target_bytes } => Ok(Outcome::Skipped {
            bytes: target_bytes,
        }),
        Action::CopyOriginal => {
            // Not re-encoded: a small .jpg source lands byte-identical in
            // the .png-named target.
            fs::copy(&task.source_path, &task.target_path)?;
            Ok(Outcome::Copied { bytes: source_len })
        }
        Action::Shrink => {
            let img = ImageReader::open(&task.source_path)?
                .with_guessed_format()?
                .decode()?;
            shrink_to_budget(img, &task.target_path, budget)
        }
    }
}

fn shrink_to_budget(img: DynamicImage, target: &Path, budget: &Budget) -> Result<Outcome> {
    let mut current = constrain_to_bounds(img, budget.max_initial_dimension);

    loop {
        let encoded = encode_optimized_png(&current)?;
        let bytes = encoded.len() as u64;
        let (width, height) = current.dimensions();

        if bytes <= budget.max_bytes {
            publish(&encoded, target)?;
            return Ok(Outcome::Compressed {
                bytes,
                width,
                height,
                floor_reached: false,
            });
        }

        // Safety valve: once a dimension is at the floor, publish whatever
        // the last encode produced.
        if width <= budget.min_dimension || height <= budget.min_dimension {
            publish(&encoded, target)?;
            return Ok(Outcome::Compressed {
                bytes,
                width,
                height,
                floor_reached: true,
            });
        }

        let (next_width, next_height) = shrink_step(width, height);
        crate::verbose!(
            "{}x{} encodes to {} bytes, retrying at {}x{}",
            width,
            height,
            bytes,
            next_width,
            next_height
        );
        current = current.resize_exact(next_width, next_height, FilterType::Lanczos3);
    }
}

/// Scales the image down to fit within `bound` on both sides, preserving
/// aspect ratio. Images already within the bound are returned untouched,
/// never upscaled.
pub fn constrain_to_bounds(img: DynamicImage, bound: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= bound && height <= bound {
        return img;
    }
    img.resize(bound, bound, FilterType::Lanczos3)
}

/// One step of the downscale loop: both dimensions multiplied by the
/// shrink factor, truncated.
pub fn shrink_step(width: u32, height: u32) -> (u32, u32) {
    (
        (width as f64 * SHRINK_FACTOR) as u32,
        (height as f64 * SHRINK_FACTOR) as u32,
    )
}

/// Encodes the image as PNG and runs it through oxipng.
pub fn encode_optimized_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut plain = Vec::new();
    img.write_to(&mut Cursor::new(&mut plain), ImageFormat::Png)?;

    let mut options = oxipng::Options::from_preset(OXIPNG_PRESET);
    options.deflate = Deflaters::Libdeflater {
        compression: LIBDEFLATER_LEVEL,
    };

    oxipng::optimize_from_memory(&plain, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

/// Writes the encoded bytes next to the target and renames over it, so a
/// reader never observes a partially written file. The temp file is
/// removed on every error path.
fn publish(encoded: &[u8], target: &Path) -> Result<u64> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(encoded)?;
    tmp.persist(target)
        .map_err(|e| CompressionError::Io(e.error))?;
    Ok(encoded.len() as u64)
}
