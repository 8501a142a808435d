use crate::constants::BATCH_EXTENSIONS;
use crate::error::{CompressionError, Result};
use glob::glob;
use std::path::{Path, PathBuf};

/// One unit of work for a processing pass. Derived from filesystem
/// enumeration and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    pub source_path: PathBuf,
    pub base_name: String,
    pub target_path: PathBuf,
}

impl ImageTask {
    /// Builds the task for one source file. The target is always
    /// `<target_dir>/<base_name>.png`, whatever the source extension was.
    pub fn for_source(source: &Path, target_dir: &Path) -> Result<Self> {
        let base_name = source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CompressionError::InvalidFileName(source.to_path_buf()))?
            .to_string();
        let target_path = target_dir.join(format!("{}.png", base_name));

        Ok(Self {
            source_path: source.to_path_buf(),
            base_name,
            target_path,
        })
    }
}

/// Enumerates every recognized image in `source_dir`, grouped by extension
/// in the order of `BATCH_EXTENSIONS`. Non-recursive.
pub fn collect_batch(source_dir: &Path, target_dir: &Path) -> Result<Vec<ImageTask>> {
    let mut tasks = Vec::new();

    for ext in BATCH_EXTENSIONS {
        let pattern = format!("{}/*.{}", source_dir.display(), ext);
        for entry in glob(&pattern)?.flatten() {
            if entry.is_file() {
                tasks.push(ImageTask::for_source(&entry, target_dir)?);
            }
        }
    }

    Ok(tasks)
}

/// Resolves a single named file under `source_dir`, failing when it does
/// not exist.
pub fn collect_single(source_dir: &Path, target_dir: &Path, filename: &str) -> Result<ImageTask> {
    let source_path = source_dir.join(filename);
    if !source_path.exists() {
        return Err(CompressionError::FileNotFound(source_path));
    }
    ImageTask::for_source(&source_path, target_dir)
}
