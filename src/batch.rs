use crate::error::Result;
use crate::processing::{process_image, Budget, Outcome};
use crate::tasks::ImageTask;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Tally of one run, for the end-of-run report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped: usize,
    pub copied: usize,
    pub compressed: usize,
    pub bytes_written: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Copied { bytes } => {
                self.copied += 1;
                self.bytes_written += bytes;
            }
            Outcome::Compressed { bytes, .. } => {
                self.compressed += 1;
                self.bytes_written += bytes;
            }
        }
    }

    pub fn processed(&self) -> usize {
        self.skipped + self.copied + self.compressed
    }
}

/// Processes every task in order, one at a time. The first failure aborts
/// the whole run; everything published before it stays on disk.
pub fn run(tasks: &[ImageTask], budget: &Budget) -> Result<RunSummary> {
    if tasks.is_empty() {
        crate::warn!("No image files found in the source directory");
        return Ok(RunSummary::default());
    }

    let start = Instant::now();
    let progress = if crate::logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(tasks.len() as u64)
    };
    progress.set_style(ProgressStyle::default_bar());

    let mut summary = RunSummary::default();

    for task in tasks {
        let outcome = process_image(task, budget)?;
        crate::info!("{}", describe(task, &outcome));
        summary.record(&outcome);
        progress.inc(1);
    }

    progress.finish_and_clear();

    let elapsed = start.elapsed();
    crate::info!("\n📊 Run summary:");
    crate::info!("  📁 Files processed: {}", summary.processed());
    crate::info!(
        "  ⏭️  Skipped: {}   📋 Copied: {}   🗜️  Compressed: {}",
        summary.skipped,
        summary.copied,
        summary.compressed
    );
    crate::info!("  📦 Bytes written: {}", summary.bytes_written);
    crate::info!("  ⏱️  Total time: {:.2?}", elapsed);

    Ok(summary)
}

fn describe(task: &ImageTask, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Skipped { bytes } => format!(
            "⏭️  Skipped {}, already compressed: {} bytes",
            task.source_path.display(),
            bytes
        ),
        Outcome::Copied { bytes } => format!(
            "📋 Copied {} to {}, size: {} bytes",
            task.source_path.display(),
            task.target_path.display(),
            bytes
        ),
        Outcome::Compressed {
            bytes,
            width,
            height,
            floor_reached,
        } => {
            if *floor_reached {
                format!(
                    "✅ Compressed {} to {} (minimum size reached), size: {} bytes ({}x{})",
                    task.source_path.display(),
                    task.target_path.display(),
                    bytes,
                    width,
                    height
                )
            } else {
                format!(
                    "✅ Compressed {} to {}, size: {} bytes ({}x{})",
                    task.source_path.display(),
                    task.target_path.display(),
                    bytes,
                    width,
                    height
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn small_png(path: &Path) {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([10, 200, 90])));
        img.save(path).unwrap();
    }

    #[test]
    fn test_run_empty_task_list() {
        let summary = run(&[], &Budget::default()).unwrap();
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn test_run_copies_small_sources() {
        let dir = TempDir::new().unwrap();
        let target_dir = dir.path().join("out");
        std::fs::create_dir_all(&target_dir).unwrap();

        let source = dir.path().join("a.png");
        small_png(&source);
        let task = ImageTask::for_source(&source, &target_dir).unwrap();

        let summary = run(std::slice::from_ref(&task), &Budget::default()).unwrap();
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.processed(), 1);
        assert!(task.target_path.exists());
    }

    #[test]
    fn test_run_aborts_on_first_failure() {
        let dir = TempDir::new().unwrap();
        let target_dir = dir.path().join("out");
        std::fs::create_dir_all(&target_dir).unwrap();

        let missing = ImageTask::for_source(&dir.path().join("missing.png"), &target_dir).unwrap();
        let good_source = dir.path().join("b.png");
        small_png(&good_source);
        let good = ImageTask::for_source(&good_source, &target_dir).unwrap();

        let result = run(&[missing, good.clone()], &Budget::default());
        assert!(result.is_err());
        // The task after the failing one was never reached
        assert!(!good.target_path.exists());
    }

    #[test]
    fn test_summary_record() {
        let mut summary = RunSummary::default();
        summary.record(&Outcome::Skipped { bytes: 10 });
        summary.record(&Outcome::Copied { bytes: 100 });
        summary.record(&Outcome::Compressed {
            bytes: 200,
            width: 64,
            height: 64,
            floor_reached: false,
        });

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.compressed, 1);
        assert_eq!(summary.processed(), 3);
        // Skipped outputs were written by an earlier run, not this one
        assert_eq!(summary.bytes_written, 300);
    }

    #[test]
    fn test_describe_messages() {
        let task = ImageTask::for_source(Path::new("logos/acme.jpg"), Path::new("out")).unwrap();

        let skipped = describe(&task, &Outcome::Skipped { bytes: 42 });
        assert!(skipped.contains("Skipped"));
        assert!(skipped.contains("42 bytes"));

        let copied = describe(&task, &Outcome::Copied { bytes: 9000 });
        assert!(copied.contains("Copied"));
        assert!(copied.contains("acme.png"));

        let floored = describe(
            &task,
            &Outcome::Compressed {
                bytes: 90_000,
                width: 50,
                height: 45,
                floor_reached: true,
            },
        );
        assert!(floored.contains("minimum size reached"));
        assert!(floored.contains("50x45"));
    }
}
