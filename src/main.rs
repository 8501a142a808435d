use clap::Parser;
use logo_crush::cli::Args;
use logo_crush::constants::{SOURCE_DIR, TARGET_DIR};
use logo_crush::error::{CompressionError, Result};
use logo_crush::processing::Budget;
use logo_crush::{batch, logger, tasks};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let source_dir = Path::new(SOURCE_DIR);
    let target_dir = Path::new(TARGET_DIR);

    fs::create_dir_all(target_dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(target_dir.to_path_buf()))?;

    let tasks = match &args.filename {
        Some(name) => vec![tasks::collect_single(source_dir, target_dir, name)?],
        None => tasks::collect_batch(source_dir, target_dir)?,
    };

    batch::run(&tasks, &Budget::default())?;
    Ok(())
}
