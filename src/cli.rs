use clap::Parser;

#[derive(Parser)]
#[command(
    name = "logo-crush",
    about = "Shrinks logo images down to a fixed byte budget as optimized PNGs",
    long_about = "logo-crush recompresses the logos under public/assets/logos/ into \
                  public/assets/compressedLogos/, keeping every output at or below 80 KiB. \
                  Small sources are copied through unchanged; oversized ones are downscaled \
                  step by step until they fit the budget.",
    version,
    after_help = "EXAMPLES:\n  \
    logo-crush              # batch mode: every recognized image in the source directory\n  \
    logo-crush acme.png     # single-file mode: just public/assets/logos/acme.png\n  \
    logo-crush -v acme.png  # show each downscale step"
)]
pub struct Args {
    #[arg(
        help = "File name to process from the source directory (batch mode when omitted)",
        long_help = "Name of a single file under public/assets/logos/ to process. \
                     When omitted, every file with a recognized extension \
                     (.png .jpg .jpeg .gif .webp) in that directory is processed."
    )]
    pub filename: Option<String>,

    #[arg(short = 'q', long, help = "Suppress per-file messages and the summary")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print per-iteration downscale details")]
    pub verbose: bool,
}
