use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use avpipes::cli::{CommonOptions, TerminalProgress, exit_with_error, print_success};
use avpipes::config::{DEFAULT_FILE_PREFIX, DEFAULT_MAX_FRAMES};
use avpipes::{DecoderOptions, FrameExtractor};
use clap::Parser;

const AFTER_HELP: &str = "Examples:\n  simple-decoder input.mp4\n  simple-decoder input.mkv --frames 10 --out-dir stills --prefix still-";

#[derive(Debug, Parser)]
#[command(
    name = "simple-decoder",
    version,
    about = "Decode the first video frames of a file to grayscale PGM images",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Input media file.
    input: PathBuf,

    /// Number of frames to save.
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    frames: u64,

    /// Directory to write frames into (created if missing).
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File name prefix; frames are saved as <prefix><n>.pgm.
    #[arg(long, default_value = DEFAULT_FILE_PREFIX)]
    prefix: String,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    #[command(flatten)]
    common: CommonOptions,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.common.apply();

    if cli.frames == 0 {
        return Err("--frames must be greater than 0".into());
    }
    fs::create_dir_all(&cli.out_dir)?;

    let mut options = DecoderOptions::new()
        .with_max_frames(cli.frames)
        .with_output_directory(&cli.out_dir)
        .with_file_prefix(cli.prefix.as_str());

    let progress = cli.progress.then(|| Arc::new(TerminalProgress::new(cli.frames)));
    if let Some(progress) = &progress {
        options = options.with_progress(progress.clone());
    }

    let report = FrameExtractor::new(options).run(&cli.input)?;

    if let Some(progress) = progress {
        progress.finish();
    }

    print_success(format!(
        "Saved {} frame(s) to {}",
        report.frames_saved,
        cli.out_dir.display()
    ));
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        exit_with_error(error);
    }
}
