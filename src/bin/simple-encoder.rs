use std::path::PathBuf;
use std::sync::Arc;

use avpipes::cli::{CommonOptions, TerminalProgress, exit_with_error, print_success, warn_if_exists};
use avpipes::config::{DEFAULT_ENCODER, DEFAULT_OUTPUT};
use avpipes::{EncoderOptions, VideoSynthesizer};
use clap::Parser;

const AFTER_HELP: &str = "Examples:\n  simple-encoder\n  simple-encoder pattern.mkv --encoder mpeg4 --frames 50 --width 320 --height 240";

#[derive(Debug, Parser)]
#[command(
    name = "simple-encoder",
    version,
    about = "Synthesize a test-pattern video and encode it to a container file",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Output file; the container format follows the extension.
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Frame width in pixels (even).
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height in pixels (even).
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 25)]
    fps: u32,

    /// Number of frames to encode.
    #[arg(long, default_value_t = 200)]
    frames: u64,

    /// FFmpeg encoder name.
    #[arg(long, default_value = DEFAULT_ENCODER)]
    encoder: String,

    /// Intra frame interval.
    #[arg(long, default_value_t = 12)]
    gop: u32,

    /// Maximum consecutive B-frames.
    #[arg(long, default_value_t = 1)]
    max_b_frames: usize,

    /// x264 preset, used only with H.264 encoders. Pass "none" to leave unset.
    #[arg(long, default_value = "slow")]
    preset: String,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    #[command(flatten)]
    common: CommonOptions,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.common.apply();

    let preset = (!cli.preset.eq_ignore_ascii_case("none")).then(|| cli.preset.clone());
    let mut options = EncoderOptions::new()
        .with_output(&cli.output)
        .with_resolution(cli.width, cli.height)
        .with_frame_rate(cli.fps)
        .with_total_frames(cli.frames)
        .with_encoder(cli.encoder.as_str())
        .with_gop_size(cli.gop)
        .with_max_b_frames(cli.max_b_frames)
        .with_preset(preset);

    let progress = cli.progress.then(|| Arc::new(TerminalProgress::new(cli.frames)));
    if let Some(progress) = &progress {
        options = options.with_progress(progress.clone());
    }

    warn_if_exists(&cli.output);
    let report = VideoSynthesizer::new(options).run()?;

    if let Some(progress) = progress {
        progress.finish();
    }

    print_success(format!(
        "Encoded {} frame(s) ({} packets) to {}",
        report.frames_encoded,
        report.packets_written,
        report.output.display()
    ));
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        exit_with_error(error);
    }
}
