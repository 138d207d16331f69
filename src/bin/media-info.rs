use std::path::PathBuf;

use avpipes::MediaProbe;
use avpipes::cli::{CommonOptions, exit_with_error};
use clap::Parser;
use serde_json::json;

const AFTER_HELP: &str = "Examples:\n  media-info input.mp4\n  media-info input.mkv --json --log-level error";

#[derive(Debug, Parser)]
#[command(
    name = "media-info",
    version,
    about = "Print container and stream metadata for a media file",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Input media file.
    input: PathBuf,

    /// Also print a machine-readable JSON summary on stdout.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    common: CommonOptions,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.common.apply();

    let media = MediaProbe::open(&cli.input)?;
    log::info!("Stream information found.");
    media.dump();

    if cli.json {
        let summary = media.summary();
        let payload = json!({
            "format": summary.format,
            "format_long_name": summary.format_long_name,
            "duration_seconds": summary.duration.map(|d| d.as_secs_f64()),
            "bit_rate": summary.bit_rate,
            "start_time_seconds": summary.start_time.map(|t| t.as_secs_f64()),
            "tags": summary.tags,
            "streams": summary.streams.iter().map(|stream| json!({
                "index": stream.index,
                "kind": stream.kind.as_str(),
                "codec": stream.codec,
                "time_base": format!("{}/{}", stream.time_base.0, stream.time_base.1),
                "width": stream.width,
                "height": stream.height,
                "fps": stream.frames_per_second,
                "sample_rate": stream.sample_rate,
                "channels": stream.channels,
                "frame_count": stream.frame_count,
                "duration_seconds": stream.duration.map(|d| d.as_secs_f64()),
                "language": stream.language,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    drop(media);
    log::info!("Cleanup finished.");
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        exit_with_error(error);
    }
}
