//! Shared command-line plumbing for the bundled binaries.
//!
//! Every binary flattens [`CommonOptions`] into its clap parser, calls
//! [`CommonOptions::apply`] before doing any work, and reports failures
//! through [`exit_with_error`].

use std::fmt::Display;
use std::path::Path;

use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
use crate::progress::{ProgressCallback, ProgressInfo};

/// Options accepted by every binary.
#[derive(Debug, Args, Clone, Default)]
pub struct CommonOptions {
    /// Show debug-level logging output.
    #[arg(long)]
    pub verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, default_value_t = FfmpegLogLevel::Info)]
    pub log_level: FfmpegLogLevel,
}

impl CommonOptions {
    /// Install the Rust-side logger and set FFmpeg's own log level.
    ///
    /// `RUST_LOG` still overrides the default filter.
    pub fn apply(&self) {
        let default_filter = if self.verbose { "debug" } else { "info" };
        // A logger installed earlier stays in place; later calls only reset FFmpeg's level.
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_filter),
        )
        .format_timestamp(None)
        .try_init()
        .ok();

        set_ffmpeg_log_level(self.log_level);
    }
}

/// Print a coloured warning to stderr when `path` will be overwritten.
pub fn warn_if_exists(path: &Path) {
    if path.exists() {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!("overwriting {}", path.display()).yellow()
        );
    }
}

/// Print a coloured success line to stdout.
pub fn print_success(message: impl Display) {
    println!("{} {}", "success:".green().bold(), message.to_string().green());
}

/// Print `error: <message>` to stderr and exit with status 1.
pub fn exit_with_error(error: impl Display) -> ! {
    eprintln!("{} {error}", "error:".red().bold());
    std::process::exit(1);
}

/// Terminal progress bar driven by pipeline progress events.
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    /// Create a bar sized for `total` frames.
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        Self { bar }
    }

    /// Mark the bar complete.
    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.current);
    }
}
