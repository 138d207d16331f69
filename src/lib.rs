//! # avpipes
//!
//! Three small FFmpeg pipelines, each a straight line of demuxing, decoding
//! or encoding calls, powered by the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ### Print media metadata
//!
//! ```no_run
//! use avpipes::MediaProbe;
//!
//! let media = MediaProbe::open("input.mp4").unwrap();
//! media.dump();
//! ```
//!
//! ### Save the first frames as grayscale images
//!
//! ```no_run
//! use avpipes::{DecoderOptions, FrameExtractor};
//!
//! let report = FrameExtractor::new(DecoderOptions::default())
//!     .run("input.mp4")
//!     .unwrap();
//! println!("saved {} frames", report.frames_saved);
//! ```
//!
//! ### Encode a synthetic clip
//!
//! ```no_run
//! use avpipes::{EncoderOptions, VideoSynthesizer};
//!
//! VideoSynthesizer::new(EncoderOptions::default()).run().unwrap();
//! ```
//!
//! ## Binaries
//!
//! | Binary | Pipeline |
//! |--------|----------|
//! | `media-info` | [`MediaProbe`] + [`ProbedMedia::dump`] |
//! | `simple-decoder` | [`FrameExtractor`] |
//! | `simple-encoder` | [`VideoSynthesizer`] |
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod cli;
pub mod config;
mod conversion;
pub mod decode;
pub mod encode;
pub mod error;
pub mod ffmpeg;
pub mod gray;
pub mod metadata;
pub mod probe;
pub mod progress;
pub mod synth;

pub use config::{DecoderOptions, EncoderOptions};
pub use decode::{ExtractionReport, FrameExtractor};
pub use encode::{EncodeReport, VideoSynthesizer};
pub use error::AvPipesError;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use gray::write_pgm;
pub use metadata::{MediaSummary, StreamKind, StreamSummary};
pub use probe::{MediaProbe, ProbedMedia};
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
