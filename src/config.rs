//! Pipeline configuration.
//!
//! [`DecoderOptions`] and [`EncoderOptions`] are builders that carry the
//! fixed constants of the frame extractor and the frame synthesizer. Their
//! defaults reproduce the classic demo programs: five frames written as
//! `frame-<n>.pgm`, and 200 frames of 640x480 at 25 fps encoded with
//! `libx264` into `test.mp4`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use avpipes::{EncoderOptions, ProgressCallback, ProgressInfo};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let options = EncoderOptions::new()
//!     .with_output("clip.mkv")
//!     .with_resolution(320, 240)
//!     .with_total_frames(50)
//!     .with_progress(Arc::new(LogProgress));
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AvPipesError;
use crate::progress::{NoOpProgress, ProgressCallback};

/// Default number of frames the extractor writes before stopping.
pub const DEFAULT_MAX_FRAMES: u64 = 5;
/// Default file name prefix for extracted frames.
pub const DEFAULT_FILE_PREFIX: &str = "frame-";
/// Default container written by the synthesizer.
pub const DEFAULT_OUTPUT: &str = "test.mp4";
/// Default encoder, looked up by name.
pub const DEFAULT_ENCODER: &str = "libx264";

/// Settings for [`FrameExtractor`](crate::FrameExtractor).
#[derive(Clone)]
pub struct DecoderOptions {
    /// Stop after this many frames have been written.
    pub max_frames: u64,
    /// Directory the grayscale files are written to.
    pub output_directory: PathBuf,
    /// File name prefix; files are named `<prefix><n>.pgm`.
    pub file_prefix: String,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for DecoderOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DecoderOptions")
            .field("max_frames", &self.max_frames)
            .field("output_directory", &self.output_directory)
            .field("file_prefix", &self.file_prefix)
            .finish_non_exhaustive()
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderOptions {
    /// Create options with the default frame limit, current directory and
    /// `frame-` prefix.
    pub fn new() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
            output_directory: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the number of frames to write.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Set the directory frames are written to.
    #[must_use]
    pub fn with_output_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.output_directory = directory.as_ref().to_path_buf();
        self
    }

    /// Set the output file name prefix.
    #[must_use]
    pub fn with_file_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Attach a progress callback, fired once per written frame.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Path of the `index`-th output file.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.output_directory
            .join(format!("{}{index}.pgm", self.file_prefix))
    }

    pub(crate) fn validate(&self) -> Result<(), AvPipesError> {
        if self.max_frames == 0 {
            return Err(AvPipesError::InvalidOptions(
                "max_frames must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for [`VideoSynthesizer`](crate::VideoSynthesizer).
#[derive(Clone)]
pub struct EncoderOptions {
    /// Output file; the container format is guessed from its extension.
    pub output: PathBuf,
    /// Frame width in pixels. Must be even.
    pub width: u32,
    /// Frame height in pixels. Must be even.
    pub height: u32,
    /// Frames per second. The encoder time base is `1/frame_rate`.
    pub frame_rate: u32,
    /// Number of frames to synthesize.
    pub total_frames: u64,
    /// Encoder name as known to FFmpeg (e.g. `"libx264"`, `"mpeg4"`).
    pub encoder_name: String,
    /// Distance between intra frames.
    pub gop_size: u32,
    /// Maximum number of consecutive B-frames.
    pub max_b_frames: usize,
    /// x264 preset; only applied when the encoder produces H.264.
    pub preset: Option<String>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for EncoderOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("EncoderOptions")
            .field("output", &self.output)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame_rate", &self.frame_rate)
            .field("total_frames", &self.total_frames)
            .field("encoder_name", &self.encoder_name)
            .field("gop_size", &self.gop_size)
            .field("max_b_frames", &self.max_b_frames)
            .field("preset", &self.preset)
            .finish_non_exhaustive()
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderOptions {
    /// Create options matching the classic encoder demo.
    pub fn new() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            width: 640,
            height: 480,
            frame_rate: 25,
            total_frames: 200,
            encoder_name: DEFAULT_ENCODER.to_string(),
            gop_size: 12,
            max_b_frames: 1,
            preset: Some("slow".to_string()),
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the output path.
    #[must_use]
    pub fn with_output<P: AsRef<Path>>(mut self, output: P) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }

    /// Set the frame size.
    #[must_use]
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the frame rate.
    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Set the number of frames to synthesize.
    #[must_use]
    pub fn with_total_frames(mut self, total_frames: u64) -> Self {
        self.total_frames = total_frames;
        self
    }

    /// Set the encoder by FFmpeg name.
    #[must_use]
    pub fn with_encoder<S: Into<String>>(mut self, name: S) -> Self {
        self.encoder_name = name.into();
        self
    }

    /// Set the GOP size.
    #[must_use]
    pub fn with_gop_size(mut self, gop_size: u32) -> Self {
        self.gop_size = gop_size;
        self
    }

    /// Set the maximum number of consecutive B-frames.
    #[must_use]
    pub fn with_max_b_frames(mut self, max_b_frames: usize) -> Self {
        self.max_b_frames = max_b_frames;
        self
    }

    /// Set or clear the H.264 preset.
    #[must_use]
    pub fn with_preset(mut self, preset: Option<String>) -> Self {
        self.preset = preset;
        self
    }

    /// Attach a progress callback, fired once per encoded frame.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), AvPipesError> {
        if self.width == 0 || self.height == 0 {
            return Err(AvPipesError::InvalidOptions(format!(
                "frame size must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        // 4:2:0 chroma planes are half size in both directions.
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(AvPipesError::InvalidOptions(format!(
                "frame size must be even (got {}x{})",
                self.width, self.height
            )));
        }
        if self.frame_rate == 0 || self.frame_rate > i32::MAX as u32 {
            return Err(AvPipesError::InvalidOptions(format!(
                "frame rate out of range: {}",
                self.frame_rate
            )));
        }
        // The codec context stores both as C ints.
        if self.gop_size > i32::MAX as u32 {
            return Err(AvPipesError::InvalidOptions(format!(
                "GOP size out of range: {}",
                self.gop_size
            )));
        }
        if self.max_b_frames > i32::MAX as usize {
            return Err(AvPipesError::InvalidOptions(format!(
                "max B-frames out of range: {}",
                self.max_b_frames
            )));
        }
        if self.encoder_name.trim().is_empty() {
            return Err(AvPipesError::InvalidOptions(
                "encoder name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
