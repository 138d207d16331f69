//! Error types for the `avpipes` crate.
//!
//! This module defines [`AvPipesError`], the unified error type returned by
//! every pipeline. The first failure of any FFmpeg call ends the run, so each
//! variant carries enough context to explain which step failed.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `avpipes` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AvPipesError {
    /// The media file could not be opened or probed.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to the prober or decoder.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// No decoder is available for the video stream's codec.
    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// The named encoder is not compiled into the linked FFmpeg.
    #[error("Encoder '{0}' not found")]
    EncoderNotFound(String),

    /// The encoder could not be configured, opened, or fed.
    #[error("Video encoding error: {0}")]
    VideoEncodeError(String),

    /// The output container could not be created or written.
    #[error("Video write error: {0}")]
    VideoWriteError(String),

    /// Decoder or encoder options were rejected before any work started.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while writing a grayscale frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for AvPipesError {
    fn from(error: FfmpegError) -> Self {
        AvPipesError::FfmpegError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_open_message_names_path() {
        let error = AvPipesError::FileOpen {
            path: PathBuf::from("missing.mp4"),
            reason: "No such file or directory".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("missing.mp4"));
        assert!(message.starts_with("Failed to open media file"));
    }

    #[test]
    fn ffmpeg_errors_convert() {
        let error: AvPipesError = FfmpegError::Eof.into();
        assert!(matches!(error, AvPipesError::FfmpegError(_)));
    }
}
