//! Frame extraction: decode the first frames of a video to grayscale files.
//!
//! [`FrameExtractor`] opens a media file, picks the best video stream, opens
//! a matching decoder, and feeds it packets until the configured number of
//! frames has been written as `<prefix><n>.pgm`. Short inputs are drained at
//! end of stream, so a file with fewer frames than the limit still produces
//! every frame it has.
//!
//! # Example
//!
//! ```no_run
//! use avpipes::{DecoderOptions, FrameExtractor};
//!
//! let report = FrameExtractor::new(DecoderOptions::new().with_max_frames(3))
//!     .run("input.mp4")?;
//! for path in &report.files {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), avpipes::AvPipesError>(())
//! ```

use std::path::{Path, PathBuf};

use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::codec::decoder::Video as VideoDecoder;
use ffmpeg_next::frame::Video as VideoFrame;
use ffmpeg_next::{Error as FfmpegError, Packet};

use crate::config::DecoderOptions;
use crate::error::AvPipesError;
use crate::gray::GrayFrameWriter;
use crate::probe::MediaProbe;
use crate::progress::{OperationType, ProgressTracker};

/// Outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Number of frames written.
    pub frames_saved: u64,
    /// Files written, in frame order.
    pub files: Vec<PathBuf>,
}

/// Decodes leading video frames to grayscale image files.
#[derive(Debug, Clone, Default)]
pub struct FrameExtractor {
    options: DecoderOptions,
}

impl FrameExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// Options this extractor runs with.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decode `path` and write up to `max_frames` grayscale files.
    ///
    /// # Errors
    ///
    /// - [`AvPipesError::InvalidOptions`] if `max_frames` is zero.
    /// - [`AvPipesError::FileOpen`] if the input cannot be opened or probed.
    /// - [`AvPipesError::NoVideoStream`] if the input has no video.
    /// - [`AvPipesError::UnsupportedCodec`] if no decoder matches the stream.
    /// - [`AvPipesError::VideoDecodeError`] if the decoder cannot be opened or
    ///   fails mid-stream.
    /// - [`AvPipesError::IoError`] / [`AvPipesError::ImageError`] if a file
    ///   cannot be written.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionReport, AvPipesError> {
        self.options.validate()?;

        let mut media = MediaProbe::open(path)?;
        media.dump();

        let stream_index = media.best_video_stream().ok_or(AvPipesError::NoVideoStream)?;
        let parameters = media
            .input
            .stream(stream_index)
            .ok_or(AvPipesError::NoVideoStream)?
            .parameters();

        let codec_id = parameters.id();
        let codec = ffmpeg_next::decoder::find(codec_id)
            .ok_or_else(|| AvPipesError::UnsupportedCodec(codec_id.name().to_string()))?;

        let context = CodecContext::from_parameters(parameters).map_err(|error| {
            AvPipesError::VideoDecodeError(format!(
                "failed to copy codec parameters to context: {error}"
            ))
        })?;
        let mut decoder = context
            .decoder()
            .open_as(codec)
            .and_then(|opened| opened.video())
            .map_err(|error| {
                AvPipesError::VideoDecodeError(format!("failed to open codec: {error}"))
            })?;

        log::debug!(
            "Decoding stream {stream_index} with {} ({}x{}, {:?})",
            codec.name(),
            decoder.width(),
            decoder.height(),
            decoder.format(),
        );

        let mut sink = FrameSink {
            options: &self.options,
            writer: GrayFrameWriter::new(),
            tracker: ProgressTracker::new(
                self.options.progress.clone(),
                OperationType::FrameExtraction,
                Some(self.options.max_frames),
            ),
            files: Vec::new(),
        };

        loop {
            let mut packet = Packet::empty();
            match packet.read(&mut media.input) {
                Ok(()) => {}
                Err(FfmpegError::Eof) => break,
                Err(error) => {
                    return Err(AvPipesError::VideoDecodeError(format!(
                        "error reading packet: {error}"
                    )));
                }
            }

            if packet.stream() != stream_index {
                continue;
            }

            decoder.send_packet(&packet).map_err(|error| {
                AvPipesError::VideoDecodeError(format!(
                    "error sending a packet for decoding: {error}"
                ))
            })?;

            if sink.drain(&mut decoder)? {
                return Ok(sink.finish());
            }
        }

        // End of input before the limit: flush frames the decoder still holds.
        decoder.send_eof().map_err(|error| {
            AvPipesError::VideoDecodeError(format!("error flushing decoder: {error}"))
        })?;
        sink.drain(&mut decoder)?;

        Ok(sink.finish())
    }
}

struct FrameSink<'a> {
    options: &'a DecoderOptions,
    writer: GrayFrameWriter,
    tracker: ProgressTracker,
    files: Vec<PathBuf>,
}

impl FrameSink<'_> {
    /// Receive every frame the decoder has ready, writing each one.
    ///
    /// Returns `true` once the frame limit has been reached.
    fn drain(&mut self, decoder: &mut VideoDecoder) -> Result<bool, AvPipesError> {
        let mut frame = VideoFrame::empty();
        loop {
            match decoder.receive_frame(&mut frame) {
                Ok(()) => {
                    let index = self.tracker.current();
                    let path = self.options.frame_path(index);
                    self.writer.write(&frame, &path)?;
                    log::info!("Saved frame {index} to {}", path.display());

                    self.files.push(path);
                    self.tracker.advance();
                    if self.tracker.current() >= self.options.max_frames {
                        return Ok(true);
                    }
                }
                Err(FfmpegError::Eof) => return Ok(false),
                Err(FfmpegError::Other { errno }) if errno == ffmpeg_sys_next::EAGAIN as i32 => {
                    return Ok(false);
                }
                Err(error) => {
                    return Err(AvPipesError::VideoDecodeError(format!(
                        "error during decoding: {error}"
                    )));
                }
            }
        }
    }

    fn finish(self) -> ExtractionReport {
        ExtractionReport {
            frames_saved: self.tracker.current(),
            files: self.files,
        }
    }
}
