//! Media file probing.
//!
//! [`MediaProbe`] opens a file, reads its stream headers (decoding a few
//! packets where the container has no header, as with MPEG-TS), and hands
//! back a [`ProbedMedia`] that can print FFmpeg's own format dump or produce
//! an owned [`MediaSummary`]. The demuxer closes when the `ProbedMedia` is
//! dropped.
//!
//! # Example
//!
//! ```no_run
//! use avpipes::MediaProbe;
//!
//! let media = MediaProbe::open("input.mp4")?;
//! media.dump();
//! for stream in &media.summary().streams {
//!     println!("{stream}");
//! }
//! # Ok::<(), avpipes::AvPipesError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use ffmpeg_next::{codec::context::Context as CodecContext, format::context::Input, media::Type};

use crate::conversion::{av_time_to_duration, pts_to_duration, rational_to_f64};
use crate::error::AvPipesError;
use crate::metadata::{MediaSummary, StreamKind, StreamSummary};

/// Entry point for opening media files.
pub struct MediaProbe;

impl MediaProbe {
    /// Open and probe a media file.
    ///
    /// Initialises FFmpeg (idempotent), opens the container and reads stream
    /// information.
    ///
    /// # Errors
    ///
    /// Returns [`AvPipesError::FileOpen`] if the file cannot be opened or its
    /// stream information cannot be found.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ProbedMedia, AvPipesError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening media file: {}", path.display());
        crate::ffmpeg::initialize().map_err(|error| AvPipesError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;

        let input = ffmpeg_next::format::input(&path).map_err(|error| AvPipesError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;

        log::info!("Successfully opened file: {}", path.display());
        log::debug!(
            "Stream information found: format={}, streams={}",
            input.format().name(),
            input.nb_streams(),
        );

        Ok(ProbedMedia { input, path })
    }

    /// Probe a media file and return its summary without keeping it open.
    ///
    /// # Errors
    ///
    /// Returns [`AvPipesError::FileOpen`] if the file cannot be opened.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<MediaSummary, AvPipesError> {
        Ok(Self::open(path)?.summary())
    }
}

/// An open, probed media file.
pub struct ProbedMedia {
    pub(crate) input: Input,
    path: PathBuf,
}

impl Debug for ProbedMedia {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProbedMedia")
            .field("path", &self.path)
            .field("format", &self.input.format().name())
            .finish_non_exhaustive()
    }
}

impl ProbedMedia {
    /// Path the media was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Print FFmpeg's formatted description of the container and all of its
    /// streams to stderr.
    ///
    /// Output goes through FFmpeg's logger at info level, so nothing is
    /// printed when [`set_ffmpeg_log_level`](crate::set_ffmpeg_log_level) is
    /// set above [`FfmpegLogLevel::Info`](crate::FfmpegLogLevel::Info).
    pub fn dump(&self) {
        let url = self.path.to_string_lossy();
        ffmpeg_next::format::context::input::dump(&self.input, 0, Some(url.as_ref()));
    }

    /// Index of the stream FFmpeg considers the best video stream.
    pub fn best_video_stream(&self) -> Option<usize> {
        self.input
            .streams()
            .best(Type::Video)
            .map(|stream| stream.index())
    }

    /// Build an owned summary of the container and its streams.
    pub fn summary(&self) -> MediaSummary {
        let duration = av_time_to_duration(self.input.duration()).filter(|d| !d.is_zero());
        // SAFETY: `input` owns a valid, opened format context.
        let start_time = av_time_to_duration(unsafe { (*self.input.as_ptr()).start_time });
        let bit_rate = u64::try_from(self.input.bit_rate()).ok().filter(|&rate| rate > 0);

        let tags = self
            .input
            .metadata()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let streams = self
            .input
            .streams()
            .map(|stream| {
                let parameters = stream.parameters();
                let kind = StreamKind::from(parameters.medium());
                let codec = parameters.id().name().to_string();
                let time_base = stream.time_base();

                let mut summary = StreamSummary {
                    index: stream.index(),
                    kind,
                    codec,
                    time_base: (time_base.numerator(), time_base.denominator()),
                    width: None,
                    height: None,
                    frames_per_second: None,
                    sample_rate: None,
                    channels: None,
                    frame_count: u64::try_from(stream.frames()).ok().filter(|&n| n > 0),
                    duration: pts_to_duration(stream.duration(), time_base),
                    language: stream.metadata().get("language").map(str::to_string),
                };

                let context = CodecContext::from_parameters(parameters).ok();
                match kind {
                    StreamKind::Video => {
                        summary.frames_per_second = rational_to_f64(stream.avg_frame_rate())
                            .or_else(|| rational_to_f64(stream.rate()));
                        if let Some(video) = context.and_then(|ctx| ctx.decoder().video().ok()) {
                            summary.width = Some(video.width());
                            summary.height = Some(video.height());
                        }
                    }
                    StreamKind::Audio => {
                        if let Some(audio) = context.and_then(|ctx| ctx.decoder().audio().ok()) {
                            summary.sample_rate = Some(audio.rate());
                            summary.channels = Some(audio.channels());
                        }
                    }
                    _ => {}
                }

                summary
            })
            .collect();

        MediaSummary {
            format: self.input.format().name().to_string(),
            format_long_name: self.input.format().description().to_string(),
            duration,
            bit_rate,
            start_time,
            tags,
            streams,
        }
    }
}
