//! Media metadata types.
//!
//! This module defines the owned summary returned by
//! [`ProbedMedia::summary`](crate::ProbedMedia::summary) and
//! [`MediaProbe::probe`](crate::MediaProbe::probe). The framework's own
//! format dump is richer; these types carry the subset a program can act on.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use ffmpeg_next::media::Type;

/// Container-level metadata plus one entry per stream.
///
/// # Example
///
/// ```no_run
/// use avpipes::MediaProbe;
///
/// let summary = MediaProbe::probe("input.mp4")?;
/// println!("{} ({} streams)", summary.format, summary.streams.len());
/// # Ok::<(), avpipes::AvPipesError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct MediaSummary {
    /// Short container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
    /// Human-readable container format name.
    pub format_long_name: String,
    /// Total duration, if the container reports one.
    pub duration: Option<Duration>,
    /// Overall bit rate in bits per second, if known.
    pub bit_rate: Option<u64>,
    /// Presentation time of the first frame, if the container sets one.
    pub start_time: Option<Duration>,
    /// Container metadata tags, sorted by key.
    pub tags: BTreeMap<String, String>,
    /// Every stream in container order.
    pub streams: Vec<StreamSummary>,
}

impl MediaSummary {
    /// Streams of the given kind, in container order.
    pub fn streams_of(&self, kind: StreamKind) -> impl Iterator<Item = &StreamSummary> {
        self.streams.iter().filter(move |stream| stream.kind == kind)
    }

    /// The first video stream, if any.
    pub fn first_video(&self) -> Option<&StreamSummary> {
        self.streams_of(StreamKind::Video).next()
    }
}

/// The media type of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Video.
    Video,
    /// Audio.
    Audio,
    /// Subtitles.
    Subtitle,
    /// Opaque data (timecode tracks and the like).
    Data,
    /// Attachments such as embedded fonts.
    Attachment,
    /// Anything FFmpeg could not classify.
    Unknown,
}

impl StreamKind {
    /// Lowercase name, as used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
            StreamKind::Subtitle => "subtitle",
            StreamKind::Data => "data",
            StreamKind::Attachment => "attachment",
            StreamKind::Unknown => "unknown",
        }
    }
}

impl From<Type> for StreamKind {
    fn from(medium: Type) -> Self {
        match medium {
            Type::Video => StreamKind::Video,
            Type::Audio => StreamKind::Audio,
            Type::Subtitle => StreamKind::Subtitle,
            Type::Data => StreamKind::Data,
            Type::Attachment => StreamKind::Attachment,
            Type::Unknown => StreamKind::Unknown,
        }
    }
}

impl Display for StreamKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Metadata for one stream.
///
/// Video-only and audio-only fields are `None` for other stream kinds.
#[derive(Debug, Clone)]
#[must_use]
pub struct StreamSummary {
    /// Index in the container's stream table.
    pub index: usize,
    /// Media type.
    pub kind: StreamKind,
    /// Codec name (e.g. `"h264"`, `"aac"`), `"none"` when unknown.
    pub codec: String,
    /// Stream time base as `(numerator, denominator)`.
    pub time_base: (i32, i32),
    /// Frame width in pixels.
    pub width: Option<u32>,
    /// Frame height in pixels.
    pub height: Option<u32>,
    /// Average frames per second.
    pub frames_per_second: Option<f64>,
    /// Sample rate in hertz.
    pub sample_rate: Option<u32>,
    /// Number of audio channels.
    pub channels: Option<u16>,
    /// Frame count as recorded by the container, if it records one.
    pub frame_count: Option<u64>,
    /// Stream duration, if known.
    pub duration: Option<Duration>,
    /// ISO 639 language tag, if present.
    pub language: Option<String>,
}

impl Display for StreamSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{} {}: {}", self.index, self.kind, self.codec)?;
        if let (Some(width), Some(height)) = (self.width, self.height) {
            write!(f, ", {width}x{height}")?;
        }
        if let Some(fps) = self.frames_per_second {
            write!(f, ", {fps:.2} fps")?;
        }
        if let Some(rate) = self.sample_rate {
            write!(f, ", {rate} Hz")?;
        }
        if let Some(channels) = self.channels {
            write!(f, ", {channels} ch")?;
        }
        if let Some(language) = &self.language {
            write!(f, " ({language})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_stream() -> StreamSummary {
        StreamSummary {
            index: 0,
            kind: StreamKind::Video,
            codec: "h264".to_string(),
            time_base: (1, 12800),
            width: Some(640),
            height: Some(480),
            frames_per_second: Some(25.0),
            sample_rate: None,
            channels: None,
            frame_count: Some(200),
            duration: Some(Duration::from_secs(8)),
            language: Some("und".to_string()),
        }
    }

    #[test]
    fn stream_display() {
        assert_eq!(
            video_stream().to_string(),
            "#0 video: h264, 640x480, 25.00 fps (und)"
        );
    }

    #[test]
    fn first_video_skips_other_kinds() {
        let mut audio = video_stream();
        audio.index = 0;
        audio.kind = StreamKind::Audio;
        let mut video = video_stream();
        video.index = 1;

        let summary = MediaSummary {
            format: "matroska,webm".to_string(),
            format_long_name: "Matroska / WebM".to_string(),
            duration: None,
            bit_rate: None,
            start_time: None,
            tags: BTreeMap::new(),
            streams: vec![audio, video],
        };

        assert_eq!(summary.first_video().map(|s| s.index), Some(1));
        assert_eq!(summary.streams_of(StreamKind::Subtitle).count(), 0);
    }

    #[test]
    fn kinds_map_from_ffmpeg() {
        assert_eq!(StreamKind::from(Type::Video), StreamKind::Video);
        assert_eq!(StreamKind::from(Type::Attachment).as_str(), "attachment");
    }
}
