//! Internal utility functions.
//!
//! Helpers for stride-aware plane copying and timestamp conversion shared by
//! the prober, the extractor, and the synthesizer.

use std::time::Duration;

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy `rows` rows of `row_bytes` bytes out of a strided plane into a
/// tightly packed buffer, dropping any per-row alignment padding.
pub(crate) fn pack_plane(data: &[u8], stride: usize, row_bytes: usize, rows: usize) -> Vec<u8> {
    if stride == row_bytes {
        return data[..row_bytes * rows].to_vec();
    }

    let mut buffer = Vec::with_capacity(row_bytes * rows);
    for row in 0..rows {
        let row_start = row * stride;
        buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
    }
    buffer
}

/// Copy one plane of an FFmpeg video frame into a tightly packed buffer.
///
/// `row_bytes` is the number of meaningful bytes per row (e.g. the width for
/// an 8-bit luma plane).
pub(crate) fn frame_plane_to_buffer(
    video_frame: &VideoFrame,
    plane: usize,
    row_bytes: usize,
    rows: usize,
) -> Vec<u8> {
    pack_plane(video_frame.data(plane), video_frame.stride(plane), row_bytes, rows)
}

/// Rescale a timestamp from a time base to seconds.
pub(crate) fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    if time_base.denominator() == 0 {
        return 0.0;
    }
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Convert a timestamp in a time base to a [`Duration`]. Zero, negative, and
/// unset (`AV_NOPTS_VALUE`) timestamps map to `None`.
pub(crate) fn pts_to_duration(pts: i64, time_base: Rational) -> Option<Duration> {
    if pts <= 0 {
        return None;
    }
    let seconds = pts_to_seconds(pts, time_base);
    (seconds.is_finite() && seconds > 0.0).then(|| Duration::from_secs_f64(seconds))
}

/// Convert a container-level time in `AV_TIME_BASE` units (microseconds) to a
/// [`Duration`]. Negative and unset values map to `None`.
pub(crate) fn av_time_to_duration(value: i64) -> Option<Duration> {
    if value == ffmpeg_sys_next::AV_NOPTS_VALUE {
        return None;
    }
    u64::try_from(value).ok().map(Duration::from_micros)
}

/// Convert a rational rate to a floating point value, `None` when the rate is
/// unset.
pub(crate) fn rational_to_f64(rate: Rational) -> Option<f64> {
    if rate.numerator() == 0 || rate.denominator() == 0 {
        None
    } else {
        Some(rate.numerator() as f64 / rate.denominator() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn av_time_guards_unset_and_negative_values() {
        assert_eq!(av_time_to_duration(ffmpeg_sys_next::AV_NOPTS_VALUE), None);
        assert_eq!(av_time_to_duration(-40), None);
        assert_eq!(av_time_to_duration(0), Some(Duration::ZERO));
        assert_eq!(av_time_to_duration(1_500_000), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn pack_plane_without_padding_is_a_copy() {
        let data: Vec<u8> = (0..12).collect();
        assert_eq!(pack_plane(&data, 4, 4, 3), data);
    }

    #[test]
    fn pack_plane_drops_padding() {
        // 3x2 image stored with a stride of 5.
        let data = [1, 2, 3, 0, 0, 4, 5, 6, 0, 0];
        assert_eq!(pack_plane(&data, 5, 3, 2), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn timestamps_rescale() {
        let time_base = Rational::new(1, 25);
        assert!((pts_to_seconds(50, time_base) - 2.0).abs() < f64::EPSILON);
        assert_eq!(pts_to_duration(25, time_base), Some(Duration::from_secs(1)));
        assert_eq!(pts_to_duration(0, time_base), None);
        assert_eq!(pts_to_duration(-3, time_base), None);
    }

    #[test]
    fn unset_rate_is_none() {
        assert_eq!(rational_to_f64(Rational::new(0, 1)), None);
        assert_eq!(rational_to_f64(Rational::new(25, 1)), Some(25.0));
    }
}
