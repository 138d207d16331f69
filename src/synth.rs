//! Procedural test-pattern generation.
//!
//! Each synthesized YUV 4:2:0 frame is a diagonal luma gradient with
//! horizontal and vertical chroma ramps, all drifting with the frame index so
//! that consecutive frames differ. Every sample wraps modulo 256:
//!
//! - `Y(x, y) = x + y + 3i`
//! - `Cb(x, y) = 128 + y + 2i` (chroma coordinates)
//! - `Cr(x, y) = 64 + x + 5i` (chroma coordinates)

use ffmpeg_next::frame::Video as VideoFrame;

/// Luma sample at `(x, y)` of frame `frame_index`.
#[inline]
pub fn luma(x: usize, y: usize, frame_index: u64) -> u8 {
    (x as u64)
        .wrapping_add(y as u64)
        .wrapping_add(frame_index.wrapping_mul(3)) as u8
}

/// Blue-difference chroma sample on chroma row `y` of frame `frame_index`.
#[inline]
pub fn chroma_blue(y: usize, frame_index: u64) -> u8 {
    128u64
        .wrapping_add(y as u64)
        .wrapping_add(frame_index.wrapping_mul(2)) as u8
}

/// Red-difference chroma sample on chroma column `x` of frame `frame_index`.
#[inline]
pub fn chroma_red(x: usize, frame_index: u64) -> u8 {
    64u64
        .wrapping_add(x as u64)
        .wrapping_add(frame_index.wrapping_mul(5)) as u8
}

/// Fill a strided luma plane of `width` x `height` samples.
pub fn fill_luma(plane: &mut [u8], stride: usize, width: usize, height: usize, frame_index: u64) {
    for (y, row) in plane.chunks_mut(stride).take(height).enumerate() {
        for (x, sample) in row[..width].iter_mut().enumerate() {
            *sample = luma(x, y, frame_index);
        }
    }
}

/// Fill a strided Cb plane of `width` x `height` chroma samples.
pub fn fill_chroma_blue(
    plane: &mut [u8],
    stride: usize,
    width: usize,
    height: usize,
    frame_index: u64,
) {
    for (y, row) in plane.chunks_mut(stride).take(height).enumerate() {
        row[..width].fill(chroma_blue(y, frame_index));
    }
}

/// Fill a strided Cr plane of `width` x `height` chroma samples.
pub fn fill_chroma_red(
    plane: &mut [u8],
    stride: usize,
    width: usize,
    height: usize,
    frame_index: u64,
) {
    for row in plane.chunks_mut(stride).take(height) {
        for (x, sample) in row[..width].iter_mut().enumerate() {
            *sample = chroma_red(x, frame_index);
        }
    }
}

/// Paint frame `frame_index` of the pattern into a YUV420P frame.
///
/// The frame must already own its buffers (e.g. from
/// [`VideoFrame::new`]).
pub fn fill_frame(frame: &mut VideoFrame, frame_index: u64) {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let (chroma_width, chroma_height) = (width / 2, height / 2);

    let stride = frame.stride(0);
    fill_luma(frame.data_mut(0), stride, width, height, frame_index);

    let stride = frame.stride(1);
    fill_chroma_blue(frame.data_mut(1), stride, chroma_width, chroma_height, frame_index);

    let stride = frame.stride(2);
    fill_chroma_red(frame.data_mut(2), stride, chroma_width, chroma_height, frame_index);
}

#[cfg(test)]
mod tests {
    use ffmpeg_next::format::Pixel;

    use super::*;

    #[test]
    fn samples_follow_the_gradient() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(10, 20, 1), 33);
        assert_eq!(chroma_blue(0, 0), 128);
        assert_eq!(chroma_blue(5, 3), 139);
        assert_eq!(chroma_red(0, 0), 64);
        assert_eq!(chroma_red(7, 2), 81);
    }

    #[test]
    fn samples_wrap_modulo_256() {
        assert_eq!(luma(200, 100, 0), 44);
        assert_eq!(luma(639, 479, 199), ((639 + 479 + 597) % 256) as u8);
        assert_eq!(chroma_blue(239, 199), ((128 + 239 + 398) % 256) as u8);
        assert_eq!(chroma_red(319, 199), ((64 + 319 + 995) % 256) as u8);
        assert_eq!(luma(0, 0, u64::MAX), u64::MAX.wrapping_mul(3) as u8);
    }

    #[test]
    fn fill_luma_leaves_padding_untouched() {
        let (width, height, stride) = (3, 2, 5);
        let mut plane = vec![0xAA; stride * height];
        fill_luma(&mut plane, stride, width, height, 1);
        assert_eq!(plane, vec![3, 4, 5, 0xAA, 0xAA, 4, 5, 6, 0xAA, 0xAA]);
    }

    #[test]
    fn chroma_planes_ramp_along_their_axis() {
        let mut blue = vec![0; 8];
        fill_chroma_blue(&mut blue, 4, 4, 2, 0);
        assert_eq!(blue, vec![128, 128, 128, 128, 129, 129, 129, 129]);

        let mut red = vec![0; 8];
        fill_chroma_red(&mut red, 4, 4, 2, 1);
        assert_eq!(red, vec![69, 70, 71, 72, 69, 70, 71, 72]);
    }

    #[test]
    fn fills_an_ffmpeg_frame() {
        let mut frame = VideoFrame::new(Pixel::YUV420P, 16, 8);
        fill_frame(&mut frame, 2);

        let stride = frame.stride(0);
        assert_eq!(frame.data(0)[3 * stride + 5], luma(5, 3, 2));

        let stride = frame.stride(1);
        assert_eq!(frame.data(1)[2 * stride + 7], chroma_blue(2, 2));

        let stride = frame.stride(2);
        assert_eq!(frame.data(2)[stride + 6], chroma_red(6, 2));
    }
}
