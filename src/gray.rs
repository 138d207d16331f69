//! Grayscale raster output.
//!
//! Decoded frames are written as binary portable graymaps (`P5`): a short
//! text header followed by one byte per pixel, row by row. For planar YUV and
//! gray frames the luma plane is already the grayscale image and is copied
//! directly, dropping any alignment padding at the end of each row. Other
//! pixel formats are converted to GRAY8 with FFmpeg's software scaler first.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ffmpeg_next::format::Pixel;
use ffmpeg_next::frame::Video as VideoFrame;
use ffmpeg_next::software::scaling::{Context as ScalingContext, Flags as ScalingFlags};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{ExtendedColorType, ImageEncoder};

use crate::conversion::frame_plane_to_buffer;
use crate::error::AvPipesError;

/// Write an 8-bit grayscale image as a binary PGM file.
///
/// `luma` must hold exactly `width * height` bytes, row-major with no
/// padding.
///
/// # Errors
///
/// Returns [`AvPipesError::ImageError`] on a size mismatch and
/// [`AvPipesError::IoError`] if the file cannot be written.
pub fn write_pgm<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    luma: &[u8],
) -> Result<(), AvPipesError> {
    if luma.len() != width as usize * height as usize {
        return Err(AvPipesError::ImageError(ImageError::Parameter(
            ParameterError::from_kind(ParameterErrorKind::DimensionMismatch),
        )));
    }

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    PnmEncoder::new(&mut writer)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(luma, width, height, ExtendedColorType::L8)?;
    writer.flush()?;
    Ok(())
}

/// Whether plane 0 of `format` is an 8-bit luma (or gray) plane.
pub(crate) fn has_luma_plane(format: Pixel) -> bool {
    matches!(
        format,
        Pixel::GRAY8
            | Pixel::YUV420P
            | Pixel::YUVJ420P
            | Pixel::YUV422P
            | Pixel::YUVJ422P
            | Pixel::YUV444P
            | Pixel::YUVJ444P
            | Pixel::YUV440P
            | Pixel::YUVJ440P
            | Pixel::YUV410P
            | Pixel::YUV411P
            | Pixel::YUVA420P
            | Pixel::NV12
            | Pixel::NV21
    )
}

/// Writes decoded frames as grayscale files.
///
/// Keeps one scaler alive for frames that need conversion, rebuilding it only
/// when the source format or size changes mid-stream.
#[derive(Default)]
pub(crate) struct GrayFrameWriter {
    scaler: Option<(Pixel, u32, u32, ScalingContext)>,
}

impl GrayFrameWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Write the grayscale rendition of `frame` to `path`.
    pub(crate) fn write(&mut self, frame: &VideoFrame, path: &Path) -> Result<(), AvPipesError> {
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return Err(AvPipesError::VideoDecodeError(
                "decoded frame has no dimensions".to_string(),
            ));
        }

        let luma = if has_luma_plane(frame.format()) {
            frame_plane_to_buffer(frame, 0, width as usize, height as usize)
        } else {
            let gray = self.convert(frame)?;
            frame_plane_to_buffer(&gray, 0, width as usize, height as usize)
        };

        write_pgm(path, width, height, &luma)
    }

    fn convert(&mut self, frame: &VideoFrame) -> Result<VideoFrame, AvPipesError> {
        let key = (frame.format(), frame.width(), frame.height());
        let stale = !matches!(
            &self.scaler,
            Some((format, width, height, _)) if (*format, *width, *height) == key
        );
        if stale {
            log::debug!(
                "Converting {:?} {}x{} frames to GRAY8",
                key.0, key.1, key.2,
            );
            let context = ScalingContext::get(
                key.0,
                key.1,
                key.2,
                Pixel::GRAY8,
                key.1,
                key.2,
                ScalingFlags::BILINEAR,
            )
            .map_err(|error| {
                AvPipesError::VideoDecodeError(format!("cannot create gray converter: {error}"))
            })?;
            self.scaler = Some((key.0, key.1, key.2, context));
        }

        let mut gray = VideoFrame::empty();
        if let Some((_, _, _, scaler)) = self.scaler.as_mut() {
            scaler.run(frame, &mut gray).map_err(|error| {
                AvPipesError::VideoDecodeError(format!("gray conversion failed: {error}"))
            })?;
        }
        Ok(gray)
    }
}
