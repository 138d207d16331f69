//! Frame synthesis and encoding.
//!
//! [`VideoSynthesizer`] paints a procedural test pattern (see
//! [`synth`](crate::synth)) into YUV420P frames, encodes them with an encoder
//! chosen by name, and muxes the packets into a container whose format is
//! guessed from the output file name.
//!
//! # Example
//!
//! ```no_run
//! use avpipes::{EncoderOptions, VideoSynthesizer};
//!
//! let report = VideoSynthesizer::new(
//!     EncoderOptions::new()
//!         .with_output("pattern.mkv")
//!         .with_total_frames(50),
//! )
//! .run()?;
//! println!("{} frames, {} packets", report.frames_encoded, report.packets_written);
//! # Ok::<(), avpipes::AvPipesError>(())
//! ```

use std::path::PathBuf;

use ffmpeg_next::codec::Id;
use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::codec::encoder::video::Encoder as VideoEncoder;
use ffmpeg_next::format::context::Output;
use ffmpeg_next::format::{Flags as FormatFlags, Pixel};
use ffmpeg_next::frame::Video as VideoFrame;
use ffmpeg_next::{Dictionary, Error as FfmpegError, Packet, Rational};

use crate::config::EncoderOptions;
use crate::error::AvPipesError;
use crate::progress::{OperationType, ProgressTracker};

/// Outcome of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    /// Container that was written.
    pub output: PathBuf,
    /// Frames handed to the encoder.
    pub frames_encoded: u64,
    /// Packets written to the container, including those flushed at the end.
    pub packets_written: u64,
}

/// Synthesizes a test pattern and encodes it to a video file.
///
/// Create via [`VideoSynthesizer::new`], then call
/// [`run`](VideoSynthesizer::run).
#[derive(Debug, Clone, Default)]
pub struct VideoSynthesizer {
    options: EncoderOptions,
}

impl VideoSynthesizer {
    /// Create a synthesizer with the given options.
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    /// Options this synthesizer runs with.
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encode `total_frames` pattern frames into the output file.
    ///
    /// The encoder is looked up before the output file is created, so a
    /// missing encoder leaves no empty file behind.
    ///
    /// # Errors
    ///
    /// - [`AvPipesError::InvalidOptions`] if the options are rejected.
    /// - [`AvPipesError::EncoderNotFound`] if FFmpeg has no encoder by that
    ///   name.
    /// - [`AvPipesError::VideoEncodeError`] if the encoder cannot be
    ///   configured, opened, or fed.
    /// - [`AvPipesError::VideoWriteError`] on container or I/O failure.
    pub fn run(&self) -> Result<EncodeReport, AvPipesError> {
        let options = &self.options;
        options.validate()?;
        crate::ffmpeg::initialize()?;

        log::info!(
            "Encoding {} frames of {}x{} @ {} fps to {} (encoder={})",
            options.total_frames,
            options.width,
            options.height,
            options.frame_rate,
            options.output.display(),
            options.encoder_name,
        );

        let codec = ffmpeg_next::encoder::find_by_name(&options.encoder_name)
            .ok_or_else(|| AvPipesError::EncoderNotFound(options.encoder_name.clone()))?;

        let mut output = ffmpeg_next::format::output(&options.output).map_err(|error| {
            AvPipesError::VideoWriteError(format!("could not create output context: {error}"))
        })?;

        // Checked before add_stream, which keeps `output` mutably borrowed.
        let needs_global_header = output.format().flags().contains(FormatFlags::GLOBAL_HEADER);

        let mut stream = output.add_stream(codec).map_err(|error| {
            AvPipesError::VideoWriteError(format!("failed allocating output stream: {error}"))
        })?;
        let stream_index = stream.index();

        let mut encoder = CodecContext::from_parameters(stream.parameters())
            .and_then(|context| context.encoder().video())
            .map_err(|error| {
                AvPipesError::VideoEncodeError(format!(
                    "could not allocate an encoding context: {error}"
                ))
            })?;

        let frame_rate = options.frame_rate as i32;
        let encoder_time_base = Rational::new(1, frame_rate);

        encoder.set_width(options.width);
        encoder.set_height(options.height);
        encoder.set_format(Pixel::YUV420P);
        encoder.set_time_base(encoder_time_base);
        encoder.set_frame_rate(Some(Rational::new(frame_rate, 1)));
        encoder.set_gop(options.gop_size);
        encoder.set_max_b_frames(options.max_b_frames);

        if needs_global_header {
            unsafe {
                (*encoder.as_mut_ptr()).flags |=
                    ffmpeg_sys_next::AV_CODEC_FLAG_GLOBAL_HEADER as i32;
            }
        }

        let mut codec_options = Dictionary::new();
        if codec.id() == Id::H264 {
            if let Some(preset) = &options.preset {
                codec_options.set("preset", preset);
            }
        }

        let mut encoder = encoder.open_as_with(codec, codec_options).map_err(|error| {
            AvPipesError::VideoEncodeError(format!("cannot open video encoder: {error}"))
        })?;

        stream.set_parameters(&encoder);
        stream.set_time_base(encoder_time_base);

        let url = options.output.to_string_lossy();
        ffmpeg_next::format::context::output::dump(&output, 0, Some(url.as_ref()));

        output.write_header().map_err(|error| {
            AvPipesError::VideoWriteError(format!(
                "error occurred when opening output file: {error}"
            ))
        })?;

        // The muxer may replace the stream time base while writing the header.
        let stream_time_base = output
            .stream(stream_index)
            .map(|stream| stream.time_base())
            .ok_or_else(|| {
                AvPipesError::VideoWriteError("output stream disappeared".to_string())
            })?;

        let mut sink = PacketSink {
            stream_index,
            encoder_time_base,
            stream_time_base,
            packets_written: 0,
        };
        let mut tracker = ProgressTracker::new(
            options.progress.clone(),
            OperationType::Encoding,
            Some(options.total_frames),
        );

        for frame_index in 0..options.total_frames {
            let mut frame = VideoFrame::new(Pixel::YUV420P, options.width, options.height);
            crate::synth::fill_frame(&mut frame, frame_index);
            frame.set_pts(Some(frame_index as i64));

            encoder.send_frame(&frame).map_err(|error| {
                AvPipesError::VideoEncodeError(format!(
                    "error sending a frame for encoding: {error}"
                ))
            })?;
            sink.drain(&mut encoder, &mut output)?;
            tracker.advance();
        }

        encoder.send_eof().map_err(|error| {
            AvPipesError::VideoEncodeError(format!("error flushing encoder: {error}"))
        })?;
        sink.drain(&mut encoder, &mut output)?;

        output.write_trailer().map_err(|error| {
            AvPipesError::VideoWriteError(format!("cannot write trailer: {error}"))
        })?;

        log::info!("Encode finished to {}", options.output.display());

        Ok(EncodeReport {
            output: options.output.clone(),
            frames_encoded: tracker.current(),
            packets_written: sink.packets_written,
        })
    }
}

/// Moves encoded packets from the encoder into the container.
struct PacketSink {
    stream_index: usize,
    encoder_time_base: Rational,
    stream_time_base: Rational,
    packets_written: u64,
}

impl PacketSink {
    fn drain(&mut self, encoder: &mut VideoEncoder, output: &mut Output) -> Result<(), AvPipesError> {
        loop {
            let mut packet = Packet::empty();
            match encoder.receive_packet(&mut packet) {
                Ok(()) => {
                    packet.rescale_ts(self.encoder_time_base, self.stream_time_base);
                    packet.set_stream(self.stream_index);
                    packet.write_interleaved(output).map_err(|error| {
                        AvPipesError::VideoWriteError(format!(
                            "error while writing output packet: {error}"
                        ))
                    })?;
                    self.packets_written += 1;
                }
                Err(FfmpegError::Eof) => return Ok(()),
                Err(FfmpegError::Other { errno }) if errno == ffmpeg_sys_next::EAGAIN as i32 => {
                    return Ok(());
                }
                Err(error) => {
                    return Err(AvPipesError::VideoEncodeError(format!(
                        "error during encoding: {error}"
                    )));
                }
            }
        }
    }
}
