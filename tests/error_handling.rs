//! Error path tests: bad inputs, unknown encoders, rejected options.

use std::io::Write;

use avpipes::{
    AvPipesError, DecoderOptions, EncoderOptions, FfmpegLogLevel, FrameExtractor, MediaProbe,
    VideoSynthesizer,
};

fn quiet() {
    avpipes::set_ffmpeg_log_level(FfmpegLogLevel::Quiet);
}

// ── Opening inputs ───────────────────────────────────────────────

#[test]
fn probe_nonexistent_file() {
    quiet();
    let result = MediaProbe::open("/nonexistent/path/to/video.mp4");
    let error = result.err().expect("open should fail");
    assert!(matches!(error, AvPipesError::FileOpen { .. }));
    assert!(error.to_string().contains("Failed to open media file"));
}

#[test]
fn probe_garbage_file() {
    quiet();
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(&[0x13, 0x37, 0x00, 0xff].repeat(64))
        .expect("write garbage");

    assert!(MediaProbe::open(file.path()).is_err());
}

#[test]
fn decoder_nonexistent_file_writes_nothing() {
    quiet();
    let directory = tempfile::tempdir().expect("temp dir");
    let extractor =
        FrameExtractor::new(DecoderOptions::new().with_output_directory(directory.path()));

    let error = extractor
        .run(directory.path().join("missing.mp4"))
        .err()
        .expect("decode should fail");
    assert!(matches!(error, AvPipesError::FileOpen { .. }));
    assert_eq!(std::fs::read_dir(directory.path()).expect("list").count(), 0);
}

// ── Encoder lookup ───────────────────────────────────────────────

#[test]
fn unknown_encoder_leaves_no_output() {
    quiet();
    let directory = tempfile::tempdir().expect("temp dir");
    let output = directory.path().join("never.mp4");
    let options = EncoderOptions::new()
        .with_output(&output)
        .with_resolution(64, 48)
        .with_total_frames(2)
        .with_encoder("definitely-not-an-encoder");

    let error = VideoSynthesizer::new(options).run().err().expect("should fail");
    match error {
        AvPipesError::EncoderNotFound(name) => assert_eq!(name, "definitely-not-an-encoder"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn unknown_container_extension_fails() {
    quiet();
    let directory = tempfile::tempdir().expect("temp dir");
    let options = EncoderOptions::new()
        .with_output(directory.path().join("pattern.notacontainer"))
        .with_resolution(64, 48)
        .with_total_frames(2)
        .with_encoder("mpeg4");

    match VideoSynthesizer::new(options).run() {
        Err(AvPipesError::EncoderNotFound(_)) => eprintln!("Skipping: mpeg4 not available"),
        Err(_) => {}
        Ok(report) => panic!("unexpected success: {report:?}"),
    }
}

// ── Option validation ────────────────────────────────────────────

#[test]
fn odd_resolution_rejected() {
    let options = EncoderOptions::new().with_resolution(641, 480);
    let error = VideoSynthesizer::new(options).run().err().expect("should fail");
    assert!(matches!(error, AvPipesError::InvalidOptions(_)));
}

#[test]
fn zero_frame_rate_rejected() {
    let options = EncoderOptions::new().with_frame_rate(0);
    let error = VideoSynthesizer::new(options).run().err().expect("should fail");
    assert!(matches!(error, AvPipesError::InvalidOptions(_)));
}

#[test]
fn zero_decoder_frames_rejected() {
    let extractor = FrameExtractor::new(DecoderOptions::new().with_max_frames(0));
    let error = extractor.run("unused.mp4").err().expect("should fail");
    assert!(matches!(error, AvPipesError::InvalidOptions(_)));
}
