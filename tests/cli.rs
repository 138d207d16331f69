//! Binary argument handling and exit codes.

use std::process::{Command, Output};

fn run(binary: &str, args: &[&str]) -> Output {
    Command::new(binary)
        .args(args)
        .output()
        .expect("failed to spawn binary")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn media_info_requires_input() {
    let output = run(env!("CARGO_BIN_EXE_media-info"), &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Usage"), "stderr: {}", stderr(&output));
}

#[test]
fn simple_decoder_requires_input() {
    let output = run(env!("CARGO_BIN_EXE_simple-decoder"), &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Usage"), "stderr: {}", stderr(&output));
}

#[test]
fn every_binary_prints_help() {
    for binary in [
        env!("CARGO_BIN_EXE_media-info"),
        env!("CARGO_BIN_EXE_simple-decoder"),
        env!("CARGO_BIN_EXE_simple-encoder"),
    ] {
        let output = run(binary, &["--help"]);
        assert!(output.status.success(), "{binary} --help failed");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("--log-level"), "{binary}: {stdout}");
        assert!(stdout.contains("Examples:"), "{binary}: {stdout}");
    }
}

#[test]
fn rejects_unknown_log_level() {
    let output = run(
        env!("CARGO_BIN_EXE_media-info"),
        &["input.mp4", "--log-level", "shouty"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("shouty"));
}

#[test]
fn media_info_missing_file_exits_with_error() {
    let output = run(
        env!("CARGO_BIN_EXE_media-info"),
        &["/nonexistent/input.mp4", "--log-level", "quiet"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error:"));
}

#[test]
fn simple_decoder_rejects_zero_frames() {
    let output = run(
        env!("CARGO_BIN_EXE_simple-decoder"),
        &["input.mp4", "--frames", "0"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--frames"));
}

#[test]
fn simple_encoder_unknown_encoder_exits_with_error() {
    let directory = tempfile::tempdir().expect("temp dir");
    let target = directory.path().join("out.mp4");
    let output = run(
        env!("CARGO_BIN_EXE_simple-encoder"),
        &[
            target.to_str().expect("utf-8 path"),
            "--encoder",
            "no-such-encoder",
            "--log-level",
            "quiet",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no-such-encoder"));
    assert!(!target.exists());
}

#[test]
fn simple_encoder_then_decoder_round_trip() {
    let directory = tempfile::tempdir().expect("temp dir");
    let video = directory.path().join("pattern.mkv");
    let video_arg = video.to_str().expect("utf-8 path");

    let encoded = run(
        env!("CARGO_BIN_EXE_simple-encoder"),
        &[
            video_arg, "--encoder", "mpeg4", "--width", "64", "--height", "48", "--frames",
            "8", "--log-level", "quiet",
        ],
    );
    if !encoded.status.success() {
        eprintln!("Skipping: encoder run failed: {}", stderr(&encoded));
        return;
    }

    let frames = directory.path().join("frames");
    let decoded = run(
        env!("CARGO_BIN_EXE_simple-decoder"),
        &[
            video_arg,
            "--out-dir",
            frames.to_str().expect("utf-8 path"),
            "--log-level",
            "quiet",
        ],
    );
    assert!(decoded.status.success(), "stderr: {}", stderr(&decoded));
    for index in 0..5 {
        assert!(frames.join(format!("frame-{index}.pgm")).exists());
    }

    let info = run(
        env!("CARGO_BIN_EXE_media-info"),
        &[video_arg, "--json", "--log-level", "quiet"],
    );
    assert!(info.status.success(), "stderr: {}", stderr(&info));
    let payload: serde_json::Value =
        serde_json::from_slice(&info.stdout).expect("json summary on stdout");
    assert!(payload["start_time_seconds"].is_number(), "payload: {payload}");
    assert_eq!(payload["streams"][0]["width"], 64);
}
