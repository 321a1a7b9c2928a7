use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_thump_cli"))
}

fn temp_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("thump-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir.join(name)
}

fn synth(frequency: &str, decay_ms: &str, name: &str) -> PathBuf {
    let path = temp_file(name);
    let output = cli()
        .args([
            "synth",
            "--frequency",
            frequency,
            "--decay-ms",
            decay_ms,
            "--output",
            path.to_str().expect("utf-8 path"),
        ])
        .output()
        .expect("failed to run thump_cli synth");
    assert!(
        output.status.success(),
        "synth exited with {:?}",
        output.status.code()
    );
    path
}

fn report(output: &Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout UTF-8");
    serde_json::from_str(stdout.trim()).expect("analysis report JSON payload")
}

#[test]
fn analyze_wav_reports_ripe_thump() {
    let wav = synth("125", "1000", "ripe.wav");
    let output = cli()
        .args(["analyze-wav", "--input", wav.to_str().unwrap()])
        .output()
        .expect("failed to run analyze-wav");
    assert_eq!(output.status.code(), Some(0));

    let json = report(&output);
    assert_eq!(json["pipeline"], "buffer");
    assert_eq!(json["result"]["isRipe"], true);
    assert_eq!(json["result"]["outcome"], "classified");
    let frequency = json["result"]["frequency"].as_f64().unwrap_or_default();
    assert!((frequency - 125.0).abs() < 25.0, "frequency {frequency}");
}

#[test]
fn analyze_wav_strict_matches_permissive() {
    let wav = synth("125", "15", "dead.wav");
    let permissive = cli()
        .args(["analyze-wav", "--input", wav.to_str().unwrap()])
        .output()
        .expect("failed to run permissive analyze-wav");
    let strict = cli()
        .args(["analyze-wav", "--strict", "--input", wav.to_str().unwrap()])
        .output()
        .expect("failed to run strict analyze-wav");

    assert_eq!(permissive.status.code(), Some(0));
    assert_eq!(strict.status.code(), Some(0));
    let permissive = report(&permissive);
    assert_eq!(permissive["result"]["isRipe"], false);
    assert_eq!(permissive["result"], report(&strict)["result"]);
}

#[test]
fn analyze_wav_writes_output_file() {
    let wav = synth("125", "1000", "to-file.wav");
    let out = temp_file("report.json");
    let output = cli()
        .args([
            "analyze-wav",
            "--input",
            wav.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run analyze-wav with --output");
    assert!(output.status.success());

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!(json["result"]["confidence"].as_f64().is_some());
}

#[test]
fn analyze_wav_rejects_garbage_in_strict_mode() {
    let path = temp_file("garbage.wav");
    fs::write(&path, b"definitely not a wav file at all, just text").unwrap();
    let output = cli()
        .args(["analyze-wav", "--strict", "--input", path.to_str().unwrap()])
        .output()
        .expect("failed to run analyze-wav on garbage");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(stderr.contains("decoding"), "expected decode context, got {stderr}");
}

#[test]
fn analyze_metering_ripe_series() {
    let path = temp_file("ripe-metering.json");
    fs::write(&path, "[-40, -12, -10, -11, -13, -15, -18, -25, -40]").unwrap();
    let output = cli()
        .args(["analyze-metering", "--input", path.to_str().unwrap()])
        .output()
        .expect("failed to run analyze-metering");
    assert_eq!(output.status.code(), Some(0));

    let json = report(&output);
    assert_eq!(json["pipeline"], "metering");
    assert_eq!(json["result"]["frequency"], 125.0);
    assert_eq!(json["result"]["decayTime"], 250.0);
    assert_eq!(json["result"]["isRipe"], true);
}

#[test]
fn analyze_metering_silence_is_inconclusive() {
    let path = temp_file("silent-metering.json");
    fs::write(&path, "[-80, -80, -80, -80]").unwrap();
    let output = cli()
        .args(["analyze-metering", "--input", path.to_str().unwrap()])
        .output()
        .expect("failed to run analyze-metering on silence");
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(report(&output)["result"]["outcome"], "silence");
}

#[test]
fn analyze_metering_empty_series_fails() {
    let path = temp_file("empty-metering.json");
    fs::write(&path, "[]").unwrap();
    let output = cli()
        .args(["analyze-metering", "--input", path.to_str().unwrap()])
        .output()
        .expect("failed to run analyze-metering on empty input");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn config_poll_interval_applies() {
    let config = temp_file("slow-poll.json");
    fs::write(&config, r#"{"metering": {"poll_interval_ms": 100}}"#).unwrap();
    let readings = temp_file("slow-metering.json");
    fs::write(&readings, "[-10, -10, -10, -30]").unwrap();

    let output = cli()
        .args([
            "--config",
            config.to_str().unwrap(),
            "analyze-metering",
            "--input",
            readings.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run analyze-metering with config");
    assert_eq!(report(&output)["result"]["decayTime"], 300.0);
}
