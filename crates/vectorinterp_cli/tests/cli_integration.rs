//! End-to-end tests running the `vectorinterp` binary.

use approx::assert_relative_eq;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn vectorinterp(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vectorinterp"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("VECTORINTERP_LOG_LEVEL")
        .env_remove("VECTORINTERP_WORKERS")
        .env_remove("VECTORINTERP_EXTRAPOLATION")
        .args(args)
        .output()
        .expect("failed to run vectorinterp")
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

/// Data rows of a CSV output as parsed floats.
fn parse_rows(stdout: &[u8]) -> Vec<Vec<f64>> {
    String::from_utf8_lossy(stdout)
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(|v| v.trim().parse().unwrap()).collect())
        .collect()
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "series.csv", "x,y\n-10,1\n-5,0\n0,1\n6,0\n12,-1\n");
    write(dir.path(), "queries.csv", "x\n-7.5\n3\n9\n");
    dir
}

// ========================================
// resample
// ========================================

#[test]
fn test_resample_linear_to_stdout() {
    let dir = setup();
    let out = vectorinterp(dir.path(), &["resample", "-i", "series.csv", "-q", "queries.csv"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("x,y"));
    let rows = parse_rows(&out.stdout);
    assert_eq!(rows.len(), 3);
    assert_relative_eq!(rows[0][1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(rows[1][1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(rows[2][1], -0.5, epsilon = 1e-12);
}

#[test]
fn test_resample_akima_to_file() {
    let dir = setup();
    let out = vectorinterp(
        dir.path(),
        &["resample", "-i", "series.csv", "-q", "queries.csv", "-k", "akima", "-o", "out.csv"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let written = std::fs::read(dir.path().join("out.csv")).unwrap();
    let rows = parse_rows(&written);
    assert_relative_eq!(rows[0][1], 0.26848591549, epsilon = 1e-9);
    assert_relative_eq!(rows[1][1], 0.58088235294, epsilon = 1e-9);
    assert_relative_eq!(rows[2][1], -0.5, epsilon = 1e-9);
}

#[test]
fn test_resample_fail_mode_exits_with_error() {
    let dir = setup();
    write(dir.path(), "outside.csv", "x\n20\n");
    let out = vectorinterp(
        dir.path(),
        &["-e", "fail", "resample", "-i", "series.csv", "-q", "outside.csv"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("outside"));
}

#[test]
fn test_resample_extrapolates_by_default() {
    let dir = setup();
    write(dir.path(), "outside.csv", "x\n15\n");
    let out = vectorinterp(dir.path(), &["resample", "-i", "series.csv", "-q", "outside.csv"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_relative_eq!(parse_rows(&out.stdout)[0][1], -1.5, epsilon = 1e-12);
}

#[test]
fn test_resample_extrapolation_flag() {
    let dir = setup();
    write(dir.path(), "outside.csv", "x\n20\n");
    let out = vectorinterp(
        dir.path(),
        &["-e", "nearest", "resample", "-i", "series.csv", "-q", "outside.csv"],
    );
    assert!(out.status.success());
    assert_relative_eq!(parse_rows(&out.stdout)[0][1], -1.0);
}

#[test]
fn test_resample_slerp() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "attitude.csv", "x,yaw,pitch,roll\n0,10,0,0\n10,50,0,0\n");
    write(dir.path(), "queries.csv", "x\n5\n");
    let out = vectorinterp(
        dir.path(),
        &["resample", "-i", "attitude.csv", "-q", "queries.csv", "-k", "slerp"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert!(String::from_utf8_lossy(&out.stdout).starts_with("x,yaw,pitch,roll"));
    let row = &parse_rows(&out.stdout)[0];
    assert_relative_eq!(row[1], 30.0, epsilon = 1e-9);
    assert_relative_eq!(row[2], 0.0, epsilon = 1e-9);
}

#[test]
fn test_resample_missing_input() {
    let dir = setup();
    let out = vectorinterp(dir.path(), &["resample", "-i", "missing.csv", "-q", "queries.csv"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));
}

// ========================================
// sample / check
// ========================================

#[test]
fn test_sample_prints_kept_values() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "times.csv", "x\n0\n0.4\n1\n1.3\n2.1\n10\n10.2\n11\n");
    let out = vectorinterp(
        dir.path(),
        &["sample", "-i", "times.csv", "--interval", "1", "--max-gap", "5"],
    );
    assert!(out.status.success());
    let values: Vec<f64> = String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(values, vec![0.0, 1.0, 2.1, 10.0, 11.0]);
}

#[test]
fn test_sample_sections() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "times.csv", "x\n0\n1\n2\n10\n11\n");
    let out = vectorinterp(dir.path(), &["sample", "-i", "times.csv", "--max-gap", "5", "--sections"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "0,2\n10,11");
}

#[test]
fn test_check_uses_config_file_and_env() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "vectorinterp.toml", "extrapolation_mode = \"nearest\"\nworkers = 3\n");

    let out = vectorinterp(dir.path(), &["check"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("extrapolation_mode = \"nearest\""));
    assert!(stdout.contains("parallel workers: 3"));

    let out = Command::new(env!("CARGO_BIN_EXE_vectorinterp"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("VECTORINTERP_EXTRAPOLATION", "extrapolate")
        .args(["check", "-w", "2"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("extrapolation_mode = \"extrapolate\""));
    assert!(stdout.contains("parallel workers: 2"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.toml", "log_level = \"loud\"\nmax_gap = -1.0\n");
    let out = vectorinterp(dir.path(), &["-c", "bad.toml", "check"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("log_level"));
    assert!(stderr.contains("max_gap"));
}
