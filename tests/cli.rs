use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn brc_stats(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_brc-stats"))
        .args(args)
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn missing_input_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let out = brc_stats(&dir, &["absent.txt", "out.txt"]);
    assert!(!out.status.success());
    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn empty_input_exits_zero_with_empty_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.txt"), "").unwrap();
    let runs: [(&[&str], &str); 2] = [
        (&["in.txt", "out.txt"], "out.txt"),
        (&["aggregate", "in.txt", "out-mmap.txt", "--mmap"], "out-mmap.txt"),
    ];
    for (args, output) in runs {
        let out = brc_stats(&dir, args);
        assert!(out.status.success(), "{args:?}");
        assert_eq!(fs::read(dir.path().join(output)).unwrap(), b"");
    }
}

#[test]
fn default_paths_are_used_without_arguments() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("test_sample.txt"), "London;10\nLondon;30\nbad\n").unwrap();
    let out = brc_stats(&dir, &[]);
    assert!(out.status.success());
    let written = fs::read_to_string(dir.path().join("test_sample_results_calculated.txt")).unwrap();
    assert_eq!(written, "London;20.000000;10.000000;30.000000\n");
}

#[test]
fn unwritable_output_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.txt"), "a;1\n").unwrap();
    let out = brc_stats(&dir, &["in.txt", "missing-dir/out.txt"]);
    assert!(!out.status.success());
}

#[test]
fn unknown_flag_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.txt"), "a;1\n").unwrap();
    let out = brc_stats(&dir, &["in.txt", "out.txt", "--bogus"]);
    assert!(!out.status.success());
}

#[test]
fn generate_then_evaluate_succeeds() {
    let dir = TempDir::new().unwrap();
    let generated = brc_stats(&dir, &["generate", "sample.txt", "truth.txt", "20"]);
    assert!(generated.status.success());
    let aggregated = brc_stats(&dir, &["sample.txt", "calculated.txt"]);
    assert!(aggregated.status.success());

    let evaluated = brc_stats(&dir, &["evaluate", "truth.txt", "calculated.txt"]);
    assert!(evaluated.status.success());
    assert!(String::from_utf8_lossy(&evaluated.stdout).contains("Success"));
}

#[test]
fn evaluate_reports_mismatch() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("truth.txt"), "a;1;0;2\nb;5;5;5\n").unwrap();
    fs::write(dir.path().join("calc.txt"), "a;1;0;2\n").unwrap();
    let out = brc_stats(&dir, &["evaluate", "truth.txt", "calc.txt"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("city: b"));
    assert!(stdout.ends_with("Fail\n"));
}
