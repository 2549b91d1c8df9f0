use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BOOTSTRAP_BLOCK: &str = "begin_data\ntime -1.0\nend_data\n";

#[test]
fn first_invocation_writes_bootstrap_control_file() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_cli_command(temp.path(), &[]);

    assert!(
        output.status.success(),
        "bootstrap run should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(read_control(temp.path()), BOOTSTRAP_BLOCK);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("solution file does not exist"),
        "bootstrap should be logged, stderr: {}",
        stderr
    );
}

#[test]
fn solution_file_drives_three_phase_excitation() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("solution.ctl"),
        "time 0.0005\nwindingEmf A 0.1\nwindingEmf B 0.2\nwindingEmf C 0.3\n",
    );

    let output = run_cli_command(temp.path(), &["run"]);

    assert!(
        output.status.success(),
        "run should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let control = read_control(temp.path());
    let lines = control.lines().collect::<Vec<_>>();
    assert_eq!(lines.first(), Some(&"begin_data"));
    assert_eq!(lines.get(1), Some(&"time 0.0005"));
    assert_eq!(lines.last(), Some(&"end_data"));
    assert_eq!(lines.len(), 2 + 3 * 3 + 1);

    let sources = lines
        .iter()
        .filter_map(|line| line.strip_prefix("windingSrc "))
        .map(|rest| {
            let (name, value) = rest.split_once(' ').expect("source line has name and value");
            (name, value.parse::<f64>().expect("source should be numeric"))
        })
        .collect::<Vec<_>>();
    assert_eq!(
        sources.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        vec!["A", "B", "C"]
    );
    assert!(sources[0].1.abs() < 1e-9);
    assert!((sources[1].1 + 21.116_290_886_061_886).abs() < 1e-9);
    assert!((sources[2].1 - 21.116_290_886_061_88).abs() < 1e-9);
    assert!(control.contains("windingR B 0.1\n"));
    assert!(control.contains("windingL C 0.0\n"));
}

#[test]
fn missing_time_fails_with_input_category() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("solution.ctl"), "");

    let output = run_cli_command(temp.path(), &[]);

    assert_eq!(
        output.status.code(),
        Some(2),
        "empty solution should fail, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [INPUT.SOLUTION_MISSING_KEY]"), "stderr: {}", stderr);
    assert!(stderr.contains("FATAL EXIT CODE: 2"), "stderr: {}", stderr);
    assert!(!temp.path().join("user.ctl").exists());
}

#[test]
fn non_numeric_time_fails() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("solution.ctl"), "time soon\n");

    let output = run_cli_command(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.SOLUTION_TIME_PARSE"));
}

#[test]
fn custom_paths_and_config_are_honoured() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("step.sol"),
        "time 0.01\nwindingEmf U 0\nwindingEmf V 0\n",
    );
    write_file(
        &temp.path().join("machine.json"),
        r#"{ "winding_resistance": 0.25, "winding_inductance": 0.001 }"#,
    );

    let output = run_cli_command(
        temp.path(),
        &[
            "--config",
            "machine.json",
            "run",
            "--solution",
            "step.sol",
            "--output",
            "next.ctl",
        ],
    );

    assert!(
        output.status.success(),
        "run should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let control =
        fs::read_to_string(temp.path().join("next.ctl")).expect("custom output should exist");
    assert!(control.contains("windingR U 0.25\n"));
    assert!(control.contains("windingL V 0.001\n"));
    assert!(!temp.path().join("user.ctl").exists());
}

#[test]
fn log_file_receives_records_instead_of_stderr() {
    let temp = TempDir::new().expect("tempdir should be created");
    let log_path = temp.path().join("control.log");

    let output = run_cli_command(temp.path(), &["--log-file", "control.log"]);

    assert!(output.status.success());
    let log = fs::read_to_string(&log_path).expect("log file should exist");
    assert!(log.contains("control file written"), "log: {}", log);
    assert!(
        !String::from_utf8_lossy(&output.stderr).contains("control file written"),
        "records should not reach stderr"
    );
}

#[test]
fn show_config_prints_derived_constants() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_cli_command(temp.path(), &["show-config"]);

    assert!(output.status.success());
    let parsed: Value =
        serde_json::from_slice(&output.stdout).expect("show-config should print JSON");
    assert_eq!(parsed["freq"], 2000.0);
    assert_eq!(parsed["turns"], 29);
    let imax = parsed["imax"].as_f64().expect("imax should be numeric");
    assert!((imax - 24.382_992_454_708_54).abs() < 1e-9);
    assert!(!temp.path().join("user.ctl").exists());
}

#[test]
fn broken_config_fails_before_writing() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("machine.json"), "{ not json");

    let output = run_cli_command(temp.path(), &["--config", "machine.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.MACHINE_CONFIG_PARSE"));
    assert!(!temp.path().join("user.ctl").exists());
}

#[test]
fn unknown_flag_is_usage_error() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_cli_command(temp.path(), &["--frobnicate"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.CLI_USAGE"));
}

fn run_cli_command(working_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ctlprog"))
        .current_dir(working_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("ctlprog should launch")
}

fn read_control(working_dir: &Path) -> String {
    fs::read_to_string(working_dir.join("user.ctl")).expect("control file should exist")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("fixture should be written");
}
