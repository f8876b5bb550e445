//! End-to-end smoke tests: spawn the binary against real processes.

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_toptrack_cli");
    Command::new(exe).args(args).output().expect("run toptrack_cli")
}

#[test]
fn one_tick_of_json_output() {
    let output = run(&["--by", "mem", "--interval", "0.5", "--ticks", "1", "--json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next().expect("one snapshot line");
    assert!(line.contains("\"seq\""), "not a snapshot: {line}");
    assert!(line.contains("\"entries\""), "not a snapshot: {line}");
}

#[test]
fn disk_io_mode_emits_a_snapshot() {
    let output = run(&["--by", "io", "--interval", "0.5", "--ticks", "1"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().next().unwrap_or("").starts_with("# seq"));
}

#[test]
fn help_exits_cleanly() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("USAGE"));
}

#[test]
fn unknown_flag_is_an_error() {
    let output = run(&["--bogus"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown flag"));
}
