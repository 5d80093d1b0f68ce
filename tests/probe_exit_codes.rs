//! Integration tests for process termination through the `xlog-probe` binary.
//!
//! FATAL and exit calls end the process, so their statuses, the bounded flush
//! and the emitted records can only be observed from a child process.

use std::time::{Duration, Instant};

use assert_cmd::Command;

fn probe() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xlog-probe"))
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Exit Status Tests
// ============================================================================

/// Verifies a FATAL record exits with status 255 after emitting the record.
#[test]
fn fatal_exits_with_255() {
    let assert = probe().args(["fatal", "disk", "gone"]).assert().code(255);

    let stderr = stderr_of(assert.get_output());
    assert!(stderr.contains("\"disk gone\""), "{stderr}");
    assert!(stderr.contains("severity=F"), "{stderr}");
}

/// Verifies an exit call exits with status 1 without a stack dump.
#[test]
fn exit_exits_with_1_without_stack() {
    let assert = probe().args(["exit", "bad", "flag"]).assert().code(1);

    let stderr = stderr_of(assert.get_output());
    assert!(stderr.contains("\"bad flag\""), "{stderr}");
    assert!(!stderr.contains("stack="), "{stderr}");
}

/// Verifies FATAL is emitted even when the threshold is FATAL.
#[test]
fn fatal_ignores_threshold() {
    let assert = probe()
        .args(["--severity", "FATAL", "fatal", "always"])
        .assert()
        .code(255);

    assert!(stderr_of(assert.get_output()).contains("\"always\""));
}

/// Verifies non-terminal records leave the process running to a clean exit.
#[test]
fn error_record_exits_cleanly() {
    let assert = probe().args(["error", "recoverable"]).assert().success();

    assert!(stderr_of(assert.get_output()).contains("\"recoverable\""));
}

// ============================================================================
// Flush Timeout Tests
// ============================================================================

/// Verifies a stalled flush is abandoned after the timeout with a diagnostic.
#[test]
fn stalled_flush_is_reported_and_abandoned() {
    let started = Instant::now();
    let assert = probe()
        .args([
            "--stall-flush-ms",
            "10000",
            "--flush-timeout-ms",
            "100",
            "fatal",
            "stalled",
        ])
        .assert()
        .code(255);
    let elapsed = started.elapsed();

    let stderr = stderr_of(assert.get_output());
    assert!(stderr.contains("Flush took longer than 100ms"), "{stderr}");
    assert!(elapsed < Duration::from_secs(5), "{elapsed:?}");
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Verifies records below the threshold are not written.
#[test]
fn severity_threshold_suppresses_records() {
    let assert = probe()
        .args(["--severity", "ERROR", "warning", "quiet"])
        .assert()
        .success();

    assert!(!stderr_of(assert.get_output()).contains("quiet"));
}

/// Verifies an unknown severity is reported as a usage error.
#[test]
fn invalid_severity_is_rejected() {
    let assert = probe()
        .args(["--severity", "LOUD", "info", "x"])
        .assert()
        .code(2);

    assert!(stderr_of(assert.get_output()).contains("LOUD"));
}

/// Verifies V-gated records follow the verbosity threshold.
#[test]
fn verbosity_gates_verbose_records() {
    let hidden = probe()
        .args(["verbose", "--level", "2", "detail"])
        .assert()
        .success();
    assert!(!stderr_of(hidden.get_output()).contains("detail"));

    let shown = probe()
        .args(["-v", "2", "verbose", "--level", "2", "detail"])
        .assert()
        .success();
    assert!(stderr_of(shown.get_output()).contains("\"detail\""));
}

/// Verifies a log file receives records, including the one before FATAL,
/// while standard error keeps receiving them too.
#[test]
fn log_file_receives_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("probe.log");
    let path_arg = path.to_str().expect("utf-8 path");

    probe()
        .args(["--log-file", path_arg, "structured", "synced", "--kv", "files=3"])
        .assert()
        .success();
    let assert = probe()
        .args(["--log-file", path_arg, "fatal", "halt"])
        .assert()
        .code(255);

    assert!(stderr_of(assert.get_output()).contains("\"halt\""));
    let contents = std::fs::read_to_string(&path).expect("log file");
    assert!(contents.contains("\"synced\" files=\"3\""), "{contents}");
    assert!(contents.contains("\"halt\""), "{contents}");
}
