//! Integration tests for the default sink and its file destination.
//!
//! These tests build sinks from [`SinkOptions`] the way the facade does when it
//! lazily constructs its default logger, then inspect what lands on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use logging_sink::{Logger, RotatingFile, Severity, SinkError, SinkOptions, build, kvs};
use proptest::prelude::*;

fn backups(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("app.log."))
        })
        .collect()
}

// ============================================================================
// File Destination Tests
// ============================================================================

/// Verifies records from every severity reach the configured file.
#[test]
fn file_sink_receives_all_severities() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let logger = build(&SinkOptions::file(&path)).expect("build");

    logger.info("starting", &kvs!["pid" => 42]);
    logger.error(None, "failed", &[]);
    logger.flush().expect("flush");

    let out = fs::read_to_string(&path).expect("read");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2, "{out}");
    assert!(lines[0].contains(r#""starting" pid="42""#));
    assert!(lines[1].contains(r#""failed""#));
    assert!(lines[1].contains("severity=E"));
}

/// Verifies the file sink appends instead of truncating.
#[test]
fn file_sink_appends_across_builds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");

    for message in ["one", "two"] {
        let logger = build(&SinkOptions::file(&path)).expect("build");
        logger.info(message, &[]);
        logger.flush().expect("flush");
    }

    let out = fs::read_to_string(&path).expect("read");
    assert_eq!(out.lines().count(), 2);
}

/// Verifies a path that cannot be created surfaces an open error.
#[test]
fn unopenable_path_reports_open_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").expect("seed");

    let err = build(&SinkOptions::file(blocker.join("app.log"))).unwrap_err();
    assert!(matches!(err, SinkError::Open { .. }), "{err}");
    assert!(err.to_string().contains("app.log"));
}

/// Verifies a stderr sink builds without touching the filesystem.
#[test]
fn stderr_options_build_a_logger() {
    let logger: Logger = build(&SinkOptions::stderr()).expect("build");
    assert_eq!(logger.call_depth(), 0);
}

// ============================================================================
// Rotation Tests
// ============================================================================

/// Verifies the file rolls over once the size limit is crossed, never splits
/// a record, and keeps only the configured number of backups.
#[test]
fn file_rotates_and_prunes_backups() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let options = SinkOptions {
        max_size_mb: 1,
        max_backups: 2,
        ..SinkOptions::file(&path)
    };
    let mut file = RotatingFile::open(&path, &options).expect("open");

    let mut record = "x".repeat(64 * 1024 - 1);
    record.push('\n');
    for _ in 0..60 {
        file.write_all(record.as_bytes()).expect("write");
    }
    file.flush().expect("flush");

    let rolled = backups(dir.path());
    assert_eq!(rolled.len(), 2, "{rolled:?}");
    assert!(fs::metadata(&path).expect("active").len() <= 1024 * 1024 + 64 * 1024);
    for backup in &rolled {
        let contents = fs::read_to_string(backup).expect("backup");
        assert!(contents.ends_with('\n'), "{} ends mid-record", backup.display());
        assert!(contents.len() > 1024 * 1024, "{} rolled early", backup.display());
    }
}

// ============================================================================
// Severity Parsing Properties
// ============================================================================

proptest! {
    /// Any casing of a canonical name parses to that severity.
    #[test]
    fn any_casing_of_a_name_parses(index in 0usize..4, mask in any::<u8>()) {
        let severity = Severity::ALL[index];
        let mixed: String = severity
            .name()
            .chars()
            .enumerate()
            .map(|(i, c)| if mask & (1 << (i % 8)) == 0 { c } else { c.to_ascii_lowercase() })
            .collect();
        prop_assert_eq!(Severity::by_name(&mixed), Some(severity));
        prop_assert_eq!(mixed.parse::<Severity>().ok(), Some(severity));
    }

    /// Ranks outside 0..=3 are rejected.
    #[test]
    fn out_of_range_ranks_are_rejected(rank in any::<i32>().prop_filter("outside", |r| !(0..=3).contains(r))) {
        prop_assert!(rank.to_string().parse::<Severity>().is_err());
    }
}
