//! Integration tests for the process-wide instance and its macros.
//!
//! All tests in this file share one process-wide facade, so each takes a
//! session lock and installs a fresh capture sink before logging.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use logging::{Context, LogConfig, Severity, kvs};
use logging_sink::testing::{CaptureSink, Route};

fn session() -> (MutexGuard<'static, ()>, CaptureSink) {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let guard = LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    logging::configure(&LogConfig::default());
    let sink = CaptureSink::new();
    logging::set_sink(sink.logger());
    (guard, sink)
}

// ============================================================================
// Free Function Tests
// ============================================================================

/// Verifies the free functions use the process-wide settings and sink.
#[test]
fn free_functions_reach_installed_sink() {
    let (_guard, sink) = session();

    logging::info(&[&"a", &1]);
    logging::warningln(&[&"b", &2]);
    logging::errorf(format_args!("c{}", 3));
    logging::info_s("d", &kvs!["k" => "v"]);
    logging::error_s(None, "e", &[]);

    let messages: Vec<_> = sink.records().into_iter().map(|r| r.message).collect();
    assert_eq!(messages, ["a1", "b 2\n", "c3", "d", "e"]);
}

/// Verifies the free setters drive the process-wide gates.
#[test]
fn free_setters_control_gating() {
    let (_guard, sink) = session();

    logging::set_severity_threshold(Severity::Error);
    logging::warning(&[&"dropped"]);
    logging::set_severity_threshold_str("INFO").expect("valid");
    logging::set_verbosity_str("1").expect("valid");
    logging::v(1).info(&[&"kept"]);
    logging::v(2).info(&[&"dropped"]);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "kept");
}

/// Verifies context helpers on the process-wide instance.
#[test]
fn free_context_helpers_resolve_loggers() {
    let (_guard, global) = session();
    let local = CaptureSink::new();

    let ctx = logging::new_context(&Context::new(), local.logger());
    logging::leveled(&ctx).info(&[&"local"]);
    logging::from_context(&ctx).info("direct", &[]);
    logging::background().info("background", &[]);

    logging::switch_contextual(false);
    logging::leveled(&ctx).info(&[&"global"]);
    logging::switch_contextual(true);

    assert_eq!(local.len(), 2);
    assert_eq!(global.len(), 2);
}

/// Verifies clearing the sink makes the next call build a default one.
#[test]
fn clear_sink_drops_installed_logger() {
    let (_guard, sink) = session();
    logging::set_severity_threshold(Severity::Fatal);

    logging::clear_sink();
    assert!(logging::logging().settings().current_sink().is_none());
    assert!(!logging::global_sink().same_sink(&sink.logger()));
    assert!(sink.is_empty());
}

// ============================================================================
// Macro Tests
// ============================================================================

/// Verifies the print, line and format macros render like their functions.
#[test]
fn macros_render_like_functions() {
    let (_guard, sink) = session();
    let pods = 3;

    logging::info!("pods=", pods);
    logging::infoln!("pods", pods);
    logging::infof!("pods={pods}");
    logging::warning!("w");
    logging::warningln!("w", "x");
    logging::warningf!("{}-{}", "w", 1);
    logging::error!();
    logging::errorln!("e");
    logging::errorf!("e{}", 2);

    let records = sink.records();
    let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        ["pods=3", "pods 3\n", "pods=3", "w", "w x\n", "w-1", "", "e\n", "e2"]
    );
    assert!(records[..3].iter().all(|r| r.route == Route::Info));
    assert!(records[3..].iter().all(|r| r.route == Route::Error));
}

/// Verifies macros report the caller's line.
#[test]
fn macros_report_caller_location() {
    let (_guard, sink) = session();

    let line = line!() + 1;
    logging::infof!("here");

    let record = &sink.records()[0];
    assert_eq!(record.file, file!());
    assert_eq!(record.line, line);
}
