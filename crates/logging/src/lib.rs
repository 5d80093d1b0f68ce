#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a leveled, contextual logging facade. For every call it
//! decides whether the record is emitted under the severity threshold and the
//! verbosity threshold, which sink receives it, which call site it is
//! attributed to, and whether the process terminates afterwards.
//!
//! # Design
//!
//! [`Logging`] bundles the [`Settings`] store and the [`ExitCoordinator`].
//! The process-wide instance is reached through [`logging()`] and the free
//! functions ([`info()`], [`warningf()`], [`v()`], ...) and macros (`info!`,
//! `errorf!`, ...) that wrap it; tests create their own instances.
//!
//! - Gating happens before formatting for every call family, so suppressed
//!   calls never render their operands.
//! - Loggers are resolved per call: a logger carried by a [`Context`] when
//!   contextual logging is enabled, the lazily built global sink otherwise.
//! - Entry points are `#[track_caller]` and add [`CALL_DEPTH_OFFSET`] to the
//!   caller-supplied depth, so `info(..)` and `info_depth(0, ..)` are
//!   indistinguishable to the sink. A wrapper that calls `info_depth(1, ..)`
//!   has its records attributed to the wrapper's own caller.
//! - INFO records go to [`LogSink::info`](logging_sink::LogSink::info); all
//!   others go to [`LogSink::error`](logging_sink::LogSink::error).
//! - FATAL records flush the sink within a bounded time and exit with status
//!   255; exit calls skip the stack dump and exit with status 1.
//!
//! # Examples
//!
//! ```
//! use logging::{Context, Logging};
//! use logging_sink::{Logger, Severity, TracingSink, kvs};
//!
//! let logging = Logging::new();
//! logging.settings().set_sink(Logger::new(TracingSink::new(std::io::sink())));
//! logging.settings().set_severity_threshold(Severity::Warning);
//!
//! logging.global().info(&[&"suppressed"]);
//! logging.global().warningf(format_args!("disk {}% full", 91));
//!
//! let ctx = logging.new_context(&Context::new(), logging.background().with_name("worker"));
//! logging.leveled(&ctx).error_s(None, "sync failed", &kvs!["attempt" => 3]);
//!
//! if logging.v(2).enabled() {
//!     logging.v(2).info_s("expensive detail", &[]);
//! }
//! ```

mod config;
mod context;
mod dispatch;
mod error;
mod exit;
mod global;
mod leveled;
mod macros;
mod settings;
mod verbose;
mod verbosity;

pub use config::LogConfig;
pub use context::Context;
pub use dispatch::Logging;
pub use error::ConfigError;
pub use exit::{
    DEFAULT_FLUSH_TIMEOUT, ExitCoordinator, ExitFn, FATAL_EXIT_CODE, FlushOutcome,
    NO_STACK_EXIT_CODE, timeout_flush,
};
pub use global::{
    background, clear_sink, configure, error, error_depth, error_s, error_s_depth, errorf,
    errorf_depth, errorln, errorln_depth, exit, exit_depth, exitf, exitf_depth, exitln,
    exitln_depth, fatal, fatal_depth, fatalf, fatalf_depth, fatalln, fatalln_depth, flush,
    flush_and_exit, from_context, global_sink, info, info_depth, info_s, info_s_depth, infof,
    infof_depth, infoln, infoln_depth, leveled, logger_with_name, logger_with_values, logging,
    new_context, resolve, set_file, set_file_max_age_days, set_file_max_backups,
    set_file_max_size_mb, set_flush_timeout, set_severity_threshold, set_severity_threshold_str,
    set_sink, set_verbosity, set_verbosity_str, switch_contextual, todo, v, warning,
    warning_depth, warningf, warningf_depth, warningln, warningln_depth,
};
pub use leveled::Leveled;
pub use logging_sink::{CALL_DEPTH_OFFSET, CallSite, KeyValue, Logger, Severity, kvs};
pub use settings::{Settings, SinkFactory};
pub use verbose::Verbose;
pub use verbosity::Level;
