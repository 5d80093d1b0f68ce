//! crates/logging/src/global.rs
//! The process-wide facade instance and free-function entry points.

use std::error::Error;
use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use logging_sink::{KeyValue, Logger, Severity};

use crate::config::LogConfig;
use crate::context::Context;
use crate::dispatch::Logging;
use crate::error::ConfigError;
use crate::leveled::Leveled;
use crate::verbose::Verbose;
use crate::verbosity::Level;

/// The process-wide facade instance.
pub fn logging() -> &'static Logging {
    static LOGGING: OnceLock<Logging> = OnceLock::new();
    LOGGING.get_or_init(Logging::new)
}

fn global() -> Leveled<'static> {
    logging().global()
}

/// Sets the verbosity threshold.
pub fn set_verbosity(level: impl Into<Level>) {
    logging().settings().set_verbosity(level);
}

/// Parses and sets the verbosity threshold.
///
/// # Errors
///
/// See [`Settings::set_verbosity_str`](crate::Settings::set_verbosity_str).
pub fn set_verbosity_str(value: &str) -> Result<(), ConfigError> {
    logging().settings().set_verbosity_str(value)
}

/// Sets the minimum severity that is emitted.
pub fn set_severity_threshold(severity: Severity) {
    logging().settings().set_severity_threshold(severity);
}

/// Parses and sets the severity threshold.
///
/// # Errors
///
/// See [`Settings::set_severity_threshold_str`](crate::Settings::set_severity_threshold_str).
pub fn set_severity_threshold_str(value: &str) -> Result<(), ConfigError> {
    logging().settings().set_severity_threshold_str(value)
}

/// Enables or disables contextual logging.
pub fn switch_contextual(enabled: bool) {
    logging().settings().switch_contextual(enabled);
}

/// Sets the default sink's log file; `None` selects standard error.
pub fn set_file(path: Option<PathBuf>) {
    logging().settings().set_file(path);
}

/// Sets the default sink's rotation size in megabytes.
pub fn set_file_max_size_mb(max_size_mb: u64) {
    logging().settings().set_file_max_size_mb(max_size_mb);
}

/// Sets the default sink's backup retention in days.
pub fn set_file_max_age_days(max_age_days: u64) {
    logging().settings().set_file_max_age_days(max_age_days);
}

/// Sets how many rotated files the default sink keeps.
pub fn set_file_max_backups(max_backups: usize) {
    logging().settings().set_file_max_backups(max_backups);
}

/// Applies `config` to the process-wide settings.
pub fn configure(config: &LogConfig) {
    logging().configure(config);
}

/// Installs `logger` as the global sink.
pub fn set_sink(logger: Logger) {
    logging().settings().set_sink(logger);
}

/// Drops the global sink; the next call builds a new default.
pub fn clear_sink() {
    logging().settings().clear_sink();
}

/// The global sink, built on first use.
pub fn global_sink() -> Logger {
    logging().settings().global_sink()
}

/// Sets how long FATAL and exit calls wait for the sink to flush.
pub fn set_flush_timeout(timeout: Duration) {
    logging().exit_coordinator().set_flush_timeout(timeout);
}

/// Flushes the installed sink, if any.
pub fn flush() -> io::Result<()> {
    logging().flush()
}

/// Flushes the global sink within `timeout`, then exits with `code`.
pub fn flush_and_exit(timeout: Duration, code: i32) -> ! {
    logging()
        .exit_coordinator()
        .flush_and_exit(&global_sink(), timeout, code)
}

/// Opens a verbosity gate on the process-wide instance.
#[must_use]
pub fn v(level: impl Into<Level>) -> Verbose<'static> {
    logging().v(level)
}

/// See [`Logging::resolve`].
pub fn resolve(supplied: Option<&Logger>) -> Logger {
    logging().resolve(supplied)
}

/// See [`Logging::new_context`].
#[must_use]
pub fn new_context(ctx: &Context, logger: Logger) -> Context {
    logging().new_context(ctx, logger)
}

/// See [`Logging::from_context`].
pub fn from_context(ctx: &Context) -> Logger {
    logging().from_context(ctx)
}

/// See [`Logging::background`].
pub fn background() -> Logger {
    logging().background()
}

/// See [`Logging::todo`].
pub fn todo() -> Logger {
    logging().todo()
}

/// See [`Logging::logger_with_values`].
#[must_use]
pub fn logger_with_values(logger: &Logger, key_values: &[KeyValue<'_>]) -> Logger {
    logging().logger_with_values(logger, key_values)
}

/// See [`Logging::logger_with_name`].
#[must_use]
pub fn logger_with_name(logger: &Logger, name: &str) -> Logger {
    logging().logger_with_name(logger, name)
}

/// Leveled calls through the logger carried by `ctx`.
#[must_use]
pub fn leveled(ctx: &Context) -> Leveled<'static> {
    logging().leveled(ctx)
}

macro_rules! global_family {
    ($($name:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            #[doc = concat!("Process-wide [`Leveled::", stringify!($name), "`].")]
            #[track_caller]
            pub fn $name($($arg: $ty),*) {
                global().$name($($arg),*);
            }
        )*
    };
}

macro_rules! global_terminal_family {
    ($($name:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            #[doc = concat!("Process-wide [`Leveled::", stringify!($name), "`].")]
            #[track_caller]
            pub fn $name($($arg: $ty),*) -> ! {
                global().$name($($arg),*)
            }
        )*
    };
}

global_family! {
    info(args: &[&dyn Display]);
    info_depth(depth: usize, args: &[&dyn Display]);
    infoln(args: &[&dyn Display]);
    infoln_depth(depth: usize, args: &[&dyn Display]);
    infof(args: fmt::Arguments<'_>);
    infof_depth(depth: usize, args: fmt::Arguments<'_>);
    info_s(message: &str, key_values: &[KeyValue<'_>]);
    info_s_depth(depth: usize, message: &str, key_values: &[KeyValue<'_>]);
    warning(args: &[&dyn Display]);
    warning_depth(depth: usize, args: &[&dyn Display]);
    warningln(args: &[&dyn Display]);
    warningln_depth(depth: usize, args: &[&dyn Display]);
    warningf(args: fmt::Arguments<'_>);
    warningf_depth(depth: usize, args: fmt::Arguments<'_>);
    error(args: &[&dyn Display]);
    error_depth(depth: usize, args: &[&dyn Display]);
    errorln(args: &[&dyn Display]);
    errorln_depth(depth: usize, args: &[&dyn Display]);
    errorf(args: fmt::Arguments<'_>);
    errorf_depth(depth: usize, args: fmt::Arguments<'_>);
    error_s(err: Option<&(dyn Error + 'static)>, message: &str, key_values: &[KeyValue<'_>]);
    error_s_depth(
        depth: usize,
        err: Option<&(dyn Error + 'static)>,
        message: &str,
        key_values: &[KeyValue<'_>]
    );
}

global_terminal_family! {
    fatal(args: &[&dyn Display]);
    fatal_depth(depth: usize, args: &[&dyn Display]);
    fatalln(args: &[&dyn Display]);
    fatalln_depth(depth: usize, args: &[&dyn Display]);
    fatalf(args: fmt::Arguments<'_>);
    fatalf_depth(depth: usize, args: fmt::Arguments<'_>);
    exit(args: &[&dyn Display]);
    exit_depth(depth: usize, args: &[&dyn Display]);
    exitln(args: &[&dyn Display]);
    exitln_depth(depth: usize, args: &[&dyn Display]);
    exitf(args: fmt::Arguments<'_>);
    exitf_depth(depth: usize, args: fmt::Arguments<'_>);
}
