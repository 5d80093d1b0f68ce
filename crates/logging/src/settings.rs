//! crates/logging/src/settings.rs
//! Process-wide thresholds, the contextual toggle and the active sink.
//!
//! Numeric settings live in atomics and may be read and written from any
//! thread. The sink lives in an `RwLock<Arc<OnceLock<Logger>>>`: readers clone
//! the inner `Arc` and run [`OnceLock::get_or_init`], so the default sink is
//! built exactly once per installed cell even when many threads log at once.
//! [`Settings::set_sink`] and [`Settings::clear_sink`] swap the cell; a call
//! racing with a swap may still use the previous sink.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

use logging_sink::{Logger, Severity, SinkError, SinkOptions, TracingSink};

use crate::config::LogConfig;
use crate::error::ConfigError;
use crate::verbosity::Level;

/// Builds the default sink from the current [`SinkOptions`].
pub type SinkFactory = Arc<dyn Fn(&SinkOptions) -> Result<Logger, SinkError> + Send + Sync>;

/// Mutable facade settings.
pub struct Settings {
    severity: AtomicI32,
    verbosity: AtomicI32,
    contextual: AtomicBool,
    options: Mutex<SinkOptions>,
    sink: RwLock<Arc<OnceLock<Logger>>>,
    factory: SinkFactory,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Settings whose default sink is [`logging_sink::build`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink_factory(logging_sink::build)
    }

    /// Settings whose default sink is produced by `factory`.
    ///
    /// The factory runs at most once per installed sink cell, the first time a
    /// logger is needed after construction or [`clear_sink`](Self::clear_sink).
    pub fn with_sink_factory<F>(factory: F) -> Self
    where
        F: Fn(&SinkOptions) -> Result<Logger, SinkError> + Send + Sync + 'static,
    {
        let defaults = LogConfig::default();
        Self {
            severity: AtomicI32::new(defaults.severity.rank()),
            verbosity: AtomicI32::new(defaults.verbosity.0),
            contextual: AtomicBool::new(defaults.contextual),
            options: Mutex::new(defaults.sink),
            sink: RwLock::new(Arc::new(OnceLock::new())),
            factory: Arc::new(factory),
        }
    }

    /// Current verbosity threshold.
    #[must_use]
    pub fn verbosity(&self) -> Level {
        Level(self.verbosity.load(Ordering::Relaxed))
    }

    /// Sets the verbosity threshold.
    pub fn set_verbosity(&self, level: impl Into<Level>) {
        self.verbosity.store(level.into().0, Ordering::Relaxed);
    }

    /// Parses and sets the verbosity threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Verbosity`] and leaves the threshold unchanged
    /// when `value` is not a signed integer.
    pub fn set_verbosity_str(&self, value: &str) -> Result<(), ConfigError> {
        let level: Level = value.parse()?;
        self.set_verbosity(level);
        Ok(())
    }

    /// Reports whether a `V(level)` call is enabled.
    #[must_use]
    pub fn verbosity_enabled(&self, level: Level) -> bool {
        self.verbosity().admits(level)
    }

    /// Current severity threshold.
    #[must_use]
    pub fn severity_threshold(&self) -> Severity {
        Severity::from_rank(self.severity.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Sets the minimum severity that is emitted.
    pub fn set_severity_threshold(&self, severity: Severity) {
        self.severity.store(severity.rank(), Ordering::Relaxed);
    }

    /// Parses and sets the severity threshold from a name or rank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Severity`] and leaves the threshold unchanged
    /// when `value` names no severity.
    pub fn set_severity_threshold_str(&self, value: &str) -> Result<(), ConfigError> {
        let severity: Severity = value.parse()?;
        self.set_severity_threshold(severity);
        Ok(())
    }

    /// Reports whether a call at `severity` passes the threshold.
    #[must_use]
    pub fn severity_enabled(&self, severity: Severity) -> bool {
        severity.rank() >= self.severity.load(Ordering::Relaxed)
    }

    /// Whether loggers carried by a context are honored.
    #[must_use]
    pub fn contextual(&self) -> bool {
        self.contextual.load(Ordering::Relaxed)
    }

    /// Enables or disables contextual logging.
    pub fn switch_contextual(&self, enabled: bool) {
        self.contextual.store(enabled, Ordering::Relaxed);
    }

    fn options(&self) -> MutexGuard<'_, SinkOptions> {
        self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the options the next default sink will be built with.
    #[must_use]
    pub fn sink_options(&self) -> SinkOptions {
        self.options().clone()
    }

    /// Sets the log file path; `None` selects standard error.
    pub fn set_file(&self, path: Option<PathBuf>) {
        self.options().path = path;
    }

    /// Sets the size in megabytes at which the log file rotates.
    pub fn set_file_max_size_mb(&self, max_size_mb: u64) {
        self.options().max_size_mb = max_size_mb;
    }

    /// Sets the age in days after which rotated files are removed.
    pub fn set_file_max_age_days(&self, max_age_days: u64) {
        self.options().max_age_days = max_age_days;
    }

    /// Sets how many rotated files are kept.
    pub fn set_file_max_backups(&self, max_backups: usize) {
        self.options().max_backups = max_backups;
    }

    /// Applies every field of `config`.
    ///
    /// The update holds the options lock throughout so concurrent `apply`
    /// calls do not interleave.
    pub fn apply(&self, config: &LogConfig) {
        let mut options = self.options();
        self.set_verbosity(config.verbosity);
        self.set_severity_threshold(config.severity);
        self.switch_contextual(config.contextual);
        options.clone_from(&config.sink);
        drop(options);
        tracing::debug!(
            target: "xlog::settings",
            verbosity = %config.verbosity,
            severity = %config.severity,
            contextual = config.contextual,
            "configuration applied"
        );
    }

    /// Installs `logger` as the global sink, replacing any previous one.
    pub fn set_sink(&self, logger: Logger) {
        self.swap_cell(OnceLock::from(logger));
        tracing::debug!(target: "xlog::settings", "global sink installed");
    }

    /// Drops the global sink; the next logging call builds a new default.
    pub fn clear_sink(&self) {
        self.swap_cell(OnceLock::new());
        tracing::debug!(target: "xlog::settings", "global sink cleared");
    }

    fn swap_cell(&self, cell: OnceLock<Logger>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(cell);
    }

    fn cell(&self) -> Arc<OnceLock<Logger>> {
        Arc::clone(&self.sink.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// The installed sink, without constructing a default one.
    #[must_use]
    pub fn current_sink(&self) -> Option<Logger> {
        self.cell().get().cloned()
    }

    /// The global sink, building the default on first use.
    ///
    /// Concurrent first callers block until construction finishes and all
    /// observe the same instance.
    pub fn global_sink(&self) -> Logger {
        self.cell().get_or_init(|| self.build_default()).clone()
    }

    fn build_default(&self) -> Logger {
        let options = self.sink_options();
        match (self.factory)(&options) {
            Ok(logger) => {
                tracing::debug!(
                    target: "xlog::settings",
                    path = ?options.path,
                    "default sink constructed"
                );
                logger
            }
            Err(err) => {
                let _ = writeln!(io::stderr(), "xlog: {err}; falling back to stderr");
                Logger::new(TracingSink::stderr())
            }
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("severity", &self.severity_threshold())
            .field("verbosity", &self.verbosity())
            .field("contextual", &self.contextual())
            .field("options", &self.sink_options())
            .field("sink", &self.current_sink())
            .finish_non_exhaustive()
    }
}
