//! crates/logging/src/verbose.rs
//! The `V(level)` gate.

use std::error::Error;
use std::fmt::{self, Display};
use std::panic::Location;

use logging_sink::{KeyValue, Logger, Severity};

use crate::dispatch::{Logging, Message};

/// Verbosity decision captured when the gate was opened.
///
/// A disabled gate drops every call without formatting. An enabled gate
/// forwards to the captured global logger; records still pass through the
/// severity threshold.
#[derive(Clone, Debug)]
pub struct Verbose<'a> {
    logging: &'a Logging,
    enabled: bool,
    logger: Option<Logger>,
}

impl<'a> Verbose<'a> {
    pub(crate) fn new(logging: &'a Logging, enabled: bool, logger: Option<Logger>) -> Self {
        Self {
            logging,
            enabled,
            logger,
        }
    }

    /// Whether calls through this gate are emitted.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[track_caller]
    fn emit(
        &self,
        severity: Severity,
        depth: usize,
        err: Option<&(dyn Error + 'static)>,
        message: Message<'_>,
    ) {
        if let Some(logger) = self.logger.as_ref().filter(|_| self.enabled) {
            self.logging
                .log(Some(logger), severity, depth, err, message, Location::caller());
        }
    }

    /// Logs the concatenated operands at INFO.
    #[track_caller]
    pub fn info(&self, args: &[&dyn Display]) {
        self.info_depth(0, args);
    }

    /// Logs the concatenated operands at INFO, attributed `depth` frames up.
    #[track_caller]
    pub fn info_depth(&self, depth: usize, args: &[&dyn Display]) {
        self.emit(Severity::Info, depth, None, Message::Print(args));
    }

    /// Logs the space-joined operands and a newline at INFO.
    #[track_caller]
    pub fn infoln(&self, args: &[&dyn Display]) {
        self.infoln_depth(0, args);
    }

    /// Logs the space-joined operands and a newline at INFO, attributed
    /// `depth` frames up.
    #[track_caller]
    pub fn infoln_depth(&self, depth: usize, args: &[&dyn Display]) {
        self.emit(Severity::Info, depth, None, Message::Println(args));
    }

    /// Logs formatted arguments at INFO.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.infof_depth(0, args);
    }

    /// Logs formatted arguments at INFO, attributed `depth` frames up.
    #[track_caller]
    pub fn infof_depth(&self, depth: usize, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, depth, None, Message::Printf(args));
    }

    /// Logs `message` with key/value pairs at INFO.
    #[track_caller]
    pub fn info_s(&self, message: &str, key_values: &[KeyValue<'_>]) {
        self.info_s_depth(0, message, key_values);
    }

    /// Logs `message` with key/value pairs at INFO, attributed `depth` frames
    /// up.
    #[track_caller]
    pub fn info_s_depth(&self, depth: usize, message: &str, key_values: &[KeyValue<'_>]) {
        self.emit(
            Severity::Info,
            depth,
            None,
            Message::Structured(message, key_values),
        );
    }

    /// Logs `err` and `message` with key/value pairs at ERROR.
    #[track_caller]
    pub fn error_s(
        &self,
        err: Option<&(dyn Error + 'static)>,
        message: &str,
        key_values: &[KeyValue<'_>],
    ) {
        self.emit(
            Severity::Error,
            0,
            err,
            Message::Structured(message, key_values),
        );
    }

    /// Same as [`error_s`](Self::error_s).
    #[deprecated(note = "use `error_s`")]
    #[track_caller]
    pub fn error(
        &self,
        err: Option<&(dyn Error + 'static)>,
        message: &str,
        key_values: &[KeyValue<'_>],
    ) {
        self.error_s(err, message, key_values);
    }
}
