//! crates/logging/src/dispatch.rs
//! Gating, message rendering, depth bookkeeping and routing.
//!
//! Every public logging entry point funnels into [`Logging::log`] or
//! [`Logging::fatal`]. The severity gate is consulted before any operand is
//! formatted, the logger is resolved only for records that pass, and the
//! record is handed to the sink with the caller's depth plus
//! [`CALL_DEPTH_OFFSET`].

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display, Write as _};
use std::io;
use std::panic::Location;

use logging_sink::{CALL_DEPTH_OFFSET, KeyValue, Logger, Record, Severity};

use crate::config::LogConfig;
use crate::context::Context;
use crate::exit::ExitCoordinator;
use crate::leveled::Leveled;
use crate::settings::Settings;
use crate::verbose::Verbose;
use crate::verbosity::Level;

/// How a call's operands become the record message.
#[derive(Clone, Copy)]
pub(crate) enum Message<'a> {
    /// Operands concatenated without separators.
    Print(&'a [&'a dyn Display]),
    /// Operands joined by single spaces with a trailing newline.
    Println(&'a [&'a dyn Display]),
    /// Pre-built format arguments.
    Printf(fmt::Arguments<'a>),
    /// A fixed message with ordered key/value pairs.
    Structured(&'a str, &'a [KeyValue<'a>]),
}

impl<'a> Message<'a> {
    fn text(self) -> Cow<'a, str> {
        match self {
            Self::Print(operands) => {
                let mut text = String::new();
                for operand in operands {
                    let _ = write!(text, "{operand}");
                }
                Cow::Owned(text)
            }
            Self::Println(operands) => {
                let mut text = String::new();
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        text.push(' ');
                    }
                    let _ = write!(text, "{operand}");
                }
                text.push('\n');
                Cow::Owned(text)
            }
            Self::Printf(args) => args
                .as_str()
                .map_or_else(|| Cow::Owned(fmt::format(args)), Cow::Borrowed),
            Self::Structured(message, _) => Cow::Borrowed(message),
        }
    }

    fn key_values(self) -> &'a [KeyValue<'a>] {
        match self {
            Self::Structured(_, key_values) => key_values,
            _ => &[],
        }
    }
}

/// One facade instance: settings plus the exit coordinator.
///
/// The process-wide instance is reached through [`logging()`](crate::logging);
/// tests and embedders may create their own.
#[derive(Debug, Default)]
pub struct Logging {
    settings: Settings,
    exit: ExitCoordinator,
}

impl Logging {
    /// An instance with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(Settings::new())
    }

    /// An instance using `settings`.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            exit: ExitCoordinator::new(),
        }
    }

    /// The instance's settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The instance's exit coordinator.
    #[must_use]
    pub const fn exit_coordinator(&self) -> &ExitCoordinator {
        &self.exit
    }

    /// Applies `config` to the settings.
    pub fn configure(&self, config: &LogConfig) {
        self.settings.apply(config);
    }

    /// Leveled calls through the global sink.
    #[must_use]
    pub fn global(&self) -> Leveled<'_> {
        Leveled::new(self, None)
    }

    /// Leveled calls through the logger carried by `ctx`, when contextual
    /// logging is enabled, and the global sink otherwise.
    #[must_use]
    pub fn leveled(&self, ctx: &Context) -> Leveled<'_> {
        let logger = ctx.logger().filter(|_| self.settings.contextual()).cloned();
        Leveled::new(self, logger)
    }

    /// Opens a verbosity gate at `level`.
    ///
    /// The threshold is compared once, here; the returned gate keeps its
    /// decision and the global logger it captured.
    #[must_use]
    pub fn v(&self, level: impl Into<Level>) -> Verbose<'_> {
        let enabled = self.settings.verbosity_enabled(level.into());
        let logger = enabled.then(|| self.settings.global_sink());
        Verbose::new(self, enabled, logger)
    }

    /// Flushes the installed sink, if any.
    pub fn flush(&self) -> io::Result<()> {
        self.settings
            .current_sink()
            .map_or(Ok(()), |logger| logger.flush())
    }

    fn target(&self, logger: Option<&Logger>) -> Logger {
        logger.map_or_else(|| self.settings.global_sink(), Logger::clone)
    }

    /// Gates, renders and routes one non-fatal record.
    pub(crate) fn log(
        &self,
        logger: Option<&Logger>,
        severity: Severity,
        depth: usize,
        err: Option<&(dyn Error + 'static)>,
        message: Message<'_>,
        location: &'static Location<'static>,
    ) {
        if !self.settings.severity_enabled(severity) {
            return;
        }
        let text = message.text();
        let record = Record::new(severity, &text, message.key_values(), location);
        let logger = self
            .target(logger)
            .with_call_depth(depth + CALL_DEPTH_OFFSET);
        if severity == Severity::Info {
            logger.info_record(record);
        } else {
            logger.error_record(err, record);
        }
    }

    /// Routes a FATAL record, attaching a stack trace unless the no-stack
    /// path is selected, then terminates.
    pub(crate) fn fatal(
        &self,
        logger: Option<&Logger>,
        depth: usize,
        message: Message<'_>,
        location: &'static Location<'static>,
    ) -> ! {
        let logger = self.target(logger);
        let text = message.text();
        let stack = (!self.exit.no_stacks()).then(Backtrace::force_capture);
        let mut key_values = message.key_values().to_vec();
        if let Some(stack) = &stack {
            key_values.push(KeyValue::new("stack", stack));
        }

        let record = Record::new(Severity::Fatal, &text, &key_values, location);
        logger
            .with_call_depth(depth + CALL_DEPTH_OFFSET)
            .error_record(None, record);
        self.exit.terminate(&logger)
    }

    /// Selects the no-stack path, then behaves like [`fatal`](Self::fatal).
    pub(crate) fn exit(
        &self,
        logger: Option<&Logger>,
        depth: usize,
        message: Message<'_>,
        location: &'static Location<'static>,
    ) -> ! {
        self.exit.set_no_stacks();
        self.fatal(logger, depth, message, location)
    }
}
