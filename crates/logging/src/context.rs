//! crates/logging/src/context.rs
//! Request-scoped logger propagation and logger resolution.
//!
//! A [`Context`] is an immutable value that may carry a [`Logger`]. Attaching
//! returns a new context; retrieving never constructs anything. Whether an
//! attached logger is honored is decided by the contextual toggle at
//! resolution time, so switching contextual logging off makes every lookup
//! fall back to the global sink without touching existing contexts.

use logging_sink::{KeyValue, Logger};

use crate::dispatch::Logging;

/// Propagation value carrying an optional logger.
#[derive(Clone, Debug, Default)]
pub struct Context {
    logger: Option<Logger>,
}

impl Context {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this context carrying `logger`.
    #[must_use]
    pub fn with_logger(&self, logger: Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// The attached logger, if any.
    #[must_use]
    pub const fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }
}

impl Logging {
    /// Returns `supplied` when contextual logging is enabled and a logger was
    /// supplied, else the global sink.
    pub fn resolve(&self, supplied: Option<&Logger>) -> Logger {
        match supplied {
            Some(logger) if self.settings().contextual() => logger.clone(),
            _ => self.settings().global_sink(),
        }
    }

    /// Attaches `logger` to a copy of `ctx`. With contextual logging disabled
    /// the copy is returned unchanged.
    #[must_use]
    pub fn new_context(&self, ctx: &Context, logger: Logger) -> Context {
        if self.settings().contextual() {
            ctx.with_logger(logger)
        } else {
            ctx.clone()
        }
    }

    /// The logger attached to `ctx`, or the global sink when none is attached
    /// or contextual logging is disabled.
    pub fn from_context(&self, ctx: &Context) -> Logger {
        self.resolve(ctx.logger())
    }

    /// The global sink, for code that has no context to hand.
    pub fn background(&self) -> Logger {
        self.settings().global_sink()
    }

    /// The global sink, marking a call site that should receive a context.
    pub fn todo(&self) -> Logger {
        self.settings().global_sink()
    }

    /// Adds `key_values` to `logger`. Returns `logger` unchanged when
    /// contextual logging is disabled.
    #[must_use]
    pub fn logger_with_values(&self, logger: &Logger, key_values: &[KeyValue<'_>]) -> Logger {
        if self.settings().contextual() {
            logger.with_values(key_values)
        } else {
            logger.clone()
        }
    }

    /// Appends `name` to `logger`'s name. Returns `logger` unchanged when
    /// contextual logging is disabled.
    #[must_use]
    pub fn logger_with_name(&self, logger: &Logger, name: &str) -> Logger {
        if self.settings().contextual() {
            logger.with_name(name)
        } else {
            logger.clone()
        }
    }
}
