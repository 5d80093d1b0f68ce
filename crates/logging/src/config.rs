//! crates/logging/src/config.rs
//! Whole-facade configuration applied in one step.

use logging_sink::{Severity, SinkOptions};

use crate::verbosity::Level;

/// Snapshot of every facade setting.
///
/// Applying a config through [`Settings::apply`](crate::Settings::apply)
/// updates all fields together. Sink options only take effect the next time
/// the default sink is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Verbosity threshold for `V`-gated calls.
    pub verbosity: Level,
    /// Minimum severity that is emitted.
    pub severity: Severity,
    /// Whether loggers attached to a [`Context`](crate::Context) are honored.
    pub contextual: bool,
    /// Destination of the lazily constructed default sink.
    pub sink: SinkOptions,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbosity: Level(0),
            severity: Severity::Info,
            contextual: true,
            sink: SinkOptions::stderr(),
        }
    }
}
