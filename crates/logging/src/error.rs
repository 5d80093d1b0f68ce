//! crates/logging/src/error.rs
//! Configuration errors reported by the settings setters.

use std::num::ParseIntError;

use logging_sink::ParseSeverityError;

/// A rejected configuration value. The setting it targeted is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The verbosity was not a signed integer.
    #[error("invalid verbosity {value:?}: {source}")]
    Verbosity {
        /// The rejected input.
        value: String,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The severity threshold was neither a severity name nor a rank.
    #[error(transparent)]
    Severity(#[from] ParseSeverityError),
}
