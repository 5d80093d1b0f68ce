//! crates/logging-sink/src/error.rs
//! Error types raised while parsing severities and building sinks.

use std::io;
use std::path::PathBuf;

/// A string that names neither a severity nor a valid severity rank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity {value:?}: expected INFO, WARNING, ERROR, FATAL or a rank 0-3")]
pub struct ParseSeverityError {
    value: String,
}

impl ParseSeverityError {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Failure to construct a sink destination.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The log file or one of its parent directories could not be created.
    #[error("failed to open log file {path}: {source}")]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configured path has no file name component.
    #[error("log file path {0} does not name a file")]
    NotAFile(PathBuf),
}
