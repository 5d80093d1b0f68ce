#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` holds everything on the far side of the logging facade: the
//! [`Severity`] model, the [`LogSink`] capability every backend implements,
//! the clonable [`Logger`] handle the facade passes around, and the default
//! [`TracingSink`] that renders records through `tracing-subscriber`.
//!
//! # Design
//!
//! A [`Record`] borrows its message and [`KeyValue`] pairs from the caller, so
//! handing one to a sink never allocates. Sinks are shared as
//! `Arc<dyn LogSink>`; deriving a sink with extra values or a longer name
//! returns a new `Arc` and leaves the original untouched. Call depth travels
//! with the [`Logger`] handle ([`Logger::with_call_depth`]) and is added to
//! each record as it is forwarded; [`Record::caller`] turns it into the
//! [`CallSite`] a sink reports.
//!
//! The default sink writes to standard error, and also to a [`RotatingFile`]
//! when [`SinkOptions::path`] is set. Rotation and encoding live here only; the
//! facade never formats sink output.
//!
//! # Invariants
//!
//! - [`Severity::Fatal`] is the highest rank.
//! - INFO records arrive through [`LogSink::info`]; all others through
//!   [`LogSink::error`].
//! - Structured key/value pairs reach the sink in the order supplied.
//!
//! # Errors
//!
//! Building a file-backed sink reports [`SinkError`]. Parsing a severity
//! reports [`ParseSeverityError`].
//!
//! # Examples
//!
//! ```
//! use logging_sink::{Logger, TracingSink, kvs};
//!
//! let logger = Logger::new(TracingSink::new(std::io::sink())).with_name("controller");
//! logger.info("pod ready", &kvs!["pod" => "kubedns"]);
//! ```

mod caller;
mod error;
mod logger;
mod options;
mod record;
mod rotating;
mod severity;
mod tracing_sink;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use caller::{CALL_DEPTH_OFFSET, CallSite};
pub use error::{ParseSeverityError, SinkError};
pub use logger::{DiscardSink, LogSink, Logger};
pub use options::SinkOptions;
pub use record::{KeyValue, Record};
pub use rotating::RotatingFile;
pub use severity::{SEVERITY_CHARS, Severity};
pub use tracing_sink::{TracingSink, build};
