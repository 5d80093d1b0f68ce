//! crates/logging-sink/src/logger.rs
//! The sink capability trait and the cheap, clonable [`Logger`] handle.

use std::error::Error;
use std::fmt;
use std::io;
use std::panic::Location;
use std::sync::Arc;

use crate::caller::CALL_DEPTH_OFFSET;
use crate::record::{KeyValue, Record};
use crate::severity::Severity;

/// Backing implementation that formats and writes records.
///
/// The facade routes INFO records to [`info`](Self::info) and every more
/// severe record to [`error`](Self::error). Implementations must be shareable
/// across threads; they are stored behind an [`Arc`] and invoked concurrently.
pub trait LogSink: Send + Sync {
    /// Writes an informational record.
    fn info(&self, record: &Record<'_>);

    /// Writes a WARNING, ERROR or FATAL record, with the error value supplied
    /// by structured error calls.
    fn error(&self, err: Option<&(dyn Error + 'static)>, record: &Record<'_>);

    /// Returns a sink that prepends `key_values` to every record.
    fn with_values(&self, key_values: &[KeyValue<'_>]) -> Arc<dyn LogSink>;

    /// Returns a sink whose name has `name` appended.
    fn with_name(&self, name: &str) -> Arc<dyn LogSink>;

    /// Flushes buffered output. The default does nothing.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Handle to a [`LogSink`] plus the call depth accumulated by wrappers.
///
/// Cloning is an `Arc` bump. [`with_call_depth`](Self::with_call_depth)
/// returns an equally capable logger whose records report additional frames.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    call_depth: usize,
}

impl Logger {
    /// Wraps a sink.
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self::from_arc(Arc::new(sink))
    }

    /// Wraps an already shared sink.
    #[must_use]
    pub fn from_arc(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            call_depth: 0,
        }
    }

    /// A logger that drops every record.
    #[must_use]
    pub fn discard() -> Self {
        Self::new(DiscardSink)
    }

    /// Borrows the underlying sink.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Frames added by [`with_call_depth`](Self::with_call_depth) so far.
    #[must_use]
    pub const fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Returns a logger whose records report `depth` additional frames.
    #[must_use]
    pub fn with_call_depth(&self, depth: usize) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            call_depth: self.call_depth + depth,
        }
    }

    /// Returns a logger that attaches `key_values` to every record.
    #[must_use]
    pub fn with_values(&self, key_values: &[KeyValue<'_>]) -> Self {
        Self {
            sink: self.sink.with_values(key_values),
            call_depth: self.call_depth,
        }
    }

    /// Returns a logger with `name` appended to its name.
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        Self {
            sink: self.sink.with_name(name),
            call_depth: self.call_depth,
        }
    }

    /// Reports whether both handles share the same sink instance.
    #[must_use]
    pub fn same_sink(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }

    /// Structured informational record attributed to the caller.
    #[track_caller]
    pub fn info(&self, message: &str, key_values: &[KeyValue<'_>]) {
        self.info_record(
            Record::new(Severity::Info, message, key_values, Location::caller())
                .deeper(CALL_DEPTH_OFFSET),
        );
    }

    /// Structured error record attributed to the caller.
    #[track_caller]
    pub fn error(
        &self,
        err: Option<&(dyn Error + 'static)>,
        message: &str,
        key_values: &[KeyValue<'_>],
    ) {
        self.error_record(
            err,
            Record::new(Severity::Error, message, key_values, Location::caller())
                .deeper(CALL_DEPTH_OFFSET),
        );
    }

    /// Forwards a prepared record to [`LogSink::info`], adding this handle's
    /// call depth.
    pub fn info_record(&self, record: Record<'_>) {
        self.sink.info(&record.deeper(self.call_depth));
    }

    /// Forwards a prepared record to [`LogSink::error`], adding this handle's
    /// call depth.
    pub fn error_record(&self, err: Option<&(dyn Error + 'static)>, record: Record<'_>) {
        self.sink.error(err, &record.deeper(self.call_depth));
    }

    /// Flushes the underlying sink.
    pub fn flush(&self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &Arc::as_ptr(&self.sink).cast::<()>())
            .field("call_depth", &self.call_depth)
            .finish()
    }
}

/// Sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn info(&self, _record: &Record<'_>) {}

    fn error(&self, _err: Option<&(dyn Error + 'static)>, _record: &Record<'_>) {}

    fn with_values(&self, _key_values: &[KeyValue<'_>]) -> Arc<dyn LogSink> {
        Arc::new(Self)
    }

    fn with_name(&self, _name: &str) -> Arc<dyn LogSink> {
        Arc::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct DepthSink {
        seen: Mutex<Vec<(bool, usize, u32)>>,
    }

    impl LogSink for DepthSink {
        fn info(&self, record: &Record<'_>) {
            self.seen
                .lock()
                .unwrap()
                .push((false, record.call_depth, record.location.line()));
        }

        fn error(&self, _err: Option<&(dyn Error + 'static)>, record: &Record<'_>) {
            self.seen
                .lock()
                .unwrap()
                .push((true, record.call_depth, record.location.line()));
        }

        fn with_values(&self, _key_values: &[KeyValue<'_>]) -> Arc<dyn LogSink> {
            Arc::new(Self::default())
        }

        fn with_name(&self, _name: &str) -> Arc<dyn LogSink> {
            Arc::new(Self::default())
        }
    }

    #[test]
    fn with_call_depth_accumulates() {
        let logger = Logger::discard().with_call_depth(2).with_call_depth(3);
        assert_eq!(logger.call_depth(), 5);
    }

    #[test]
    fn records_carry_handle_depth_and_caller_line() {
        let sink = Arc::new(DepthSink::default());
        let logger = Logger::from_arc(sink.clone()).with_call_depth(4);

        let line = line!() + 1;
        logger.info("hello", &[]);
        logger.error(None, "bad", &[]);

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen[0], (false, 4 + CALL_DEPTH_OFFSET, line));
        assert_eq!(seen[1], (true, 4 + CALL_DEPTH_OFFSET, line + 1));
    }

    #[test]
    fn with_call_depth_shares_sink() {
        let logger = Logger::discard();
        assert!(logger.same_sink(&logger.with_call_depth(1)));
        assert!(!logger.same_sink(&Logger::discard()));
    }

    #[test]
    fn with_values_keeps_call_depth() {
        let logger = Logger::discard().with_call_depth(2);
        assert_eq!(logger.with_values(&[]).call_depth(), 2);
        assert_eq!(logger.with_name("x").call_depth(), 2);
    }
}
