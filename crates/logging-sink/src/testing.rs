//! crates/logging-sink/src/testing.rs
//! In-memory sinks for exercising the facade in tests.
//!
//! Enabled with the `test-support` feature.

use std::error::Error;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crate::logger::{LogSink, Logger};
use crate::record::{KeyValue, Record};
use crate::severity::Severity;

/// Which [`LogSink`] method received a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// [`LogSink::info`].
    Info,
    /// [`LogSink::error`].
    Error,
}

/// Owned copy of a record delivered to a [`CaptureSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Sink method that received the record.
    pub route: Route,
    /// Severity the facade dispatched at.
    pub severity: Severity,
    /// Rendered message.
    pub message: String,
    /// Error supplied to [`LogSink::error`], rendered.
    pub error: Option<String>,
    /// Values attached to the sink followed by the record's own pairs.
    pub key_values: Vec<(String, String)>,
    /// Dot-joined logger name.
    pub name: Option<String>,
    /// Call depth reported by the record.
    pub call_depth: usize,
    /// File of the site the record is attributed to.
    pub file: String,
    /// Line of the site the record is attributed to.
    pub line: u32,
}

impl CapturedRecord {
    /// First value recorded for `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.key_values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct Shared {
    records: Mutex<Vec<CapturedRecord>>,
    flushes: AtomicUsize,
    flush_delay: Option<Duration>,
}

/// Sink that stores every record it receives.
///
/// Sinks derived through [`LogSink::with_values`] and [`LogSink::with_name`]
/// append to the same store, so the original handle observes their output.
#[derive(Clone, Default)]
pub struct CaptureSink {
    shared: Arc<Shared>,
    name: Option<String>,
    values: Vec<(String, String)>,
}

impl CaptureSink {
    /// Creates an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capture sink whose [`flush`](LogSink::flush) sleeps for
    /// `delay` before returning.
    #[must_use]
    pub fn with_flush_delay(delay: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                flush_delay: Some(delay),
                ..Shared::default()
            }),
            ..Self::default()
        }
    }

    /// Wraps a clone of this sink in a [`Logger`].
    #[must_use]
    pub fn logger(&self) -> Logger {
        Logger::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedRecord>> {
        self.shared
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the captured records.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().clone()
    }

    /// Removes and returns the captured records.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of completed flushes.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.shared.flushes.load(Ordering::SeqCst)
    }

    fn capture(&self, route: Route, err: Option<&(dyn Error + 'static)>, record: &Record<'_>) {
        let mut key_values = self.values.clone();
        key_values.extend(
            record
                .key_values
                .iter()
                .map(|kv| (kv.key.to_owned(), kv.value.to_string())),
        );
        let caller = record.caller();
        let captured = CapturedRecord {
            route,
            severity: record.severity,
            message: record.message.to_owned(),
            error: err.map(ToString::to_string),
            key_values,
            name: self.name.clone(),
            call_depth: record.call_depth,
            file: caller.file().to_owned(),
            line: caller.line(),
        };
        self.lock().push(captured);
    }
}

impl fmt::Debug for CaptureSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSink")
            .field("records", &self.len())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl LogSink for CaptureSink {
    fn info(&self, record: &Record<'_>) {
        self.capture(Route::Info, None, record);
    }

    fn error(&self, err: Option<&(dyn Error + 'static)>, record: &Record<'_>) {
        self.capture(Route::Error, err, record);
    }

    fn with_values(&self, key_values: &[KeyValue<'_>]) -> Arc<dyn LogSink> {
        let mut derived = self.clone();
        derived.values.extend(
            key_values
                .iter()
                .map(|kv| (kv.key.to_owned(), kv.value.to_string())),
        );
        Arc::new(derived)
    }

    fn with_name(&self, name: &str) -> Arc<dyn LogSink> {
        let mut derived = self.clone();
        derived.name = Some(match &self.name {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_owned(),
        });
        Arc::new(derived)
    }

    fn flush(&self) -> io::Result<()> {
        if let Some(delay) = self.shared.flush_delay {
            thread::sleep(delay);
        }
        self.shared.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// `Display` value that counts how often it is formatted.
///
/// Used to prove that suppressed calls never render their operands.
#[derive(Clone, Debug, Default)]
pub struct FormatProbe {
    count: Arc<AtomicUsize>,
}

impl FormatProbe {
    /// Creates a probe with a zero count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the probe has been formatted.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl fmt::Display for FormatProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.count.fetch_add(1, Ordering::SeqCst);
        f.write_str("probe")
    }
}
