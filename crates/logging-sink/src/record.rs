//! crates/logging-sink/src/record.rs
//! Records handed from the facade to a [`LogSink`](crate::LogSink).

use std::fmt;
use std::panic::Location;

use crate::caller::{CALL_DEPTH_OFFSET, CallSite};
use crate::severity::Severity;

/// One key/value pair of a structured record.
///
/// Values are borrowed as [`fmt::Display`] trait objects so the facade can
/// hand them to the sink without rendering them itself; only the sink decides
/// whether and how to format them.
#[derive(Clone, Copy)]
pub struct KeyValue<'a> {
    /// Field name.
    pub key: &'a str,
    /// Field value, rendered by the sink.
    pub value: &'a dyn fmt::Display,
}

impl<'a> KeyValue<'a> {
    /// Pairs `key` with `value`.
    #[must_use]
    pub const fn new(key: &'a str, value: &'a dyn fmt::Display) -> Self {
        Self { key, value }
    }
}

impl fmt::Debug for KeyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Builds an array of [`KeyValue`] pairs.
///
/// ```
/// use logging_sink::kvs;
///
/// let pod = String::from("kubedns");
/// let fields = kvs!["pod" => pod, "status" => "ready"];
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].key, "pod");
/// ```
#[macro_export]
macro_rules! kvs {
    () => {
        []
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        [$($crate::KeyValue::new($key, &$value as &dyn ::std::fmt::Display)),+]
    };
}

/// A single log record as delivered to a sink.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    /// Severity the facade dispatched the record at.
    pub severity: Severity,
    /// The message; already formatted for unstructured calls.
    pub message: &'a str,
    /// Ordered structured fields, passed through untouched.
    pub key_values: &'a [KeyValue<'a>],
    /// Frames the record is attributed above `location`, plus
    /// [`CALL_DEPTH_OFFSET`] for records from the public entry points.
    pub call_depth: usize,
    /// The frame that called the logging entry point.
    pub location: &'static Location<'static>,
}

impl<'a> Record<'a> {
    /// Creates a record with zero call depth.
    #[must_use]
    pub const fn new(
        severity: Severity,
        message: &'a str,
        key_values: &'a [KeyValue<'a>],
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            severity,
            message,
            key_values,
            call_depth: 0,
            location,
        }
    }

    /// Returns a copy whose call depth is increased by `depth`.
    #[must_use]
    pub const fn deeper(mut self, depth: usize) -> Self {
        self.call_depth += depth;
        self
    }

    /// The site the record is attributed to: `location`, moved up by every
    /// frame of depth beyond [`CALL_DEPTH_OFFSET`].
    #[must_use]
    pub fn caller(&self) -> CallSite {
        CallSite::resolve(
            self.location,
            self.call_depth.saturating_sub(CALL_DEPTH_OFFSET),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kvs_macro_preserves_order() {
        let count = 3_u32;
        let fields = kvs!["a" => 1, "b" => "two", "c" => count];
        let keys: Vec<_> = fields.iter().map(|kv| kv.key).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(fields[2].value.to_string(), "3");
    }

    #[test]
    fn kvs_macro_accepts_empty_input() {
        let fields: [KeyValue<'_>; 0] = kvs![];
        assert!(fields.is_empty());
    }

    #[test]
    fn key_value_debug_renders_pair() {
        let kv = KeyValue::new("pod", &"kubedns");
        assert_eq!(format!("{kv:?}"), "pod=kubedns");
    }

    #[test]
    fn deeper_accumulates_depth() {
        let record = Record::new(Severity::Info, "m", &[], Location::caller());
        assert_eq!(record.deeper(2).deeper(3).call_depth, 5);
    }

    #[test]
    fn offset_depth_is_attributed_to_location() {
        let record = Record::new(Severity::Info, "m", &[], Location::caller());
        let caller = record.deeper(CALL_DEPTH_OFFSET).caller();
        assert_eq!(caller, CallSite::from_location(record.location));
    }
}
