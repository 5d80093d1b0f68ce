//! crates/logging-sink/src/options.rs
//! Destination and rotation limits for the default sink.

use std::path::PathBuf;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Where the default sink writes and when its file rolls over.
///
/// Zero limits mean "unlimited". The options are read once, when the facade
/// lazily builds its default sink; later changes only take effect after the
/// sink is cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SinkOptions {
    /// Log file written in addition to standard error; `None` writes to
    /// standard error only.
    pub path: Option<PathBuf>,
    /// Size in megabytes after which the file is rotated.
    pub max_size_mb: u64,
    /// Age in days after which rotated backups are removed. Only consulted
    /// when `max_backups` is zero.
    pub max_age_days: u64,
    /// Number of rotated backups kept.
    pub max_backups: usize,
}

impl SinkOptions {
    /// Options that write to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::default()
    }

    /// Options that write to `path` without rotation limits.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Rotation size in bytes, if limited.
    #[must_use]
    pub fn max_size_bytes(&self) -> Option<u64> {
        (self.max_size_mb > 0).then(|| self.max_size_mb.saturating_mul(BYTES_PER_MB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limits_are_unlimited() {
        let options = SinkOptions::stderr();
        assert_eq!(options.max_size_bytes(), None);
        assert!(options.path.is_none());
    }

    #[test]
    fn size_limit_converts_to_bytes() {
        let options = SinkOptions {
            max_size_mb: 2,
            max_age_days: 1,
            ..SinkOptions::file("/tmp/app.log")
        };
        assert_eq!(options.max_size_bytes(), Some(2 * 1024 * 1024));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_documents() {
        let options: SinkOptions =
            serde_json::from_str(r#"{"path":"/var/log/app.log","max_backups":3}"#).unwrap();
        assert_eq!(options.path, Some(PathBuf::from("/var/log/app.log")));
        assert_eq!(options.max_backups, 3);
        assert_eq!(options.max_size_mb, 0);
    }
}
