//! crates/logging-sink/src/severity.rs
//! Ordered log severities and their name/flag lookups.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseSeverityError;

/// Log importance, ordered from least to most severe.
///
/// The discriminants are the ranks compared by the facade's threshold gate,
/// so `Severity::Info < Severity::Warning < Severity::Error < Severity::Fatal`.
/// [`Severity::Fatal`] is always the maximum rank and therefore passes every
/// threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[repr(i32)]
pub enum Severity {
    /// Informational records.
    #[default]
    Info = 0,
    /// Something unexpected that does not prevent progress.
    Warning = 1,
    /// A failed operation.
    Error = 2,
    /// An unrecoverable condition; dispatching it terminates the process.
    Fatal = 3,
}

/// Shortcut letters, one per severity, indexed by rank.
pub const SEVERITY_CHARS: &str = "IWEF";

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 4] = [Self::Info, Self::Warning, Self::Error, Self::Fatal];

    /// Looks up a severity by name, ignoring ASCII case.
    ///
    /// Only the canonical names `INFO`, `WARNING`, `ERROR` and `FATAL` match;
    /// abbreviations such as `WARN` are rejected so callers can decide their
    /// own fallback.
    ///
    /// ```
    /// use logging_sink::Severity;
    ///
    /// assert_eq!(Severity::by_name("warning"), Some(Severity::Warning));
    /// assert_eq!(Severity::by_name("warn"), None);
    /// ```
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.name().eq_ignore_ascii_case(name))
    }

    /// Returns the severity with the given rank, if any.
    #[must_use]
    pub const fn from_rank(rank: i32) -> Option<Self> {
        match rank {
            0 => Some(Self::Info),
            1 => Some(Self::Warning),
            2 => Some(Self::Error),
            3 => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Numeric rank used for ordering and atomic storage.
    #[must_use]
    pub const fn rank(self) -> i32 {
        self as i32
    }

    /// Canonical upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Single-character flag: `'I'`, `'W'`, `'E'` or `'F'`.
    #[must_use]
    pub const fn flag(self) -> char {
        SEVERITY_CHARS.as_bytes()[self as usize] as char
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either a severity name or its numeric rank.
impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Some(severity) = Self::by_name(value) {
            return Ok(severity);
        }
        value
            .parse::<i32>()
            .ok()
            .and_then(Self::from_rank)
            .ok_or_else(|| ParseSeverityError::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_monotonic() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Fatal));
    }

    #[test]
    fn by_name_is_case_insensitive() {
        assert_eq!(Severity::by_name("INFO"), Some(Severity::Info));
        assert_eq!(Severity::by_name("Warning"), Some(Severity::Warning));
        assert_eq!(Severity::by_name("error"), Some(Severity::Error));
        assert_eq!(Severity::by_name("fAtAl"), Some(Severity::Fatal));
    }

    #[test]
    fn by_name_rejects_unknown_names() {
        assert_eq!(Severity::by_name(""), None);
        assert_eq!(Severity::by_name("warn"), None);
        assert_eq!(Severity::by_name("INFO "), None);
        assert_eq!(Severity::by_name("debug"), None);
    }

    #[test]
    fn flags_match_rank_order() {
        let flags: String = Severity::ALL.iter().map(|s| s.flag()).collect();
        assert_eq!(flags, SEVERITY_CHARS);
    }

    #[test]
    fn rank_round_trips_through_from_rank() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_rank(severity.rank()), Some(severity));
        }
        assert_eq!(Severity::from_rank(-1), None);
        assert_eq!(Severity::from_rank(4), None);
    }

    #[test]
    fn from_str_accepts_names_and_ranks() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("2".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!(" fatal ".parse::<Severity>(), Ok(Severity::Fatal));
    }

    #[test]
    fn from_str_rejects_out_of_range_ranks() {
        let err = "7".parse::<Severity>().unwrap_err();
        assert_eq!(err.value(), "7");
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(Severity::Warning.to_string(), "WARNING");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_upper_case_names() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"ERROR\"");
        let parsed: Severity = serde_json::from_str("\"FATAL\"").unwrap();
        assert_eq!(parsed, Severity::Fatal);
    }
}
