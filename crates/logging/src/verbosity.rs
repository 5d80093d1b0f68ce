//! crates/logging/src/verbosity.rs
//! Signed verbosity levels compared by the `V` gate.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Verbosity level of a `V`-gated call, or the configured threshold.
///
/// A call at level `l` is emitted when the threshold is at least `l`, so
/// negative levels pass the default threshold of zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Level(pub i32);

impl Level {
    /// Reports whether a call at `level` passes this threshold.
    #[must_use]
    pub const fn admits(self, level: Self) -> bool {
        self.0 >= level.0
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|source| ConfigError::Verbosity {
                value: value.to_owned(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_admits_lower_and_equal_levels() {
        let threshold = Level(2);
        assert!(threshold.admits(Level(-1)));
        assert!(threshold.admits(Level(0)));
        assert!(threshold.admits(Level(2)));
        assert!(!threshold.admits(Level(3)));
    }

    #[test]
    fn default_threshold_admits_negative_levels() {
        assert!(Level::default().admits(Level(-5)));
        assert!(!Level::default().admits(Level(1)));
    }

    #[test]
    fn parses_signed_integers() {
        assert_eq!("3".parse::<Level>(), Ok(Level(3)));
        assert_eq!(" -2 ".parse::<Level>(), Ok(Level(-2)));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "loud".parse::<Level>().unwrap_err();
        assert!(matches!(err, ConfigError::Verbosity { ref value, .. } if value == "loud"));
        assert!(err.to_string().contains("loud"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&Level(4)).unwrap(), "4");
        let level: Level = serde_json::from_str("-1").unwrap();
        assert_eq!(level, Level(-1));
    }
}
