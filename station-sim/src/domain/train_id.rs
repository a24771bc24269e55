//! Train identifier type.

use std::fmt;

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train id: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// A non-empty train identifier such as `"T1"`.
///
/// Identifiers are compared exactly; they may not be empty and may not
/// carry leading or trailing whitespace.
///
/// # Examples
///
/// ```
/// use station_sim::domain::TrainId;
///
/// let id = TrainId::parse("T1").unwrap();
/// assert_eq!(id.as_str(), "T1");
///
/// assert!(TrainId::parse("").is_err());
/// assert!(TrainId::parse(" T1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainId(String);

impl TrainId {
    /// Parse a train identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainId> {
        if s.is_empty() {
            return Err(InvalidTrainId {
                reason: "must not be empty",
            });
        }

        if s.trim() != s {
            return Err(InvalidTrainId {
                reason: "must not have leading or trailing whitespace",
            });
        }

        Ok(TrainId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
