//! Train identifier type.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train id: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// A transit-API vehicle identifier, e.g. `IC1832` or `BE.NMBS.IC1832`.
///
/// Both the short and the fully qualified form are accepted by the vehicle
/// and composition endpoints, so we keep whichever we were given.
///
/// # Examples
///
/// ```
/// use platform_server::domain::TrainId;
///
/// let id = TrainId::new("IC1832").unwrap();
/// assert_eq!(id.as_str(), "IC1832");
/// assert_eq!(id.short_name(), "IC1832");
///
/// let full = TrainId::new("BE.NMBS.IC1832").unwrap();
/// assert_eq!(full.short_name(), "IC1832");
///
/// assert!(TrainId::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrainId(String);

impl TrainId {
    /// Create a train id, trimming surrounding whitespace.
    ///
    /// Returns an error if the result is empty or contains whitespace.
    pub fn new(s: impl AsRef<str>) -> Result<Self, InvalidTrainId> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            return Err(InvalidTrainId {
                reason: "train id cannot be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidTrainId {
                reason: "train id cannot contain whitespace",
            });
        }
        Ok(TrainId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id without any dotted operator prefix.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
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
