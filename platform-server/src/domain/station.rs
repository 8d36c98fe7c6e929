//! Station identifiers and locations.

use std::fmt;

use serde::Serialize;

use super::Coordinate;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A transit-API station identifier, e.g. `BE.NMBS.008812005`.
///
/// Identifiers are opaque to us, but we refuse anything that could not
/// appear in a query string unescaped: the value must be non-empty and
/// consist of ASCII letters, digits, `.`, `_` or `-`.
///
/// # Examples
///
/// ```
/// use platform_server::domain::StationId;
///
/// let id = StationId::parse("BE.NMBS.008812005").unwrap();
/// assert_eq!(id.as_str(), "BE.NMBS.008812005");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("BE NMBS").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
        {
            return Err(InvalidStationId {
                reason: "must contain only ASCII letters, digits, '.', '_' or '-'",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station with its display name and location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
        }
    }

    /// Case-insensitive substring match on the station name.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StationId::parse("BE.NMBS.008812005").is_ok());
        assert!(StationId::parse("008892007").is_ok());
        assert!(StationId::parse("stop_area-1").is_ok());
    }

    #[test]
    fn parse_trims_whitespace() {
        let id = StationId::parse("  BE.NMBS.008812005 ").unwrap();
        assert_eq!(id.as_str(), "BE.NMBS.008812005");
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse("   ").is_err());
    }

    #[test]
    fn reject_unsafe_characters() {
        assert!(StationId::parse("BE NMBS").is_err());
        assert!(StationId::parse("BE&id=1").is_err());
        assert!(StationId::parse("Brüssel").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("BE.NMBS.008812005").unwrap();
        assert_eq!(format!("{}", id), "BE.NMBS.008812005");
        assert_eq!(format!("{:?}", id), "StationId(BE.NMBS.008812005)");
    }

    #[test]
    fn name_matching_is_case_insensitive() {
        let station = Station::new(
            StationId::parse("BE.NMBS.008812005").unwrap(),
            "Brussels-North",
            Coordinate::new(50.859663, 4.360846),
        );
        assert!(station.name_matches("brussels"));
        assert!(station.name_matches("NORTH"));
        assert!(!station.name_matches("Gent"));
    }
}
