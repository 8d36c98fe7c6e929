//! Track numbers and track selection.

use std::fmt;

use serde::Serialize;

use super::StationId;

/// Error returned when parsing an invalid track number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid track number: {reason}")]
pub struct InvalidTrackNumber {
    reason: &'static str,
}

/// A track (platform) number in its canonical string form.
///
/// Tracks are compared against the `ref:track` tag and the liveboard
/// platform field as strings, so `"5"` and `"05"` are different tracks.
/// Only surrounding whitespace is stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackNumber(String);

impl TrackNumber {
    pub fn parse(s: &str) -> Result<Self, InvalidTrackNumber> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidTrackNumber {
                reason: "must not be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidTrackNumber {
                reason: "must not contain whitespace",
            });
        }
        Ok(TrackNumber(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for TrackNumber {
    fn from(n: u32) -> Self {
        TrackNumber(n.to_string())
    }
}

impl fmt::Display for TrackNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one physical track at one station.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackSelector {
    pub station: StationId,
    pub track: TrackNumber,
}

impl TrackSelector {
    pub fn new(station: StationId, track: TrackNumber) -> Self {
        Self { station, track }
    }
}

impl fmt::Display for TrackSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} track {}", self.station, self.track)
    }
}
