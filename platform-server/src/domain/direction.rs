//! Signal and train directions.

use std::fmt;

use serde::Serialize;

/// Value of the `railway:signal:direction` tag on a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Forward,
    Backward,
}

impl SignalDirection {
    /// Parse the tag value. Anything other than the two exact values is
    /// treated as untagged.
    pub fn from_tag(value: &str) -> Option<Self> {
        match value {
            "forward" => Some(SignalDirection::Forward),
            "backward" => Some(SignalDirection::Backward),
            _ => None,
        }
    }

    pub fn tag_value(self) -> &'static str {
        match self {
            SignalDirection::Forward => "forward",
            SignalDirection::Backward => "backward",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_value())
    }
}

/// The direction from which a train enters the station.
///
/// Upstream data encodes this as `1` (east to west) and `-1` (west to
/// east). The sign is also the sign applied to carriage lengths when
/// laying carriages out behind the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    EastToWest,
    WestToEast,
}

impl Direction {
    /// Sign applied to carriage lengths along the projected line.
    pub fn sign(self) -> f64 {
        match self {
            Direction::EastToWest => 1.0,
            Direction::WestToEast => -1.0,
        }
    }

    /// The `±1` encoding used by upstream consumers.
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::EastToWest => 1,
            Direction::WestToEast => -1,
        }
    }

    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            1 => Some(Direction::EastToWest),
            -1 => Some(Direction::WestToEast),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::EastToWest => f.write_str("east-to-west"),
            Direction::WestToEast => f.write_str("west-to-east"),
        }
    }
}
