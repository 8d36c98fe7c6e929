//! Locating error types.
//!
//! Every variant is a point where guessing would put a train in the wrong
//! place, so nothing here is recovered from locally. Each carries the
//! identifiers needed to log it and answer "position unavailable".

use crate::domain::{ElementKind, ElementRef, StationId, TrackNumber, TrainId};

/// Errors raised while locating carriages on a platform.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocateError {
    /// The bounding box around the station holds no element of a kind we need
    #[error("no {kind} elements within {radius}° of station {station} (track {track})")]
    NoGeoData {
        station: StationId,
        track: TrackNumber,
        kind: ElementKind,
        radius: f64,
    },

    /// Neither a forward nor a backward signal group exists for the track
    #[error("no forward or backward stop signals on track {track} at station {station}")]
    AmbiguousDirection {
        station: StationId,
        track: TrackNumber,
    },

    /// No signal in the operative group matches the adjusted carriage count
    #[error(
        "no stop signal with ref {wanted} on track {track} at station {station} for train {train}"
    )]
    NoMatchingSignal {
        station: StationId,
        track: TrackNumber,
        train: TrainId,
        wanted: u32,
    },

    /// The stop signal did not survive projection
    #[error("stop signal {signal} missing from projected points")]
    MissingStopSignal { signal: ElementRef },

    /// Composition lacks a usable carriage count or length
    #[error("malformed composition for train {train}: {reason}")]
    MalformedComposition { train: TrainId, reason: String },

    /// No station with the given id or name
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The train does not call at the station
    #[error("station {station} is not on the route of train {train}")]
    StationNotOnRoute { station: StationId, train: TrainId },

    /// The train terminates at the station, so there is no next stop to aim at
    #[error("train {train} has no stop after station {station}")]
    NoNextStation { station: StationId, train: TrainId },

    /// Nothing departs from the track
    #[error("no departure on track {track} at station {station}")]
    NoDepartureOnTrack {
        station: StationId,
        track: TrackNumber,
    },

    /// The data source could not supply a record
    #[error("data source error: {message}")]
    Source { message: String },
}

impl LocateError {
    /// True for failures caused by inconsistent or incomplete source data,
    /// as opposed to unknown identifiers or unavailable sources.
    pub fn is_data_inconsistency(&self) -> bool {
        matches!(
            self,
            LocateError::NoGeoData { .. }
                | LocateError::AmbiguousDirection { .. }
                | LocateError::NoMatchingSignal { .. }
                | LocateError::MissingStopSignal { .. }
                | LocateError::MalformedComposition { .. }
                | LocateError::NoNextStation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> StationId {
        StationId::parse("BE.NMBS.008812005").unwrap()
    }

    #[test]
    fn error_display() {
        let err = LocateError::NoGeoData {
            station: station(),
            track: TrackNumber::from(5),
            kind: ElementKind::Signal,
            radius: 0.015,
        };
        assert_eq!(
            err.to_string(),
            "no signal elements within 0.015° of station BE.NMBS.008812005 (track 5)"
        );

        let err = LocateError::AmbiguousDirection {
            station: station(),
            track: TrackNumber::from(5),
        };
        assert_eq!(
            err.to_string(),
            "no forward or backward stop signals on track 5 at station BE.NMBS.008812005"
        );

        let err = LocateError::NoMatchingSignal {
            station: station(),
            track: TrackNumber::from(5),
            train: TrainId::new("IC1832").unwrap(),
            wanted: 10,
        };
        assert_eq!(
            err.to_string(),
            "no stop signal with ref 10 on track 5 at station BE.NMBS.008812005 for train IC1832"
        );

        let err = LocateError::MissingStopSignal {
            signal: ElementRef::node(77),
        };
        assert_eq!(err.to_string(), "stop signal node/77 missing from projected points");

        let err = LocateError::MalformedComposition {
            train: TrainId::new("IC1832").unwrap(),
            reason: "unit 3 has no length".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed composition for train IC1832: unit 3 has no length"
        );
    }

    #[test]
    fn classification() {
        assert!(
            LocateError::MissingStopSignal {
                signal: ElementRef::node(1)
            }
            .is_data_inconsistency()
        );
        assert!(!LocateError::UnknownStation("Nowhere".into()).is_data_inconsistency());
        assert!(
            !LocateError::Source {
                message: "timeout".into()
            }
            .is_data_inconsistency()
        );
    }
}
