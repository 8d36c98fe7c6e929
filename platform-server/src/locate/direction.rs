//! Choosing the operative signal group and the approach direction.
//!
//! A two-way track carries one stop-signal set per running direction. The
//! train uses the set whose far end is nearer the next station on its route.

use tracing::debug;

use crate::domain::{Coordinate, Direction, GeoElement, SignalDirection, TrackSelector};

use super::config::DirectionPolicy;
use super::error::LocateError;
use super::projection::{haversine_m, sort_west_to_east};
use super::signals::SignalGroups;

/// The signal group an approaching train actually uses.
#[derive(Debug, Clone, PartialEq)]
pub struct OperativeSignals {
    /// Which direction tag the group carries.
    pub group: SignalDirection,
    /// Numerically referenced signals, ascending by `ref`. Never empty.
    pub signals: Vec<GeoElement>,
}

/// Pick the operative group.
///
/// With one populated group that group wins and `next_station` is never
/// called. With two, the group whose highest-ref signal is strictly closer
/// to the next station wins; a tie goes to the backward group.
pub fn resolve_operative<F>(
    selector: &TrackSelector,
    groups: &SignalGroups,
    next_station: F,
) -> Result<OperativeSignals, LocateError>
where
    F: FnOnce() -> Result<Coordinate, LocateError>,
{
    let forward = groups.ordered(SignalDirection::Forward);
    let backward = groups.ordered(SignalDirection::Backward);

    let (group, signals) = match (forward.is_empty(), backward.is_empty()) {
        (true, true) => {
            return Err(LocateError::AmbiguousDirection {
                station: selector.station.clone(),
                track: selector.track.clone(),
            });
        }
        (false, true) => (SignalDirection::Forward, forward),
        (true, false) => (SignalDirection::Backward, backward),
        (false, false) => {
            let next = next_station()?;
            let to_forward = distance_to_last(next, &forward);
            let to_backward = distance_to_last(next, &backward);
            debug!(
                selector = %selector,
                to_forward,
                to_backward,
                "Both signal groups present, comparing distance to next station"
            );
            if to_forward < to_backward {
                (SignalDirection::Forward, forward)
            } else {
                (SignalDirection::Backward, backward)
            }
        }
    };

    Ok(OperativeSignals { group, signals })
}

fn distance_to_last(from: Coordinate, signals: &[GeoElement]) -> f64 {
    signals
        .last()
        .map_or(f64::INFINITY, |s| haversine_m(from, s.coordinate))
}

/// Read the approach direction off the operative signals.
///
/// The westmost signal decides: if its `ref` equals the policy's marker
/// value the train runs west to east, otherwise east to west.
pub fn approach_direction(signals: &[GeoElement], policy: &DirectionPolicy) -> Direction {
    let mut sorted = signals.to_vec();
    sort_west_to_east(&mut sorted);

    match sorted.first().and_then(GeoElement::signal_ref) {
        Some(r) if r == policy.west_to_east_ref => Direction::WestToEast,
        _ => Direction::EastToWest,
    }
}
