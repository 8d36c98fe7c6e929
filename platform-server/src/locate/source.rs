//! Data the locator needs, as injected capabilities.
//!
//! The locator never fetches anything itself. These traits let it be run
//! against an already gathered request snapshot in production and against
//! in-memory maps in tests.

use crate::domain::{
    Composition, ElementKind, GeoElement, Station, StationId, TrackNumber, TrainId,
};

use super::error::LocateError;

/// Station lookup.
pub trait StationDirectory {
    /// The station with the given id.
    fn station(&self, id: &StationId) -> Result<Station, LocateError>;

    /// All stations whose name contains `query`, case-insensitively, in
    /// directory order.
    fn find_by_name(&self, query: &str) -> Result<Vec<Station>, LocateError>;
}

/// Geotagged infrastructure for the whole covered area.
pub trait GeoSource {
    /// Every element of the given kind, unfiltered.
    fn elements(&self, kind: ElementKind) -> Result<Vec<GeoElement>, LocateError>;
}

/// Routes, compositions and departure boards.
pub trait TrainSource {
    /// Stations the train calls at after `station`, in route order.
    ///
    /// Empty if `station` is the terminus.
    fn stops_after(&self, station: &StationId, train: &TrainId)
    -> Result<Vec<Station>, LocateError>;

    /// The train's composition.
    fn composition(&self, train: &TrainId) -> Result<Composition, LocateError>;

    /// The first train on the departure board of `station` that leaves from
    /// `track`.
    fn next_departure_on_track(
        &self,
        station: &StationId,
        track: &TrackNumber,
    ) -> Result<TrainId, LocateError>;
}
