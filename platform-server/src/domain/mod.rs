//! Domain types for platform carriage positioning.
//!
//! This module contains the validated records the locating core works on.
//! Raw API payloads are converted into these types at the edge, so code
//! that receives them can trust their shape.

mod carriage;
mod composition;
mod coordinate;
mod departure;
mod direction;
mod element;
mod station;
mod track;
mod train;

pub use carriage::{Carriage, CarriageRole, PositionedCarriage};
pub use composition::{Composition, CompositionSegment, SeatClass, Unit, UnitFeature};
pub use coordinate::Coordinate;
pub use departure::Departure;
pub use direction::{Direction, SignalDirection};
pub use element::{
    ElementKind, ElementRef, GeoElement, OsmType, REF_TAG, SIGNAL_DIRECTION_TAG, TRACK_TAG,
};
pub use station::{InvalidStationId, Station, StationId};
pub use track::{InvalidTrackNumber, TrackNumber, TrackSelector};
pub use train::{InvalidTrainId, TrainId};
