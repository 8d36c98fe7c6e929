//! Locating carriages on a platform.
//!
//! This module answers: "where along this platform will each carriage of
//! the next train stop?" It fuses geotagged platform markers and signals
//! with the train's composition to produce a 1-D layout.
//!
//! Everything here is synchronous and side-effect free. Data comes in
//! through the capability traits in [`source`]; fetching, caching and
//! retrying are the caller's business.

mod config;
mod direction;
mod error;
mod filter;
mod layout;
mod locator;
mod projection;
mod signals;
pub mod source;
mod stop_signal;


pub use config::{DEFAULT_MAX_CARRIAGES, DEFAULT_RADIUS, DirectionPolicy, LocateConfig};
pub use direction::{OperativeSignals, approach_direction, resolve_operative};
pub use error::LocateError;
pub use filter::{BoundingBox, DEFAULT_BOX_RADIUS, on_track, within_box};
pub use layout::{CarriageLayout, carriages_from, layout_carriages};
pub use locator::{Locator, PlatformLayout, StopResolution, TrackElements};
pub use projection::{
    ProjectedPoint, haversine_m, project_to_line, project_west_to_east, sort_west_to_east,
};
pub use signals::SignalGroups;
pub use source::{GeoSource, StationDirectory, TrainSource};
pub use stop_signal::{adjusted_carriage_count, select_stop_signal};
