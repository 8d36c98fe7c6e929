//! iRail client.
//!
//! HTTP access to the Belgian iRail API (<https://api.irail.be>), which
//! serves NMBS/SNCB stations, liveboards, vehicle routes and train
//! compositions.
//!
//! Key characteristics of iRail:
//! - Station ids look like `BE.NMBS.008892007`; vehicle ids like
//!   `BE.NMBS.IC1832`
//! - Numbers and flags are sent as strings
//! - Liveboard times are unix seconds; query dates are `ddmmyy` and times
//!   `HHMM`

mod client;
mod convert;
mod error;
mod station_cache;
mod types;

pub use client::{DEFAULT_BASE_URL, IrailClient, IrailConfig};
pub use convert::{
    ConversionError, convert_composition, convert_departure, convert_liveboard, convert_route,
    convert_station, convert_stations,
};
pub use error::IrailError;
pub use station_cache::{StationCache, StationCacheConfig};
pub use types::{
    CompositionResponse, DepartureDto, LiveboardResponse, Scalar, StationDto, StationsResponse,
    VehicleResponse,
};
