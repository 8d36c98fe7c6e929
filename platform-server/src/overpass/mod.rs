//! OpenStreetMap geodata via the Overpass API.
//!
//! Platform markers and signals are `railway=platform_marker` and
//! `railway=signal` elements. Their `ref:track`, `ref` and
//! `railway:signal:direction` tags are passed through untouched.

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEFAULT_AREA, DEFAULT_BASE_URL, OverpassClient, OverpassConfig, build_query};
pub use convert::{convert_element, convert_response};
pub use error::OverpassError;
pub use types::{LatLon, OsmElement, OverpassResponse};
