//! iRail API response DTOs.
//!
//! These types map directly to the iRail JSON responses. iRail encodes
//! almost every scalar as a string (`"1"`, `"26.4"`, `"0"`), and omits
//! fields it has no data for, so numeric fields are kept as [`Scalar`] and
//! validated during conversion.

use serde::{Deserialize, Serialize};

/// A JSON scalar iRail may send as a string, a number or a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    /// Numeric value, if the scalar is a number or a string holding one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Number(n) => Some(*n),
            Scalar::Bool(_) => None,
        }
    }

    /// Non-negative integer value.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 => {
                Some(*n as u32)
            }
            _ => None,
        }
    }

    /// Truthiness the way iRail flags work: `"1"`, non-zero numbers and `true`.
    pub fn as_flag(&self) -> bool {
        match self {
            Scalar::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(|n| n > 0)
                .unwrap_or_else(|_| s.eq_ignore_ascii_case("true")),
            Scalar::Number(n) => *n > 0.0,
            Scalar::Bool(b) => *b,
        }
    }
}

/// Response from `/stations/`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsResponse {
    #[serde(default)]
    pub station: Vec<StationDto>,
}

/// A station in the station list, or the `stationinfo` of a stop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationDto {
    /// NMBS id, e.g. `BE.NMBS.008892007`.
    pub id: String,
    pub name: String,
    /// Longitude, as a decimal string.
    #[serde(rename = "locationX")]
    pub location_x: String,
    /// Latitude, as a decimal string.
    #[serde(rename = "locationY")]
    pub location_y: String,
    pub standardname: Option<String>,
}

/// Response from `/liveboard/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveboardResponse {
    pub station: Option<String>,
    pub stationinfo: Option<StationDto>,
    pub departures: Option<Departures>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Departures {
    pub number: Option<Scalar>,
    #[serde(default)]
    pub departure: Vec<DepartureDto>,
}

/// One liveboard row.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureDto {
    pub id: Option<Scalar>,
    /// Terminus name.
    #[serde(default)]
    pub station: String,
    pub stationinfo: Option<StationDto>,
    /// Scheduled departure, unix seconds.
    pub time: Scalar,
    /// Delay in seconds.
    pub delay: Option<Scalar>,
    pub canceled: Option<Scalar>,
    /// Full vehicle id, e.g. `BE.NMBS.IC1832`.
    pub vehicle: String,
    pub vehicleinfo: Option<VehicleInfo>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleInfo {
    pub name: Option<String>,
    /// Display name, e.g. `IC 1832`.
    pub shortname: Option<String>,
}

/// Response from `/vehicle/`.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleResponse {
    pub vehicle: Option<String>,
    pub vehicleinfo: Option<VehicleInfo>,
    pub stops: Option<Stops>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stops {
    pub number: Option<Scalar>,
    #[serde(default)]
    pub stop: Vec<StopDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub id: Option<Scalar>,
    pub station: Option<String>,
    pub stationinfo: StationDto,
    pub time: Option<Scalar>,
}

/// Response from `/composition/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompositionResponse {
    pub composition: CompositionDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompositionDto {
    pub segments: Segments,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segments {
    pub number: Option<Scalar>,
    #[serde(default)]
    pub segment: Vec<SegmentDto>,
}

/// The composition between two stations of a journey.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentDto {
    pub id: Option<Scalar>,
    pub composition: SegmentComposition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentComposition {
    pub source: Option<String>,
    pub units: Units,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Units {
    /// Declared number of units; must agree with `unit`.
    pub number: Option<Scalar>,
    #[serde(default)]
    pub unit: Vec<UnitDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    pub id: Option<Scalar>,
    pub material_number: Option<Scalar>,
    pub length_in_meter: Option<Scalar>,
    pub seats_first_class: Option<Scalar>,
    pub seats_second_class: Option<Scalar>,
    pub has_bike_section: Option<Scalar>,
    pub has_priority_places: Option<Scalar>,
    pub has_toilets: Option<Scalar>,
}
