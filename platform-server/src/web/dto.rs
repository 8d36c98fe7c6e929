//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CarriageRole, Composition, Departure, Direction, GeoElement, OsmType, SeatClass,
    SignalDirection, Station, UnitFeature,
};
use crate::locate::{PlatformLayout, ProjectedPoint, StopResolution, TrackElements};

/// Request to search stations by name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Name fragment, matched case-insensitively
    pub q: String,

    /// Maximum results (default 10, max 50)
    pub limit: Option<usize>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationResult>,
}

/// Request for the markers and signals of one track.
#[derive(Debug, Deserialize)]
pub struct TrackElementsRequest {
    pub station_id: String,
    pub track: String,
    /// Bounding box half-width in degrees
    pub radius: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TrackElementsResponse {
    pub station_id: String,
    pub track: String,
    /// Platform markers in source order
    pub markers: Vec<GeoElement>,
    /// Forward signals, ascending by `ref`
    pub forward: Vec<GeoElement>,
    /// Backward signals, ascending by `ref`
    pub backward: Vec<GeoElement>,
}

/// Request for a train's stop signal on a track.
#[derive(Debug, Deserialize)]
pub struct StopSignalRequest {
    pub station_id: String,
    pub train_id: String,
    pub track: String,
    pub radius: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StopSignalResponse {
    pub station_id: String,
    pub train_id: String,
    pub track: String,
    pub stop_signal: GeoElement,
    pub direction: Direction,
    /// Signal group the stop signal was taken from
    pub group: SignalDirection,
    pub carriage_count: u32,
    pub adjusted_count: u32,
}

/// Request for the carriage layout of the next train on a track.
#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    /// Station name fragment
    pub station: String,
    pub track: String,
    pub radius: Option<f64>,
}

/// A carriage in a layout.
#[derive(Debug, Serialize)]
pub struct CarriageResult {
    /// 1-based, from the head of the train
    pub index: u32,
    /// Metres from the westmost marker
    pub position: f64,
    pub length_m: f64,
    pub role: CarriageRole,
    pub seat_class: SeatClass,
    pub material_number: Option<String>,
}

/// A projected marker or signal.
#[derive(Debug, Serialize)]
pub struct PointResult {
    pub id: u64,
    pub osm_type: OsmType,
    pub position: f64,
    pub lat: f64,
    pub lon: f64,
    /// The element's `ref` tag, if any
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub station_id: String,
    pub station_name: String,
    pub track: String,
    pub train_id: String,
    pub direction: Direction,
    pub stop_signal: PointResult,
    pub carriages: Vec<CarriageResult>,
    /// Platform markers, west to east
    pub markers: Vec<PointResult>,
}

/// Request for the train-info summary of a station.
#[derive(Debug, Deserialize)]
pub struct TrainInfoRequest {
    pub station_name: String,
}

/// One carriage in a train-info summary.
#[derive(Debug, Serialize)]
pub struct CarriageInfo {
    /// Material number, if known
    pub number: Option<String>,
    pub class: SeatClass,
    pub features: Vec<UnitFeature>,
}

#[derive(Debug, Serialize)]
pub struct SegmentInfo {
    pub segment_id: String,
    pub carriages: Vec<CarriageInfo>,
}

#[derive(Debug, Serialize)]
pub struct TrainInfo {
    pub departure_id: String,
    pub platform: Option<String>,
    pub train_id: String,
    pub train_name: String,
    pub destination: String,
    pub segments: Vec<SegmentInfo>,
}

#[derive(Debug, Serialize)]
pub struct TrainInfoResponse {
    pub station_name: String,
    pub station_id: String,
    /// Departures on the board, including those without a composition
    pub number_of_departures: usize,
    pub trains: Vec<TrainInfo>,
}

/// Request for the next departure on a track.
#[derive(Debug, Deserialize)]
pub struct NextTrainRequest {
    pub station: String,
    pub track: String,
}

#[derive(Debug, Serialize)]
pub struct NextTrainResponse {
    pub station_id: String,
    pub station_name: String,
    pub track: String,
    pub train_id: String,
    pub train_name: String,
    pub destination: String,
    pub scheduled: DateTime<Utc>,
    pub expected: DateTime<Utc>,
    pub delay_secs: i64,
    pub is_canceled: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            lat: station.coordinate.lat,
            lon: station.coordinate.lon,
        }
    }
}

impl TrackElementsResponse {
    pub fn from_elements(station_id: &str, track: &str, elements: TrackElements) -> Self {
        Self {
            station_id: station_id.to_string(),
            track: track.to_string(),
            forward: elements.signals.ordered(SignalDirection::Forward),
            backward: elements.signals.ordered(SignalDirection::Backward),
            markers: elements.markers,
        }
    }
}

impl StopSignalResponse {
    pub fn from_resolution(
        station_id: &str,
        train_id: &str,
        track: &str,
        stop: StopResolution,
    ) -> Self {
        Self {
            station_id: station_id.to_string(),
            train_id: train_id.to_string(),
            track: track.to_string(),
            stop_signal: stop.stop_signal,
            direction: stop.direction,
            group: stop.group,
            carriage_count: stop.carriage_count,
            adjusted_count: stop.adjusted_count,
        }
    }
}

impl PointResult {
    pub fn from_point(point: &ProjectedPoint) -> Self {
        Self {
            id: point.element.id,
            osm_type: point.element.osm_type,
            position: point.position,
            lat: point.element.coordinate.lat,
            lon: point.element.coordinate.lon,
            reference: point.element.signal_ref().map(str::to_string),
        }
    }
}

impl LayoutResponse {
    pub fn from_layout(layout: &PlatformLayout) -> Self {
        Self {
            station_id: layout.station.id.to_string(),
            station_name: layout.station.name.clone(),
            track: layout.track.to_string(),
            train_id: layout.train.to_string(),
            direction: layout.direction,
            stop_signal: PointResult::from_point(&layout.stop_signal),
            carriages: layout
                .carriages
                .iter()
                .map(|c| CarriageResult {
                    index: c.carriage.index,
                    position: c.position,
                    length_m: c.carriage.length_m,
                    role: c.role,
                    seat_class: c.carriage.seat_class,
                    material_number: c.carriage.material_number.clone(),
                })
                .collect(),
            markers: layout.markers.iter().map(PointResult::from_point).collect(),
        }
    }
}

impl TrainInfo {
    pub fn from_departure(departure: &Departure, composition: &Composition) -> Self {
        Self {
            departure_id: departure.id.clone(),
            platform: departure.platform.clone(),
            train_id: departure.train.to_string(),
            train_name: departure.train_name.clone(),
            destination: departure.destination.clone(),
            segments: composition
                .segments
                .iter()
                .map(|seg| SegmentInfo {
                    segment_id: seg.id.clone(),
                    carriages: seg
                        .units
                        .iter()
                        .map(|u| CarriageInfo {
                            number: u.material_number.clone(),
                            class: u.seat_class(),
                            features: u.features(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl NextTrainResponse {
    pub fn from_departure(station: &Station, departure: &Departure) -> Self {
        Self {
            station_id: station.id.to_string(),
            station_name: station.name.clone(),
            track: departure.platform.clone().unwrap_or_default(),
            train_id: departure.train.to_string(),
            train_name: departure.train_name.clone(),
            destination: departure.destination.clone(),
            scheduled: departure.scheduled,
            expected: departure.expected(),
            delay_secs: departure.delay_secs,
            is_canceled: departure.is_canceled,
        }
    }
}
