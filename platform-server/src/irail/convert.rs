//! Conversion from iRail DTOs to domain types.
//!
//! Everything that enters the core is validated here: station ids and
//! coordinates, departure times, unit lengths and counts. A malformed
//! station or departure is skipped with a warning; a malformed composition
//! fails as a whole, since a layout built from part of a train is wrong.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{
    Composition, CompositionSegment, Coordinate, Departure, Station, StationId, TrainId, Unit,
};

use super::types::{
    CompositionResponse, DepartureDto, LiveboardResponse, Scalar, StationDto, UnitDto,
    VehicleResponse,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid station id: {0}")]
    InvalidStationId(String),

    #[error("invalid coordinate for station {station}: ({lat}, {lon})")]
    InvalidCoordinate {
        station: String,
        lat: String,
        lon: String,
    },

    #[error("invalid train id: {0}")]
    InvalidTrainId(String),

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A unit lacks a usable length or seat count.
    #[error("segment {segment} unit {unit}: {reason}")]
    InvalidUnit {
        segment: String,
        unit: String,
        reason: String,
    },

    /// A segment's declared unit count disagrees with its unit list.
    #[error("segment {segment} declares {declared} units but lists {listed}")]
    UnitCountMismatch {
        segment: String,
        declared: u32,
        listed: usize,
    },
}

/// Convert one station, validating its id and coordinate.
pub fn convert_station(dto: &StationDto) -> Result<Station, ConversionError> {
    let id = StationId::parse(&dto.id)
        .map_err(|_| ConversionError::InvalidStationId(dto.id.clone()))?;

    let invalid = || ConversionError::InvalidCoordinate {
        station: dto.id.clone(),
        lat: dto.location_y.clone(),
        lon: dto.location_x.clone(),
    };
    let lat: f64 = dto.location_y.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = dto.location_x.trim().parse().map_err(|_| invalid())?;
    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_valid() {
        return Err(invalid());
    }

    Ok(Station::new(id, dto.name.clone(), coordinate))
}

/// Convert the station list, skipping invalid entries.
pub fn convert_stations(dtos: &[StationDto]) -> Vec<Station> {
    dtos.iter()
        .filter_map(|dto| match convert_station(dto) {
            Ok(station) => Some(station),
            Err(e) => {
                warn!(station = %dto.id, error = %e, "Skipping station");
                None
            }
        })
        .collect()
}

/// Convert a liveboard, skipping departures that fail validation.
pub fn convert_liveboard(board: &LiveboardResponse) -> Vec<Departure> {
    let rows = board
        .departures
        .as_ref()
        .map(|d| d.departure.as_slice())
        .unwrap_or(&[]);

    rows.iter()
        .filter_map(|row| match convert_departure(row) {
            Ok(departure) => Some(departure),
            Err(e) => {
                warn!(vehicle = %row.vehicle, error = %e, "Skipping departure");
                None
            }
        })
        .collect()
}

/// Convert one liveboard row.
pub fn convert_departure(row: &DepartureDto) -> Result<Departure, ConversionError> {
    let train = TrainId::new(&row.vehicle)
        .map_err(|_| ConversionError::InvalidTrainId(row.vehicle.clone()))?;

    let scheduled = parse_unix_time(&row.time)?;
    let delay_secs = row
        .delay
        .as_ref()
        .and_then(Scalar::as_f64)
        .map(|d| d as i64)
        .unwrap_or(0);

    let train_name = row
        .vehicleinfo
        .as_ref()
        .and_then(|v| v.shortname.clone())
        .unwrap_or_else(|| train.short_name().to_string());

    let destination_id = row
        .stationinfo
        .as_ref()
        .and_then(|s| StationId::parse(&s.id).ok());

    let platform = row
        .platform
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty() && *p != "?")
        .map(str::to_string);

    Ok(Departure {
        id: row.id.as_ref().map(scalar_text).unwrap_or_default(),
        train,
        train_name,
        destination: row.station.clone(),
        destination_id,
        scheduled,
        delay_secs,
        platform,
        is_canceled: row.canceled.as_ref().is_some_and(Scalar::as_flag),
    })
}

/// Stations a vehicle calls at, in route order.
pub fn convert_route(vehicle: &VehicleResponse) -> Result<Vec<Station>, ConversionError> {
    let stops = vehicle
        .stops
        .as_ref()
        .ok_or(ConversionError::MissingField("stops"))?;

    stops
        .stop
        .iter()
        .map(|stop| convert_station(&stop.stationinfo))
        .collect()
}

/// Convert a composition, checking every unit has a positive length.
pub fn convert_composition(
    train: &TrainId,
    resp: &CompositionResponse,
) -> Result<Composition, ConversionError> {
    let segments = resp
        .composition
        .segments
        .segment
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let segment_id = seg
                .id
                .as_ref()
                .map(scalar_text)
                .unwrap_or_else(|| i.to_string());
            let units = &seg.composition.units;

            if let Some(declared) = units.number.as_ref().and_then(Scalar::as_u32)
                && declared as usize != units.unit.len()
            {
                return Err(ConversionError::UnitCountMismatch {
                    segment: segment_id,
                    declared,
                    listed: units.unit.len(),
                });
            }

            let units = units
                .unit
                .iter()
                .enumerate()
                .map(|(j, unit)| convert_unit(&segment_id, j, unit))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(CompositionSegment {
                id: segment_id,
                units,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Composition::new(train.clone(), segments))
}

fn convert_unit(segment: &str, index: usize, dto: &UnitDto) -> Result<Unit, ConversionError> {
    let id = dto
        .id
        .as_ref()
        .map(scalar_text)
        .unwrap_or_else(|| index.to_string());

    let invalid = |reason: String| ConversionError::InvalidUnit {
        segment: segment.to_string(),
        unit: id.clone(),
        reason,
    };

    let length_m = match &dto.length_in_meter {
        None => return Err(invalid("missing length".to_string())),
        Some(raw) => raw
            .as_f64()
            .filter(|l| l.is_finite() && *l > 0.0)
            .ok_or_else(|| invalid(format!("invalid length {}", scalar_text(raw))))?,
    };

    let seats = |field: &Option<Scalar>, name: &str| -> Result<u32, ConversionError> {
        match field {
            None => Ok(0),
            Some(raw) => raw
                .as_u32()
                .ok_or_else(|| invalid(format!("invalid {name} {}", scalar_text(raw)))),
        }
    };

    let mut unit = Unit::new(id.clone(), length_m);
    unit.material_number = dto.material_number.as_ref().map(scalar_text);
    unit.seats_first_class = seats(&dto.seats_first_class, "first class seats")?;
    unit.seats_second_class = seats(&dto.seats_second_class, "second class seats")?;
    unit.has_bike_section = dto.has_bike_section.as_ref().is_some_and(Scalar::as_flag);
    unit.has_priority_places = dto.has_priority_places.as_ref().is_some_and(Scalar::as_flag);
    unit.has_toilets = dto.has_toilets.as_ref().is_some_and(Scalar::as_flag);
    Ok(unit)
}

fn parse_unix_time(raw: &Scalar) -> Result<DateTime<Utc>, ConversionError> {
    let secs = match raw {
        Scalar::Text(s) => s.trim().parse::<i64>().ok(),
        Scalar::Number(n) if n.fract() == 0.0 => Some(*n as i64),
        _ => None,
    };
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .ok_or_else(|| ConversionError::InvalidTime(scalar_text(raw)))
}

fn scalar_text(s: &Scalar) -> String {
    match s {
        Scalar::Text(t) => t.clone(),
        Scalar::Number(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SeatClass, TrackNumber};

    fn station_dto(id: &str, lat: &str, lon: &str) -> StationDto {
        StationDto {
            id: id.to_string(),
            name: "Brugge".to_string(),
            location_x: lon.to_string(),
            location_y: lat.to_string(),
            standardname: None,
        }
    }

    #[test]
    fn station_coordinates_swap_axes() {
        let station = convert_station(&station_dto("BE.NMBS.008891009", "51.197226", "3.216726"))
            .unwrap();
        assert_eq!(station.coordinate.lat, 51.197226);
        assert_eq!(station.coordinate.lon, 3.216726);
    }

    #[test]
    fn invalid_stations_are_skipped() {
        let stations = convert_stations(&[
            station_dto("BE.NMBS.008891009", "51.197226", "3.216726"),
            station_dto("BE.NMBS.008891010", "not a number", "3.2"),
            station_dto("BE.NMBS.008891011", "95.0", "3.2"),
            station_dto("bad id!", "51.0", "3.2"),
        ]);
        assert_eq!(stations.len(), 1);
    }

    #[test]
    fn liveboard_rows() {
        let json = r#"{
            "station": "Brugge",
            "departures": { "number": "2", "departure": [
                {
                    "id": "0",
                    "station": "Oostende",
                    "stationinfo": {
                        "id": "BE.NMBS.008891702", "name": "Oostende",
                        "locationX": "2.925809", "locationY": "51.228212"
                    },
                    "time": "1716383520",
                    "delay": "180",
                    "canceled": "0",
                    "vehicle": "BE.NMBS.IC1832",
                    "vehicleinfo": { "name": "BE.NMBS.IC1832", "shortname": "IC 1832" },
                    "platform": "5"
                },
                {
                    "id": "1",
                    "station": "Kortrijk",
                    "time": "garbage",
                    "vehicle": "BE.NMBS.IC2033",
                    "platform": "3"
                }
            ]}
        }"#;
        let board: LiveboardResponse = serde_json::from_str(json).unwrap();
        let departures = convert_liveboard(&board);

        assert_eq!(departures.len(), 1);
        let d = &departures[0];
        assert_eq!(d.train.as_str(), "BE.NMBS.IC1832");
        assert_eq!(d.train_name, "IC 1832");
        assert_eq!(d.delay_secs, 180);
        assert_eq!(d.scheduled.timestamp(), 1_716_383_520);
        assert!(d.is_on_track(&TrackNumber::from(5)));
        assert!(!d.is_canceled);
        assert_eq!(
            d.destination_id.as_ref().map(StationId::as_str),
            Some("BE.NMBS.008891702")
        );
    }

    #[test]
    fn unknown_platform_is_none() {
        let json = r#"{
            "time": "1716383520", "vehicle": "BE.NMBS.S51507", "platform": "?"
        }"#;
        let row: DepartureDto = serde_json::from_str(json).unwrap();
        assert_eq!(convert_departure(&row).unwrap().platform, None);
    }

    #[test]
    fn route_in_stop_order() {
        let json = r#"{
            "vehicle": "BE.NMBS.IC1832",
            "stops": { "number": "2", "stop": [
                { "id": "0", "station": "Brugge", "time": "1716383520",
                  "stationinfo": { "id": "BE.NMBS.008891009", "name": "Brugge",
                                   "locationX": "3.216726", "locationY": "51.197226" } },
                { "id": "1", "station": "Oostende", "time": "1716384600",
                  "stationinfo": { "id": "BE.NMBS.008891702", "name": "Oostende",
                                   "locationX": "2.925809", "locationY": "51.228212" } }
            ]}
        }"#;
        let vehicle: VehicleResponse = serde_json::from_str(json).unwrap();
        let route = convert_route(&vehicle).unwrap();
        let names: Vec<_> = route.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Brugge", "Oostende"]);
    }

    fn composition_json(units_number: &str, second_length: &str) -> String {
        format!(
            r#"{{ "composition": {{ "segments": {{ "number": "1", "segment": [{{
                "id": "0",
                "composition": {{ "units": {{ "number": "{units_number}", "unit": [
                    {{ "id": "0", "materialNumber": "4301", "lengthInMeter": "19.1",
                       "seatsFirstClass": "0", "seatsSecondClass": "0" }},
                    {{ "id": "1", "materialNumber": "521", "lengthInMeter": "{second_length}",
                       "seatsFirstClass": "10", "seatsSecondClass": "70",
                       "hasBikeSection": "1", "hasPriorityPlaces": "1" }}
                ]}}}}
            }}]}}}}}}"#
        )
    }

    fn train() -> TrainId {
        TrainId::new("IC1832").unwrap()
    }

    #[test]
    fn composition_units() {
        let resp: CompositionResponse =
            serde_json::from_str(&composition_json("2", "26.4")).unwrap();
        let composition = convert_composition(&train(), &resp).unwrap();

        assert_eq!(composition.total_units(), 2);
        let unit = &composition.segments[0].units[1];
        assert_eq!(unit.length_m, 26.4);
        assert_eq!(unit.material_number.as_deref(), Some("521"));
        assert_eq!(unit.seat_class(), SeatClass::Second);
        assert!(unit.has_bike_section && unit.has_priority_places);
    }

    #[test]
    fn unit_count_mismatch_is_rejected() {
        let resp: CompositionResponse =
            serde_json::from_str(&composition_json("3", "26.4")).unwrap();
        let err = convert_composition(&train(), &resp).unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnitCountMismatch {
                segment: "0".to_string(),
                declared: 3,
                listed: 2,
            }
        );
    }

    #[test]
    fn non_numeric_length_is_rejected() {
        let resp: CompositionResponse =
            serde_json::from_str(&composition_json("2", "long")).unwrap();
        let err = convert_composition(&train(), &resp).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidUnit { ref unit, .. } if unit == "1"));
    }

    #[test]
    fn zero_length_is_rejected() {
        let resp: CompositionResponse =
            serde_json::from_str(&composition_json("2", "0")).unwrap();
        assert!(convert_composition(&train(), &resp).is_err());
    }
}
