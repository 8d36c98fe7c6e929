//! The locating pipeline.
//!
//! Filter the station's markers and signals down to one track, pick the
//! operative signal group, pick the stop signal for the train's length,
//! project everything onto the platform line, and lay the carriages out.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{
    Composition, Coordinate, Direction, ElementKind, GeoElement, PositionedCarriage,
    SignalDirection, Station, StationId, TrackNumber, TrackSelector, TrainId,
};

use super::config::LocateConfig;
use super::direction::{approach_direction, resolve_operative};
use super::error::LocateError;
use super::filter::{on_track, within_box};
use super::layout::{carriages_from, layout_carriages};
use super::projection::{ProjectedPoint, project_west_to_east};
use super::signals::SignalGroups;
use super::source::{GeoSource, StationDirectory, TrainSource};
use super::stop_signal::{adjusted_carriage_count, select_stop_signal};

/// Markers and signals on one track of a station.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackElements {
    /// Platform markers on the track, in source order.
    pub markers: Vec<GeoElement>,
    pub signals: SignalGroups,
}

/// Where the train head stops and which way the train is facing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopResolution {
    pub stop_signal: GeoElement,
    pub direction: Direction,
    /// Direction tag of the operative signal group.
    pub group: SignalDirection,
    /// Units in the composition.
    pub carriage_count: u32,
    /// Count used to pick the stop signal.
    pub adjusted_count: u32,
}

/// Full carriage layout for the next train on a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformLayout {
    pub station: Station,
    pub track: TrackNumber,
    pub train: TrainId,
    pub direction: Direction,
    pub stop_signal: ProjectedPoint,
    pub carriages: Vec<PositionedCarriage>,
    /// Platform markers, west to east, with their projected positions.
    pub markers: Vec<ProjectedPoint>,
}

/// Locates carriages using injected data sources.
pub struct Locator<'a, S> {
    source: &'a S,
    config: &'a LocateConfig,
}

impl<'a, S> Locator<'a, S>
where
    S: StationDirectory + GeoSource + TrainSource,
{
    pub fn new(source: &'a S, config: &'a LocateConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &LocateConfig {
        self.config
    }

    /// Markers and direction-partitioned signals on a track.
    ///
    /// Fails with `NoGeoData` if the box around the station holds no marker
    /// or no signal at all. An empty subset for the track is not an error.
    pub fn filtered_markers_and_signals(
        &self,
        station: &StationId,
        track: &TrackNumber,
        radius: f64,
    ) -> Result<TrackElements, LocateError> {
        let selector = TrackSelector::new(station.clone(), track.clone());
        let center = self.source.station(station)?.coordinate;

        let markers = self.track_markers(&selector, center, radius, true)?;
        let signals = self.track_signals(&selector, center, radius)?;

        debug!(
            selector = %selector,
            markers = markers.len(),
            forward = signals.forward.len(),
            backward = signals.backward.len(),
            "Filtered track elements"
        );

        Ok(TrackElements { markers, signals })
    }

    /// The stop signal for a train on a track, and its approach direction.
    pub fn resolve_stop_signal_and_direction(
        &self,
        station: &StationId,
        train: &TrainId,
        track: &TrackNumber,
        radius: f64,
    ) -> Result<StopResolution, LocateError> {
        let selector = TrackSelector::new(station.clone(), track.clone());
        let center = self.source.station(station)?.coordinate;
        let signals = self.track_signals(&selector, center, radius)?;
        let composition = self.source.composition(train)?;
        self.resolve_stop(&selector, train, &signals, &composition)
    }

    /// Carriage positions of the next train leaving from a track.
    ///
    /// The station is the first whose name contains `station_name`.
    pub fn compute_carriage_layout(
        &self,
        station_name: &str,
        track: &TrackNumber,
        radius: f64,
    ) -> Result<PlatformLayout, LocateError> {
        let station = self
            .source
            .find_by_name(station_name)?
            .into_iter()
            .next()
            .ok_or_else(|| LocateError::UnknownStation(station_name.to_string()))?;

        let selector = TrackSelector::new(station.id.clone(), track.clone());
        let train = self.source.next_departure_on_track(&station.id, track)?;

        // Markers only give the layout something to be read against; a
        // platform without them still gets carriage positions.
        let signals = self.track_signals(&selector, station.coordinate, radius)?;
        let mut points = self.track_markers(&selector, station.coordinate, radius, false)?;
        let composition = self.source.composition(&train)?;
        let stop = self.resolve_stop(&selector, &train, &signals, &composition)?;

        let stop_ref = stop.stop_signal.element_ref();
        points.push(stop.stop_signal.clone());
        let projected = project_west_to_east(points);

        let carriages = carriages_from(&composition)?;
        let layout = layout_carriages(&projected, stop_ref, carriages, stop.direction)?;

        let stop_signal = projected
            .into_iter()
            .find(|p| p.element.kind == ElementKind::Signal && p.element.element_ref() == stop_ref)
            .ok_or(LocateError::MissingStopSignal { signal: stop_ref })?;

        info!(
            selector = %selector,
            train = %train,
            direction = %stop.direction,
            carriages = layout.carriages.len(),
            head = stop_signal.position,
            "Computed carriage layout"
        );

        Ok(PlatformLayout {
            station,
            track: track.clone(),
            train,
            direction: stop.direction,
            stop_signal,
            carriages: layout.carriages,
            markers: layout.markers,
        })
    }

    /// Platform markers on the track. With `required`, an empty box is
    /// `NoGeoData`; otherwise it just yields no markers.
    fn track_markers(
        &self,
        selector: &TrackSelector,
        center: Coordinate,
        radius: f64,
        required: bool,
    ) -> Result<Vec<GeoElement>, LocateError> {
        let kind = ElementKind::PlatformMarker;
        let inside = within_box(center, radius, self.source.elements(kind)?);
        if required && inside.is_empty() {
            return Err(no_geo_data(selector, kind, radius));
        }
        Ok(on_track(inside, &selector.track))
    }

    /// Signals on the track, split by direction. Always required.
    fn track_signals(
        &self,
        selector: &TrackSelector,
        center: Coordinate,
        radius: f64,
    ) -> Result<SignalGroups, LocateError> {
        let kind = ElementKind::Signal;
        let inside = within_box(center, radius, self.source.elements(kind)?);
        if inside.is_empty() {
            return Err(no_geo_data(selector, kind, radius));
        }
        Ok(SignalGroups::partition(on_track(inside, &selector.track)))
    }

    fn resolve_stop(
        &self,
        selector: &TrackSelector,
        train: &TrainId,
        signals: &SignalGroups,
        composition: &Composition,
    ) -> Result<StopResolution, LocateError> {
        let operative = resolve_operative(selector, signals, || {
            self.next_station_coordinate(&selector.station, train)
        })?;

        let total = composition.total_units();
        if total == 0 {
            return Err(LocateError::MalformedComposition {
                train: train.clone(),
                reason: "composition has no units".to_string(),
            });
        }
        let carriage_count = u32::try_from(total).unwrap_or(u32::MAX);
        let adjusted_count = adjusted_carriage_count(carriage_count, self.config.max_carriages);

        let stop_signal = select_stop_signal(&operative.signals, adjusted_count)
            .cloned()
            .ok_or_else(|| LocateError::NoMatchingSignal {
                station: selector.station.clone(),
                track: selector.track.clone(),
                train: train.clone(),
                wanted: adjusted_count,
            })?;

        let direction = approach_direction(&operative.signals, &self.config.direction_policy);

        debug!(
            selector = %selector,
            train = %train,
            group = %operative.group,
            carriage_count,
            adjusted_count,
            stop_signal = %stop_signal.element_ref(),
            direction = %direction,
            "Resolved stop signal"
        );

        Ok(StopResolution {
            stop_signal,
            direction,
            group: operative.group,
            carriage_count,
            adjusted_count,
        })
    }

    fn next_station_coordinate(
        &self,
        station: &StationId,
        train: &TrainId,
    ) -> Result<Coordinate, LocateError> {
        self.source
            .stops_after(station, train)?
            .first()
            .map(|s| s.coordinate)
            .ok_or_else(|| LocateError::NoNextStation {
                station: station.clone(),
                train: train.clone(),
            })
    }
}

fn no_geo_data(selector: &TrackSelector, kind: ElementKind, radius: f64) -> LocateError {
    LocateError::NoGeoData {
        station: selector.station.clone(),
        track: selector.track.clone(),
        kind,
        radius,
    }
}
