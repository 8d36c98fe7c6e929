//! Per-request data snapshots.
//!
//! The locator is synchronous and never fetches. A request handler first
//! gathers everything the operation may need from the cached clients, then
//! runs the locator against the resulting [`RequestSnapshot`].
//!
//! Data the operation might not need is fetched eagerly but allowed to
//! fail: a missing route only matters if both signal groups are populated,
//! so a route fetch error is recorded and reported only when asked for.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CachedIrailClient, CachedOverpassClient};
use crate::domain::{
    Composition, Departure, ElementKind, GeoElement, Station, StationId, TrackNumber, TrainId,
};
use crate::irail::IrailError;
use crate::locate::LocateError;
use crate::locate::source::{GeoSource, StationDirectory, TrainSource};
use crate::overpass::OverpassError;

/// Errors while gathering a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("iRail: {0}")]
    Irail(#[from] IrailError),

    #[error("Overpass: {0}")]
    Overpass(#[from] OverpassError),
}

/// All stations whose name contains `query`, case-insensitively.
pub fn stations_matching(stations: &[Station], query: &str) -> Vec<Station> {
    stations
        .iter()
        .filter(|s| s.name_matches(query))
        .cloned()
        .collect()
}

/// The first departure on the board that leaves from `track`.
pub fn first_on_track<'a>(
    departures: &'a [Departure],
    track: &TrackNumber,
) -> Option<&'a Departure> {
    departures.iter().find(|d| d.is_on_track(track))
}

/// Everything one locator call may read.
#[derive(Debug, Clone, Default)]
pub struct RequestSnapshot {
    stations: Arc<Vec<Station>>,
    markers: Arc<Vec<GeoElement>>,
    signals: Arc<Vec<GeoElement>>,
    boards: HashMap<StationId, Arc<Vec<Departure>>>,
    routes: HashMap<TrainId, Result<Arc<Vec<Station>>, String>>,
    compositions: HashMap<TrainId, Result<Arc<Composition>, String>>,
}

impl RequestSnapshot {
    pub fn new(
        stations: Arc<Vec<Station>>,
        markers: Arc<Vec<GeoElement>>,
        signals: Arc<Vec<GeoElement>>,
    ) -> Self {
        Self {
            stations,
            markers,
            signals,
            ..Self::default()
        }
    }

    pub fn with_board(mut self, station: StationId, departures: Arc<Vec<Departure>>) -> Self {
        self.boards.insert(station, departures);
        self
    }

    /// Record a train's route, or why it could not be fetched.
    pub fn with_route(
        mut self,
        train: TrainId,
        route: Result<Arc<Vec<Station>>, String>,
    ) -> Self {
        self.routes.insert(train, route);
        self
    }

    /// Record a train's composition, or why it is malformed.
    pub fn with_composition(
        mut self,
        train: TrainId,
        composition: Result<Arc<Composition>, String>,
    ) -> Self {
        self.compositions.insert(train, composition);
        self
    }
}

impl StationDirectory for RequestSnapshot {
    fn station(&self, id: &StationId) -> Result<Station, LocateError> {
        self.stations
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| LocateError::UnknownStation(id.to_string()))
    }

    fn find_by_name(&self, query: &str) -> Result<Vec<Station>, LocateError> {
        Ok(stations_matching(&self.stations, query))
    }
}

impl GeoSource for RequestSnapshot {
    fn elements(&self, kind: ElementKind) -> Result<Vec<GeoElement>, LocateError> {
        Ok(match kind {
            ElementKind::PlatformMarker => self.markers.to_vec(),
            ElementKind::Signal => self.signals.to_vec(),
        })
    }
}

impl TrainSource for RequestSnapshot {
    fn stops_after(
        &self,
        station: &StationId,
        train: &TrainId,
    ) -> Result<Vec<Station>, LocateError> {
        let route = match self.routes.get(train) {
            Some(Ok(route)) => route,
            Some(Err(message)) => {
                return Err(LocateError::Source {
                    message: message.clone(),
                });
            }
            None => {
                return Err(LocateError::Source {
                    message: format!("route of {train} was not fetched"),
                });
            }
        };

        let pos = route
            .iter()
            .position(|s| &s.id == station)
            .ok_or_else(|| LocateError::StationNotOnRoute {
                station: station.clone(),
                train: train.clone(),
            })?;
        Ok(route[pos + 1..].to_vec())
    }

    fn composition(&self, train: &TrainId) -> Result<Composition, LocateError> {
        match self.compositions.get(train) {
            Some(Ok(composition)) => Ok(composition.as_ref().clone()),
            Some(Err(reason)) => Err(LocateError::MalformedComposition {
                train: train.clone(),
                reason: reason.clone(),
            }),
            None => Err(LocateError::Source {
                message: format!("composition of {train} was not fetched"),
            }),
        }
    }

    fn next_departure_on_track(
        &self,
        station: &StationId,
        track: &TrackNumber,
    ) -> Result<TrainId, LocateError> {
        self.boards
            .get(station)
            .and_then(|board| first_on_track(board, track))
            .map(|d| d.train.clone())
            .ok_or_else(|| LocateError::NoDepartureOnTrack {
                station: station.clone(),
                track: track.clone(),
            })
    }
}

/// The cached upstream clients a snapshot is gathered from.
#[derive(Clone)]
pub struct DataSources {
    pub irail: Arc<CachedIrailClient>,
    pub overpass: Arc<CachedOverpassClient>,
}

impl DataSources {
    pub fn new(irail: CachedIrailClient, overpass: CachedOverpassClient) -> Self {
        Self {
            irail: Arc::new(irail),
            overpass: Arc::new(overpass),
        }
    }

    /// Stations plus both kinds of geodata.
    pub async fn geodata(&self) -> Result<RequestSnapshot, FetchError> {
        let (stations, markers, signals) = tokio::join!(
            self.irail.stations(),
            self.overpass.elements(ElementKind::PlatformMarker),
            self.overpass.elements(ElementKind::Signal),
        );
        Ok(RequestSnapshot::new(stations?, markers?, signals?))
    }

    /// Geodata plus the route and composition of one train.
    pub async fn for_train(&self, train: &TrainId) -> Result<RequestSnapshot, FetchError> {
        let snapshot = self.geodata().await?;
        self.add_train(snapshot, train).await
    }

    /// Geodata, the station's board, and the next train on `track`.
    ///
    /// Stations and departures that cannot be found are left out; the
    /// locator reports them with the right error.
    pub async fn for_layout(
        &self,
        station_name: &str,
        track: &TrackNumber,
    ) -> Result<RequestSnapshot, FetchError> {
        let snapshot = self.geodata().await?;
        let Some(station) = stations_matching(&snapshot.stations, station_name)
            .into_iter()
            .next()
        else {
            return Ok(snapshot);
        };

        let board = self.irail.liveboard(&station.id).await?;
        let train = first_on_track(&board, track).map(|d| d.train.clone());
        let snapshot = snapshot.with_board(station.id.clone(), board);

        match train {
            Some(train) => self.add_train(snapshot, &train).await,
            None => Ok(snapshot),
        }
    }

    async fn add_train(
        &self,
        snapshot: RequestSnapshot,
        train: &TrainId,
    ) -> Result<RequestSnapshot, FetchError> {
        let (composition, route) =
            tokio::join!(self.irail.composition(train), self.irail.route(train));

        let composition = match composition {
            Ok(c) => Ok(c),
            Err(IrailError::Conversion(e)) => Err(e.to_string()),
            Err(e) => return Err(e.into()),
        };

        let route = route.map_err(|e| {
            warn!(train = %train, error = %e, "Route unavailable");
            format!("route of {train} unavailable: {e}")
        });

        debug!(train = %train, "Gathered train data");
        Ok(snapshot
            .with_composition(train.clone(), composition)
            .with_route(train.clone(), route))
    }
}
