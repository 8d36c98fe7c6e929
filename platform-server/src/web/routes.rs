//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::domain::{StationId, TrackNumber, TrainId};
use crate::locate::{LocateError, Locator};
use crate::snapshot::{FetchError, first_on_track, stations_matching};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(search_stations))
        .route("/api/tracks/elements", get(track_elements))
        .route("/api/stop-signal", get(stop_signal))
        .route("/api/layout", get(carriage_layout))
        .route("/api/traininfo", get(train_info))
        .route("/api/next-train", get(next_train))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stations = state.sources.irail.stations().await.map_err(FetchError::from)?;

    let stations = stations_matching(&stations, &req.q)
        .iter()
        .take(limit)
        .map(StationResult::from_station)
        .collect();

    Ok(Json(StationSearchResponse { stations }))
}

/// Markers and direction-partitioned signals on one track.
async fn track_elements(
    State(state): State<AppState>,
    Query(req): Query<TrackElementsRequest>,
) -> Result<Json<TrackElementsResponse>, AppError> {
    let station = parse_station_id(&req.station_id)?;
    let track = parse_track(&req.track)?;
    let radius = parse_radius(req.radius, state.config.radius)?;

    let snapshot = state.sources.geodata().await?;
    let locator = Locator::new(&snapshot, &state.config);
    let elements = locator.filtered_markers_and_signals(&station, &track, radius)?;

    Ok(Json(TrackElementsResponse::from_elements(
        station.as_str(),
        track.as_str(),
        elements,
    )))
}

/// Stop signal and approach direction for a known train.
async fn stop_signal(
    State(state): State<AppState>,
    Query(req): Query<StopSignalRequest>,
) -> Result<Json<StopSignalResponse>, AppError> {
    let station = parse_station_id(&req.station_id)?;
    let train = TrainId::new(&req.train_id).map_err(|e| AppError::BadRequest {
        message: format!("Invalid train id {:?}: {e}", req.train_id),
    })?;
    let track = parse_track(&req.track)?;
    let radius = parse_radius(req.radius, state.config.radius)?;

    let snapshot = state.sources.for_train(&train).await?;
    let locator = Locator::new(&snapshot, &state.config);
    let stop = locator.resolve_stop_signal_and_direction(&station, &train, &track, radius)?;

    Ok(Json(StopSignalResponse::from_resolution(
        station.as_str(),
        train.as_str(),
        track.as_str(),
        stop,
    )))
}

/// Carriage positions of the next train on a track.
async fn carriage_layout(
    State(state): State<AppState>,
    Query(req): Query<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let track = parse_track(&req.track)?;
    let radius = parse_radius(req.radius, state.config.radius)?;

    let snapshot = state.sources.for_layout(&req.station, &track).await?;
    let locator = Locator::new(&snapshot, &state.config);
    let layout = locator.compute_carriage_layout(&req.station, &track, radius)?;

    info!(
        station = %layout.station.id,
        track = %layout.track,
        train = %layout.train,
        direction = %layout.direction,
        "Served carriage layout"
    );

    Ok(Json(LayoutResponse::from_layout(&layout)))
}

/// Composition summary of every departure on a station's board.
///
/// Departures whose composition cannot be fetched are left out.
async fn train_info(
    State(state): State<AppState>,
    Query(req): Query<TrainInfoRequest>,
) -> Result<Json<TrainInfoResponse>, AppError> {
    let irail = &state.sources.irail;
    let stations = irail.stations().await.map_err(FetchError::from)?;
    let station = stations_matching(&stations, &req.station_name)
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound {
            message: "No matching station found".to_string(),
        })?;

    let board = irail.liveboard(&station.id).await.map_err(FetchError::from)?;
    if board.is_empty() {
        return Err(AppError::NotFound {
            message: "No departures found".to_string(),
        });
    }

    let compositions = join_all(board.iter().map(|d| irail.composition(&d.train))).await;

    let trains = board
        .iter()
        .zip(compositions)
        .filter_map(|(departure, composition)| match composition {
            Ok(composition) => Some(TrainInfo::from_departure(departure, &composition)),
            Err(e) => {
                debug!(train = %departure.train, error = %e, "No composition");
                None
            }
        })
        .collect();

    Ok(Json(TrainInfoResponse {
        station_name: station.name.clone(),
        station_id: station.id.to_string(),
        number_of_departures: board.len(),
        trains,
    }))
}

/// The next departure from a track.
async fn next_train(
    State(state): State<AppState>,
    Query(req): Query<NextTrainRequest>,
) -> Result<Json<NextTrainResponse>, AppError> {
    let track = parse_track(&req.track)?;
    let irail = &state.sources.irail;

    let stations = irail.stations().await.map_err(FetchError::from)?;
    let station = stations_matching(&stations, &req.station)
        .into_iter()
        .next()
        .ok_or_else(|| LocateError::UnknownStation(req.station.clone()))?;

    let board = irail.liveboard(&station.id).await.map_err(FetchError::from)?;
    let departure =
        first_on_track(&board, &track).ok_or_else(|| LocateError::NoDepartureOnTrack {
            station: station.id.clone(),
            track: track.clone(),
        })?;

    Ok(Json(NextTrainResponse::from_departure(&station, departure)))
}

fn parse_station_id(raw: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid station id {raw:?}: {e}"),
    })
}

fn parse_track(raw: &str) -> Result<TrackNumber, AppError> {
    TrackNumber::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid track {raw:?}: {e}"),
    })
}

fn parse_radius(raw: Option<f64>, default: f64) -> Result<f64, AppError> {
    match raw {
        None => Ok(default),
        Some(r) if r.is_finite() && r > 0.0 && r < 1.0 => Ok(r),
        Some(r) => Err(AppError::BadRequest {
            message: format!("Radius must be between 0 and 1 degree, got {r}"),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The data needed to place the train is inconsistent or incomplete.
    Unprocessable { message: String },
    /// An upstream service failed.
    BadGateway { message: String },
    Internal { message: String },
}

impl From<LocateError> for AppError {
    fn from(e: LocateError) -> Self {
        let message = e.to_string();
        match e {
            LocateError::UnknownStation(_) | LocateError::NoDepartureOnTrack { .. } => {
                AppError::NotFound { message }
            }
            LocateError::Source { .. } => AppError::BadGateway { message },
            _ if e.is_data_inconsistency() => AppError::Unprocessable {
                message: format!("Position unavailable: {message}"),
            },
            _ => AppError::Unprocessable { message },
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        let message = e.to_string();
        match e {
            FetchError::Irail(ref inner) if !inner.is_upstream() => AppError::Internal { message },
            _ => AppError::BadGateway { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = %status, "{message}");
        } else {
            warn!(status = %status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
