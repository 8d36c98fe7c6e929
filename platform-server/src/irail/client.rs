//! iRail HTTP client.
//!
//! Provides async methods for the four iRail endpoints the locator needs:
//! the station list, a station's liveboard, a vehicle's stops, and a
//! vehicle's composition. Responses are converted to domain types here.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Composition, Departure, Station, StationId, TrainId};

use super::convert::{convert_composition, convert_liveboard, convert_route, convert_stations};
use super::error::IrailError;
use super::types::{CompositionResponse, LiveboardResponse, StationsResponse, VehicleResponse};

/// Default base URL for the iRail API.
pub const DEFAULT_BASE_URL: &str = "https://api.irail.be";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// iRail asks clients to identify themselves.
const DEFAULT_USER_AGENT: &str = concat!("platform-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the iRail client.
#[derive(Debug, Clone)]
pub struct IrailConfig {
    /// Base URL for the API (defaults to production iRail)
    pub base_url: String,
    /// Language for station names
    pub lang: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl Default for IrailConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "en".to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl IrailConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

/// iRail API client.
///
/// Uses a semaphore to limit concurrent requests; iRail rate-limits
/// aggressive clients.
#[derive(Debug, Clone)]
pub struct IrailClient {
    http: reqwest::Client,
    base_url: String,
    lang: String,
    semaphore: Arc<Semaphore>,
}

impl IrailClient {
    /// Create a new iRail client with the given configuration.
    pub fn new(config: IrailConfig) -> Result<Self, IrailError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|_| IrailError::Api {
            status: 0,
            message: "Invalid user agent".to_string(),
        })?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            lang: config.lang,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Language station names are returned in.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Every NMBS station, with coordinates.
    pub async fn stations(&self) -> Result<Vec<Station>, IrailError> {
        let resp: StationsResponse = self.get_json("stations", &[]).await?;
        Ok(convert_stations(&resp.station))
    }

    /// Departures from a station, starting at `at` (or now).
    pub async fn liveboard(
        &self,
        station: &StationId,
        at: Option<NaiveDateTime>,
    ) -> Result<Vec<Departure>, IrailError> {
        let mut query = vec![
            ("id", station.as_str().to_string()),
            ("arrdep", "departure".to_string()),
        ];
        if let Some(at) = at {
            query.push(("date", at.format("%d%m%y").to_string()));
            query.push(("time", at.format("%H%M").to_string()));
        }

        let board: LiveboardResponse = self.get_json("liveboard", &query).await?;
        let departures = convert_liveboard(&board);
        debug!(station = %station, departures = departures.len(), "Fetched liveboard");
        Ok(departures)
    }

    /// Stations a vehicle calls at today, in route order.
    pub async fn vehicle_route(&self, train: &TrainId) -> Result<Vec<Station>, IrailError> {
        let query = [("id", train.as_str().to_string())];
        let vehicle: VehicleResponse = self.get_json("vehicle", &query).await?;
        Ok(convert_route(&vehicle)?)
    }

    /// A vehicle's composition.
    pub async fn composition(&self, train: &TrainId) -> Result<Composition, IrailError> {
        let query = [
            ("id", train.short_name().to_string()),
            ("data", "all".to_string()),
        ];
        let resp: CompositionResponse = self.get_json("composition", &query).await?;
        let composition = convert_composition(train, &resp)?;
        debug!(train = %train, units = composition.total_units(), "Fetched composition");
        Ok(composition)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, IrailError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| IrailError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}/", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("lang", self.lang.as_str()),
                ("alerts", "false"),
            ])
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(IrailError::NotFound(format!("{endpoint}: {body}")));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IrailError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| IrailError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
