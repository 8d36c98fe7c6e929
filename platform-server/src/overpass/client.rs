//! Overpass HTTP client.
//!
//! Fetches every `railway=<kind>` element inside one country area. The
//! result is large and changes rarely, so callers are expected to cache it.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{info, warn};

use crate::domain::{ElementKind, GeoElement};

use super::convert::convert_response;
use super::error::OverpassError;
use super::types::OverpassResponse;

/// Default Overpass interpreter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default area: Belgium, by ISO 3166-1 code.
pub const DEFAULT_AREA: &str = "BE";

/// Server-side query timeout, in seconds.
const QUERY_TIMEOUT_SECS: u64 = 180;

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter URL
    pub base_url: String,
    /// ISO 3166-1 alpha-2 code of the country to search
    pub area: String,
    /// Client-side request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            area: DEFAULT_AREA.to_string(),
            // Longer than the server-side timeout so the server reports first.
            timeout_secs: QUERY_TIMEOUT_SECS + 20,
        }
    }
}

impl OverpassConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Build the Overpass QL query for every element of a kind in an area.
pub fn build_query(kind: ElementKind, area: &str) -> String {
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\
         area[\"ISO3166-1\"=\"{area}\"][admin_level=2]->.searchArea;\
         nwr[\"railway\"=\"{}\"](area.searchArea);\
         out center;",
        kind.railway_value()
    )
}

/// Overpass API client.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    base_url: String,
    area: String,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            area: config.area,
        })
    }

    /// Every element of the given kind in the configured area.
    pub async fn elements(&self, kind: ElementKind) -> Result<Vec<GeoElement>, OverpassError> {
        let query = build_query(kind, &self.area);

        let response = self
            .http
            .post(&self.base_url)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::GATEWAY_TIMEOUT {
            return Err(OverpassError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let resp: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Json {
                message: e.to_string(),
            })?;

        if let Some(remark) = &resp.remark {
            warn!(kind = %kind, remark = %remark, "Overpass returned a partial result");
        }

        let elements = convert_response(&resp, kind);
        info!(kind = %kind, area = %self.area, count = elements.len(), "Fetched geodata");
        Ok(elements)
    }
}
