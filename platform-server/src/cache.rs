//! Caching layer in front of iRail and Overpass.
//!
//! Geodata and the station list change on the scale of days and are
//! expensive to fetch, so they live for `geodata_ttl`. Liveboards, routes
//! and compositions are live data and live for `ttl`.
//!
//! The station list additionally survives restarts through the on-disk
//! `StationCache`.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::{
    Composition, Departure, ElementKind, GeoElement, Station, StationId, TrainId,
};
use crate::irail::{IrailClient, IrailError, StationCache};
use crate::overpass::{OverpassClient, OverpassError};

/// Configuration for the in-memory caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for liveboards, routes and compositions.
    pub ttl: Duration,

    /// TTL for the station list and geodata.
    pub geodata_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            geodata_ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_geodata_ttl(mut self, ttl: Duration) -> Self {
        self.geodata_ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, n: u64) -> Self {
        self.max_capacity = n;
        self
    }
}

fn live_cache<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

/// iRail client with caching.
pub struct CachedIrailClient {
    client: IrailClient,
    disk: Option<StationCache>,
    /// Single entry, keyed by `()`.
    stations: MokaCache<(), Arc<Vec<Station>>>,
    boards: MokaCache<StationId, Arc<Vec<Departure>>>,
    routes: MokaCache<TrainId, Arc<Vec<Station>>>,
    compositions: MokaCache<TrainId, Arc<Composition>>,
}

impl CachedIrailClient {
    /// Create a new cached client. `disk` persists the station list.
    pub fn new(client: IrailClient, disk: Option<StationCache>, config: &CacheConfig) -> Self {
        Self {
            client,
            disk,
            stations: MokaCache::builder()
                .time_to_live(config.geodata_ttl)
                .max_capacity(1)
                .build(),
            boards: live_cache(config),
            routes: live_cache(config),
            compositions: live_cache(config),
        }
    }

    /// The station list, from memory, then disk, then the API.
    pub async fn stations(&self) -> Result<Arc<Vec<Station>>, IrailError> {
        if let Some(cached) = self.stations.get(&()).await {
            return Ok(cached);
        }

        let lang = self.client.lang();
        if let Some(stations) = self.disk.as_ref().and_then(|disk| disk.load(lang)) {
            let stations = Arc::new(stations);
            debug!(count = stations.len(), "Loaded stations from disk cache");
            self.stations.insert((), stations.clone()).await;
            return Ok(stations);
        }

        let stations = Arc::new(self.client.stations().await?);
        debug!(count = stations.len(), "Fetched station list");
        if let Some(disk) = &self.disk
            && let Err(e) = disk.save(lang, &stations)
        {
            warn!(path = %disk.path().display(), error = %e, "Failed to write station cache");
        }

        self.stations.insert((), stations.clone()).await;
        Ok(stations)
    }

    /// Departures from a station, starting now.
    pub async fn liveboard(
        &self,
        station: &StationId,
    ) -> Result<Arc<Vec<Departure>>, IrailError> {
        if let Some(cached) = self.boards.get(station).await {
            return Ok(cached);
        }

        let departures = Arc::new(self.client.liveboard(station, None).await?);
        self.boards.insert(station.clone(), departures.clone()).await;
        Ok(departures)
    }

    /// Stations a vehicle calls at, in route order.
    pub async fn route(&self, train: &TrainId) -> Result<Arc<Vec<Station>>, IrailError> {
        if let Some(cached) = self.routes.get(train).await {
            return Ok(cached);
        }

        let route = Arc::new(self.client.vehicle_route(train).await?);
        self.routes.insert(train.clone(), route.clone()).await;
        Ok(route)
    }

    pub async fn composition(&self, train: &TrainId) -> Result<Arc<Composition>, IrailError> {
        if let Some(cached) = self.compositions.get(train).await {
            return Ok(cached);
        }

        let composition = Arc::new(self.client.composition(train).await?);
        self.compositions
            .insert(train.clone(), composition.clone())
            .await;
        Ok(composition)
    }
}

/// Overpass client with caching, one entry per element kind.
pub struct CachedOverpassClient {
    client: OverpassClient,
    elements: MokaCache<ElementKind, Arc<Vec<GeoElement>>>,
}

impl CachedOverpassClient {
    pub fn new(client: OverpassClient, config: &CacheConfig) -> Self {
        Self {
            client,
            elements: MokaCache::builder()
                .time_to_live(config.geodata_ttl)
                .max_capacity(2)
                .build(),
        }
    }

    /// Every element of a kind in the configured area.
    pub async fn elements(
        &self,
        kind: ElementKind,
    ) -> Result<Arc<Vec<GeoElement>>, OverpassError> {
        if let Some(cached) = self.elements.get(&kind).await {
            return Ok(cached);
        }

        let elements = Arc::new(self.client.elements(kind).await?);
        self.elements.insert(kind, elements.clone()).await;
        Ok(elements)
    }
}
