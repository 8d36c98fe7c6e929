use std::error::Error;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use platform_server::cache::{CacheConfig, CachedIrailClient, CachedOverpassClient};
use platform_server::irail::{IrailClient, IrailConfig, StationCache, StationCacheConfig};
use platform_server::locate::LocateConfig;
use platform_server::overpass::{OverpassClient, OverpassConfig};
use platform_server::snapshot::DataSources;
use platform_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("platform_server=info")),
        )
        .init();

    let mut irail_config = IrailConfig::default();
    if let Ok(url) = std::env::var("IRAIL_BASE_URL") {
        irail_config = irail_config.with_base_url(url);
    }

    let mut overpass_config = OverpassConfig::default();
    if let Ok(url) = std::env::var("OVERPASS_URL") {
        overpass_config = overpass_config.with_base_url(url);
    }
    if let Ok(area) = std::env::var("OVERPASS_AREA") {
        overpass_config = overpass_config.with_area(area);
    }

    let station_cache = StationCache::new(
        std::env::var("STATION_CACHE_PATH")
            .map(StationCacheConfig::new)
            .unwrap_or_default(),
    );

    let cache_config = CacheConfig::default();
    let irail = CachedIrailClient::new(
        IrailClient::new(irail_config)?,
        Some(station_cache),
        &cache_config,
    );
    let overpass = CachedOverpassClient::new(OverpassClient::new(overpass_config)?, &cache_config);

    let state = AppState::new(DataSources::new(irail, overpass), LocateConfig::default());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    info!(%addr, "Platform locator listening");
    info!("  GET /health");
    info!("  GET /api/stations?q=");
    info!("  GET /api/tracks/elements?station_id=&track=&radius=");
    info!("  GET /api/stop-signal?station_id=&train_id=&track=&radius=");
    info!("  GET /api/layout?station=&track=&radius=");
    info!("  GET /api/traininfo?station_name=");
    info!("  GET /api/next-train?station=&track=");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
