//! Application state for the web layer.

use std::sync::Arc;

use crate::locate::LocateConfig;
use crate::snapshot::DataSources;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached iRail and Overpass clients
    pub sources: DataSources,

    /// Locator configuration
    pub config: Arc<LocateConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(sources: DataSources, config: LocateConfig) -> Self {
        Self {
            sources,
            config: Arc::new(config),
        }
    }
}
