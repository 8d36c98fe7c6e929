//! On-disk copy of the validated station list.
//!
//! Station names come back localised, so a file written for one `lang` is
//! never served for another. Only stations that passed conversion are
//! written; records that no longer validate on the way back in are logged
//! and skipped.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Coordinate, Station, StationId};

use super::error::IrailError;

const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct StationFile {
    lang: String,
    written_at: DateTime<Utc>,
    stations: Vec<StationRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StationRecord {
    id: String,
    name: String,
    lat: f64,
    lon: f64,
}

impl StationRecord {
    fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            lat: station.coordinate.lat,
            lon: station.coordinate.lon,
        }
    }

    fn to_station(&self) -> Option<Station> {
        let id = StationId::parse(&self.id).ok()?;
        let coordinate = Coordinate::new(self.lat, self.lon);
        coordinate
            .is_valid()
            .then(|| Station::new(id, self.name.clone(), coordinate))
    }
}

#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    pub path: PathBuf,
    /// Files older than this are ignored.
    pub max_age: Duration,
}

impl StationCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("irail_stations.json")
    }
}

/// Station list persisted between restarts.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// Stations written for `lang`, if the file is fresh and holds any.
    ///
    /// A missing, unreadable, stale or foreign-language file is a miss.
    pub fn load(&self, lang: &str) -> Option<Vec<Station>> {
        let bytes = std::fs::read(&self.config.path).ok()?;
        let file: StationFile = match serde_json::from_slice(&bytes) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %self.config.path.display(), error = %e, "Unreadable station cache");
                return None;
            }
        };

        if file.lang != lang {
            debug!(cached = %file.lang, wanted = lang, "Station cache is for another language");
            return None;
        }

        let age = Utc::now() - file.written_at;
        if TimeDelta::from_std(self.config.max_age).is_ok_and(|max| age >= max) {
            debug!(age_secs = age.num_seconds(), "Station cache is stale");
            return None;
        }

        let stations: Vec<Station> = file
            .stations
            .iter()
            .filter_map(|record| {
                let station = record.to_station();
                if station.is_none() {
                    warn!(station = %record.id, "Skipping invalid cached station");
                }
                station
            })
            .collect();

        (!stations.is_empty()).then_some(stations)
    }

    /// Write `stations` for `lang`, replacing any previous file.
    ///
    /// The file is written beside the target and renamed into place, so a
    /// crash mid-write never leaves a truncated cache behind.
    pub fn save(&self, lang: &str, stations: &[Station]) -> Result<(), IrailError> {
        let file = StationFile {
            lang: lang.to_string(),
            written_at: Utc::now(),
            stations: stations.iter().map(StationRecord::from_station).collect(),
        };
        let json = serde_json::to_vec(&file).map_err(|e| cache_error("serialize", e))?;

        let path = &self.config.path;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| cache_error("create directory", e))?;
        }

        let partial = path.with_extension("partial");
        std::fs::write(&partial, json).map_err(|e| cache_error("write", e))?;
        std::fs::rename(&partial, path).map_err(|e| cache_error("rename", e))?;

        debug!(path = %path.display(), count = stations.len(), lang, "Wrote station cache");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn cache_error(action: &str, e: impl std::fmt::Display) -> IrailError {
    IrailError::Cache {
        message: format!("station cache: failed to {action}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn station(id: &str, name: &str) -> Station {
        Station::new(
            StationId::parse(id).unwrap(),
            name,
            Coordinate::new(50.845658, 4.356801),
        )
    }

    fn cache_in(dir: &Path) -> StationCache {
        StationCache::new(StationCacheConfig::new(dir.join("stations.json")))
    }

    #[test]
    fn stations_survive_a_round_trip() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        let stations = vec![
            station("BE.NMBS.008813003", "Brussels-Central"),
            station("BE.NMBS.008892007", "Ghent-Sint-Pieters"),
        ];

        cache.save("en", &stations).unwrap();
        assert_eq!(cache.load("en").unwrap(), stations);
        assert!(!dir.path().join("stations.partial").exists());
    }

    #[test]
    fn other_language_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        cache
            .save("nl", &[station("BE.NMBS.008813003", "Brussel-Centraal")])
            .unwrap();

        assert!(cache.load("fr").is_none());
        assert_eq!(cache.load("nl").unwrap()[0].name, "Brussel-Centraal");
    }

    #[test]
    fn zero_max_age_is_always_stale() {
        let dir = tempdir().unwrap();
        let cache = StationCache::new(
            StationCacheConfig::new(dir.path().join("stations.json")).with_max_age(Duration::ZERO),
        );
        cache
            .save("en", &[station("BE.NMBS.008813003", "Brussels-Central")])
            .unwrap();

        assert!(cache.load("en").is_none());
    }

    #[test]
    fn invalid_records_are_skipped() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        let written_at = Utc::now().to_rfc3339();
        let json = format!(
            r#"{{
                "lang": "en",
                "written_at": "{written_at}",
                "stations": [
                    {{ "id": "BE.NMBS.008813003", "name": "Brussels-Central",
                       "lat": 50.845658, "lon": 4.356801 }},
                    {{ "id": "not a station", "name": "Broken", "lat": 50.0, "lon": 4.0 }},
                    {{ "id": "BE.NMBS.008892007", "name": "Off the map",
                       "lat": 95.0, "lon": 4.0 }}
                ]
            }}"#
        );
        std::fs::write(cache.path(), json).unwrap();

        let loaded = cache.load("en").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Brussels-Central");
    }

    #[test]
    fn file_without_valid_stations_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        cache.save("en", &[]).unwrap();
        assert!(cache.load("en").is_none());
    }

    #[test]
    fn missing_or_corrupt_file_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path());
        assert!(cache.load("en").is_none());

        std::fs::write(cache.path(), "{ not json").unwrap();
        assert!(cache.load("en").is_none());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("stations.json");
        let cache = StationCache::new(StationCacheConfig::new(&path));

        cache
            .save("en", &[station("BE.NMBS.008813003", "Brussels-Central")])
            .unwrap();
        assert!(path.exists());
    }
}
