//! Overpass API response DTOs.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Response to an `[out:json]` query.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
    /// Set when the query ran out of time or memory part way through.
    pub remark: Option<String>,
}

/// A node, way or relation.
///
/// Nodes carry `lat`/`lon` directly; ways and relations only carry a
/// `center` when queried with `out center`.
#[derive(Debug, Clone, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<LatLon>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}
