//! Geotagged infrastructure elements (platform markers and signals).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::{Coordinate, SignalDirection};

/// Tag holding the track a marker or signal belongs to.
pub const TRACK_TAG: &str = "ref:track";

/// Tag holding a signal's reference, numeric for stop signals.
pub const REF_TAG: &str = "ref";

/// Tag holding a signal's direction.
pub const SIGNAL_DIRECTION_TAG: &str = "railway:signal:direction";

/// The kind of element, i.e. the value of its `railway` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    PlatformMarker,
    Signal,
}

impl ElementKind {
    /// The `railway=*` value selecting this kind in the geodata.
    pub fn railway_value(self) -> &'static str {
        match self {
            ElementKind::PlatformMarker => "platform_marker",
            ElementKind::Signal => "signal",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.railway_value())
    }
}

/// OSM object type. Node, way and relation ids are separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OsmType {
    Node,
    Way,
    Relation,
}

impl OsmType {
    /// Parse the `type` field of an Overpass element.
    pub fn from_overpass(value: &str) -> Option<Self> {
        match value {
            "node" => Some(OsmType::Node),
            "way" => Some(OsmType::Way),
            "relation" => Some(OsmType::Relation),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OsmType::Node => "node",
            OsmType::Way => "way",
            OsmType::Relation => "relation",
        }
    }
}

impl fmt::Display for OsmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an OSM object, displayed as `node/123`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementRef {
    pub osm_type: OsmType,
    pub id: u64,
}

impl ElementRef {
    pub fn new(osm_type: OsmType, id: u64) -> Self {
        Self { osm_type, id }
    }

    pub fn node(id: u64) -> Self {
        Self::new(OsmType::Node, id)
    }

    pub fn way(id: u64) -> Self {
        Self::new(OsmType::Way, id)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.osm_type, self.id)
    }
}

/// A platform marker or signal with its tags.
///
/// Elements are immutable once converted from the geodata response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoElement {
    pub id: u64,
    pub osm_type: OsmType,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub tags: BTreeMap<String, String>,
}

impl GeoElement {
    /// A node element. Use [`GeoElement::with_osm_type`] for ways and relations.
    pub fn new(id: u64, coordinate: Coordinate, kind: ElementKind) -> Self {
        Self {
            id,
            osm_type: OsmType::Node,
            coordinate,
            kind,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_osm_type(mut self, osm_type: OsmType) -> Self {
        self.osm_type = osm_type;
        self
    }

    pub fn element_ref(&self) -> ElementRef {
        ElementRef::new(self.osm_type, self.id)
    }

    /// Adds a tag, replacing any existing value for the key.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// The `ref:track` tag value.
    pub fn track_ref(&self) -> Option<&str> {
        self.tag(TRACK_TAG)
    }

    /// The raw `ref` tag value.
    pub fn signal_ref(&self) -> Option<&str> {
        self.tag(REF_TAG)
    }

    /// The `ref` tag as a number, if it is made of ASCII digits only.
    ///
    /// Signals without a numeric reference cannot be ordered and are left
    /// out of anything that depends on signal order. Digit strings beyond
    /// `u64::MAX` (more than 19 significant digits) count as non-numeric.
    pub fn numeric_ref(&self) -> Option<u64> {
        let raw = self.signal_ref()?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok()
    }

    pub fn signal_direction(&self) -> Option<SignalDirection> {
        self.tag(SIGNAL_DIRECTION_TAG)
            .and_then(SignalDirection::from_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(reference: &str) -> GeoElement {
        GeoElement::new(1, Coordinate::new(50.0, 4.0), ElementKind::Signal)
            .with_tag(REF_TAG, reference)
    }

    #[test]
    fn numeric_ref_accepts_digits() {
        assert_eq!(signal("10").numeric_ref(), Some(10));
        assert_eq!(signal("02").numeric_ref(), Some(2));
    }

    #[test]
    fn numeric_ref_rejects_non_digits() {
        assert_eq!(signal("").numeric_ref(), None);
        assert_eq!(signal("A12").numeric_ref(), None);
        assert_eq!(signal("-4").numeric_ref(), None);
        assert_eq!(signal("4 ").numeric_ref(), None);
    }

    #[test]
    fn numeric_ref_is_not_limited_to_u32() {
        assert_eq!(signal("99999999999999").numeric_ref(), Some(99_999_999_999_999));
        assert_eq!(signal("4294967296").numeric_ref(), Some(4_294_967_296));
        assert_eq!(signal("99999999999999999999").numeric_ref(), None);
    }

    #[test]
    fn element_ref_separates_osm_types() {
        let node = GeoElement::new(7, Coordinate::new(50.0, 4.0), ElementKind::Signal);
        let way = node.clone().with_osm_type(OsmType::Way);
        assert_eq!(node.element_ref(), ElementRef::node(7));
        assert_eq!(way.element_ref(), ElementRef::way(7));
        assert_ne!(node.element_ref(), way.element_ref());
        assert_eq!(way.element_ref().to_string(), "way/7");
        assert_eq!(OsmType::from_overpass("relation"), Some(OsmType::Relation));
        assert_eq!(OsmType::from_overpass("area"), None);
    }

    #[test]
    fn missing_ref_is_not_numeric() {
        let e = GeoElement::new(1, Coordinate::new(50.0, 4.0), ElementKind::Signal);
        assert_eq!(e.signal_ref(), None);
        assert_eq!(e.numeric_ref(), None);
    }

    #[test]
    fn direction_tag() {
        let e = signal("4").with_tag(SIGNAL_DIRECTION_TAG, "backward");
        assert_eq!(e.signal_direction(), Some(SignalDirection::Backward));
        assert_eq!(signal("4").signal_direction(), None);
    }

    #[test]
    fn serializes_flat_record() {
        let e = GeoElement::new(42, Coordinate::new(50.5, 4.25), ElementKind::PlatformMarker)
            .with_tag(TRACK_TAG, "5");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["osm_type"], "node");
        assert_eq!(json["lat"], 50.5);
        assert_eq!(json["lon"], 4.25);
        assert_eq!(json["type"], "platform_marker");
        assert_eq!(json["tags"]["ref:track"], "5");
    }
}
