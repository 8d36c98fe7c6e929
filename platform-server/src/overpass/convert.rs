//! Conversion from Overpass elements to `GeoElement`s.

use tracing::debug;

use crate::domain::{Coordinate, ElementKind, GeoElement, OsmType};

use super::types::{OsmElement, OverpassResponse};

/// Convert one OSM element, using its centre for ways and relations.
///
/// Returns `None` for elements with no usable position or an unknown type.
pub fn convert_element(element: &OsmElement, kind: ElementKind) -> Option<GeoElement> {
    let osm_type = OsmType::from_overpass(&element.element_type)?;
    let (lat, lon) = match (element.lat, element.lon, element.center) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(center)) => (center.lat, center.lon),
        _ => return None,
    };

    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_valid() {
        return None;
    }

    Some(GeoElement {
        id: element.id,
        osm_type,
        coordinate,
        kind,
        tags: element.tags.clone(),
    })
}

/// Convert a whole response, dropping elements without a position.
pub fn convert_response(resp: &OverpassResponse, kind: ElementKind) -> Vec<GeoElement> {
    let elements: Vec<GeoElement> = resp
        .elements
        .iter()
        .filter_map(|e| convert_element(e, kind))
        .collect();

    let dropped = resp.elements.len() - elements.len();
    if dropped > 0 {
        debug!(kind = %kind, dropped, "Dropped elements without a position or type");
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElementRef, SignalDirection, TRACK_TAG};

    const RESPONSE: &str = r#"{
        "version": 0.6,
        "elements": [
            {
                "type": "node", "id": 1, "lat": 50.8454, "lon": 4.3571,
                "tags": {
                    "railway": "signal",
                    "ref": "10",
                    "ref:track": "5",
                    "railway:signal:direction": "forward"
                }
            },
            {
                "type": "way", "id": 2,
                "center": { "lat": 50.8460, "lon": 4.3580 },
                "tags": { "railway": "signal", "ref:track": "6" }
            },
            { "type": "relation", "id": 3, "tags": { "railway": "signal" } },
            { "type": "node", "id": 4, "lat": 120.0, "lon": 4.0 }
        ]
    }"#;

    #[test]
    fn nodes_and_way_centres() {
        let resp: OverpassResponse = serde_json::from_str(RESPONSE).unwrap();
        let elements = convert_response(&resp, ElementKind::Signal);

        let ids: Vec<_> = elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert_eq!(elements[0].coordinate, Coordinate::new(50.8454, 4.3571));
        assert_eq!(elements[0].numeric_ref(), Some(10));
        assert_eq!(elements[0].signal_direction(), Some(SignalDirection::Forward));
        assert_eq!(elements[1].coordinate, Coordinate::new(50.8460, 4.3580));
        assert_eq!(elements[1].tag(TRACK_TAG), Some("6"));
        assert!(elements.iter().all(|e| e.kind == ElementKind::Signal));
        assert_eq!(elements[0].element_ref(), ElementRef::node(1));
        assert_eq!(elements[1].element_ref(), ElementRef::way(2));
    }

    #[test]
    fn node_and_way_with_same_id_stay_distinct() {
        let resp: OverpassResponse = serde_json::from_str(
            r#"{"elements": [
                { "type": "node", "id": 7, "lat": 50.0, "lon": 4.0 },
                { "type": "way", "id": 7, "center": { "lat": 50.1, "lon": 4.1 } },
                { "type": "area", "id": 8, "lat": 50.0, "lon": 4.0 }
            ]}"#,
        )
        .unwrap();
        let elements = convert_response(&resp, ElementKind::Signal);

        let refs: Vec<_> = elements.iter().map(GeoElement::element_ref).collect();
        assert_eq!(refs, vec![ElementRef::node(7), ElementRef::way(7)]);
    }

    #[test]
    fn missing_elements_is_empty() {
        let resp: OverpassResponse = serde_json::from_str(r#"{"version": 0.6}"#).unwrap();
        assert!(convert_response(&resp, ElementKind::PlatformMarker).is_empty());
    }
}
