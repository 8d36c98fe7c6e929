//! Selecting elements around a station and on one track.

use geo::{Contains, Polygon, Rect, coord};

use crate::domain::{Coordinate, GeoElement, TrackNumber};

/// Half-width used when filtering without an explicit radius.
pub const DEFAULT_BOX_RADIUS: f64 = 0.02;

/// Axis-aligned box of half-width `radius` degrees around a centre.
///
/// Containment is strict: points on an edge are outside.
#[derive(Debug, Clone)]
pub struct BoundingBox {
    polygon: Polygon<f64>,
}

impl BoundingBox {
    pub fn around(center: Coordinate, radius: f64) -> Self {
        let rect = Rect::new(
            coord! { x: center.lon - radius, y: center.lat - radius },
            coord! { x: center.lon + radius, y: center.lat + radius },
        );
        Self {
            polygon: rect.to_polygon(),
        }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.polygon.contains(&coordinate.to_point())
    }
}

/// Keep the elements strictly inside the box around `center`, in input order.
pub fn within_box(center: Coordinate, radius: f64, elements: Vec<GeoElement>) -> Vec<GeoElement> {
    let bbox = BoundingBox::around(center, radius);
    elements
        .into_iter()
        .filter(|e| bbox.contains(e.coordinate))
        .collect()
}

/// Keep the elements whose `ref:track` tag equals the track number.
pub fn on_track(elements: Vec<GeoElement>, track: &TrackNumber) -> Vec<GeoElement> {
    elements
        .into_iter()
        .filter(|e| e.track_ref() == Some(track.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElementKind, TRACK_TAG};

    const CENTER: Coordinate = Coordinate {
        lat: 50.0,
        lon: 4.0,
    };

    fn marker(id: u64, lat: f64, lon: f64) -> GeoElement {
        GeoElement::new(id, Coordinate::new(lat, lon), ElementKind::PlatformMarker)
    }

    #[test]
    fn keeps_points_inside() {
        let elements = vec![
            marker(1, 50.0, 4.0),
            marker(2, 50.01, 3.99),
            marker(3, 50.03, 4.0),
            marker(4, 50.0, 4.05),
        ];

        let kept = within_box(CENTER, DEFAULT_BOX_RADIUS, elements);
        let ids: Vec<_> = kept.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn boundary_points_are_excluded() {
        let r = DEFAULT_BOX_RADIUS;
        let elements = vec![
            marker(1, CENTER.lat + r, CENTER.lon),
            marker(2, CENTER.lat, CENTER.lon - r),
            marker(3, CENTER.lat - r, CENTER.lon + r),
            marker(4, CENTER.lat + r / 2.0, CENTER.lon),
        ];

        let kept = within_box(CENTER, r, elements);
        let ids: Vec<_> = kept.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(within_box(CENTER, DEFAULT_BOX_RADIUS, Vec::new()).is_empty());
    }

    #[test]
    fn track_filter_compares_strings() {
        let elements = vec![
            marker(1, 50.0, 4.0).with_tag(TRACK_TAG, "5"),
            marker(2, 50.0, 4.0).with_tag(TRACK_TAG, "05"),
            marker(3, 50.0, 4.0).with_tag(TRACK_TAG, "6"),
            marker(4, 50.0, 4.0),
            marker(5, 50.0, 4.0).with_tag(TRACK_TAG, "5"),
        ];

        let kept = on_track(elements, &TrackNumber::from(5));
        let ids: Vec<_> = kept.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn no_track_match_is_empty_not_error() {
        let elements = vec![marker(1, 50.0, 4.0).with_tag(TRACK_TAG, "3")];
        assert!(on_track(elements, &TrackNumber::from(9)).is_empty());
    }
}
