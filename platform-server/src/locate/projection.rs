//! Projecting points onto a 1-D platform line.
//!
//! A platform is short enough (the bounding box is at most a couple of
//! kilometres across) to treat as straight, so a point's position is its
//! great-circle distance from the westmost point.

use geo::{Distance, Haversine};
use serde::Serialize;

use crate::domain::{Coordinate, GeoElement};

/// An element with its position along the projected line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    #[serde(flatten)]
    pub element: GeoElement,
    /// Metres from the reference point.
    pub position: f64,
}

/// Great-circle distance in metres, on a sphere of the Earth's mean radius.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    Haversine.distance(a.to_point(), b.to_point())
}

/// Sort elements by ascending longitude. Equal longitudes keep input order.
pub fn sort_west_to_east(elements: &mut [GeoElement]) {
    elements.sort_by(|a, b| a.coordinate.lon.total_cmp(&b.coordinate.lon));
}

/// Project an already ordered sequence onto a line through its first point.
///
/// The first point gets position exactly 0; every other point gets its
/// distance from the first.
pub fn project_to_line(elements: Vec<GeoElement>) -> Vec<ProjectedPoint> {
    let Some(origin) = elements.first().map(|e| e.coordinate) else {
        return Vec::new();
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            let position = if i == 0 {
                0.0
            } else {
                haversine_m(origin, element.coordinate)
            };
            ProjectedPoint { element, position }
        })
        .collect()
}

/// Sort west to east, then project from the westmost point.
pub fn project_west_to_east(mut elements: Vec<GeoElement>) -> Vec<ProjectedPoint> {
    sort_west_to_east(&mut elements);
    project_to_line(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementKind;

    fn point(id: u64, lat: f64, lon: f64) -> GeoElement {
        GeoElement::new(id, Coordinate::new(lat, lon), ElementKind::PlatformMarker)
    }

    #[test]
    fn known_distance() {
        // One degree of longitude on the equator.
        let d = haversine_m(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn sort_is_stable() {
        let mut pts = vec![
            point(1, 50.0, 4.002),
            point(2, 50.0, 4.000),
            point(3, 50.1, 4.002),
            point(4, 50.0, 3.999),
        ];
        sort_west_to_east(&mut pts);
        let ids: Vec<_> = pts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }

    #[test]
    fn projection_starts_at_zero_and_grows_eastward() {
        let projected = project_west_to_east(vec![
            point(1, 50.0, 4.004),
            point(2, 50.0, 4.000),
            point(3, 50.0, 4.002),
        ]);

        let ids: Vec<_> = projected.iter().map(|p| p.element.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(projected[0].position, 0.0);
        assert!(projected[1].position > 0.0);
        assert!(projected[2].position > projected[1].position);
    }

    #[test]
    fn empty_projection() {
        assert!(project_to_line(Vec::new()).is_empty());
    }

    #[test]
    fn single_point_is_origin() {
        let projected = project_to_line(vec![point(1, 50.0, 4.0)]);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].position, 0.0);
    }
}
