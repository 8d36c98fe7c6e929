//! Geographic coordinates.

use geo::Point;
use serde::Serialize;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Converts to a `geo` point. Note the axis order: x is longitude.
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Returns true if both components are finite and within WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_axis_order() {
        let p = Coordinate::new(50.85, 4.36).to_point();
        assert_eq!(p.x(), 4.36);
        assert_eq!(p.y(), 50.85);
    }

    #[test]
    fn validity() {
        assert!(Coordinate::new(50.85, 4.36).is_valid());
        assert!(!Coordinate::new(91.0, 4.36).is_valid());
        assert!(!Coordinate::new(50.0, f64::NAN).is_valid());
        assert!(!Coordinate::new(50.0, -181.0).is_valid());
    }
}
