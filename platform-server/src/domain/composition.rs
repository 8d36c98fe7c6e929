//! Train composition: segments of physical units.

use serde::Serialize;

use super::TrainId;

/// Seating class a unit is mostly fitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatClass {
    First,
    Second,
}

/// On-board facilities advertised for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitFeature {
    Bike,
    Wheelchair,
    Toilet,
}

/// One physical vehicle (carriage or locomotive) in a segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    /// Unit id within its segment, as reported upstream.
    pub id: String,
    pub material_number: Option<String>,
    pub length_m: f64,
    pub seats_first_class: u32,
    pub seats_second_class: u32,
    pub has_bike_section: bool,
    pub has_priority_places: bool,
    pub has_toilets: bool,
}

impl Unit {
    /// Create a unit with the given length and no seats or facilities.
    pub fn new(id: impl Into<String>, length_m: f64) -> Self {
        Self {
            id: id.into(),
            material_number: None,
            length_m,
            seats_first_class: 0,
            seats_second_class: 0,
            has_bike_section: false,
            has_priority_places: false,
            has_toilets: false,
        }
    }

    /// Second class when it has more second-class than first-class seats.
    pub fn seat_class(&self) -> SeatClass {
        if self.seats_second_class > self.seats_first_class {
            SeatClass::Second
        } else {
            SeatClass::First
        }
    }

    pub fn features(&self) -> Vec<UnitFeature> {
        let mut features = Vec::new();
        if self.has_bike_section {
            features.push(UnitFeature::Bike);
        }
        if self.has_priority_places {
            features.push(UnitFeature::Wheelchair);
        }
        if self.has_toilets {
            features.push(UnitFeature::Toilet);
        }
        features
    }
}

/// A coupled set of units running together between two stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionSegment {
    pub id: String,
    pub units: Vec<Unit>,
}

/// The full ordered composition of a train.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub train: TrainId,
    pub segments: Vec<CompositionSegment>,
}

impl Composition {
    pub fn new(train: TrainId, segments: Vec<CompositionSegment>) -> Self {
        Self { train, segments }
    }

    /// Total number of units over all segments.
    pub fn total_units(&self) -> usize {
        self.segments.iter().map(|s| s.units.len()).sum()
    }

    /// Iterate units in segment order, paired with their segment id.
    pub fn units(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.segments
            .iter()
            .flat_map(|s| s.units.iter().map(move |u| (s.id.as_str(), u)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, lengths: &[f64]) -> CompositionSegment {
        CompositionSegment {
            id: id.to_string(),
            units: lengths
                .iter()
                .enumerate()
                .map(|(i, l)| Unit::new(i.to_string(), *l))
                .collect(),
        }
    }

    #[test]
    fn total_units_sums_segments() {
        let c = Composition::new(
            TrainId::new("IC1832").unwrap(),
            vec![segment("0", &[26.4; 5]), segment("1", &[26.4; 4])],
        );
        assert_eq!(c.total_units(), 9);
        assert_eq!(c.units().count(), 9);
    }

    #[test]
    fn units_iterate_in_segment_order() {
        let c = Composition::new(
            TrainId::new("IC1832").unwrap(),
            vec![segment("a", &[19.0]), segment("b", &[25.0, 27.0])],
        );
        let seen: Vec<_> = c.units().map(|(seg, u)| (seg, u.length_m)).collect();
        assert_eq!(seen, vec![("a", 19.0), ("b", 25.0), ("b", 27.0)]);
    }

    #[test]
    fn seat_class_prefers_second_only_when_larger() {
        let mut unit = Unit::new("0", 26.4);
        assert_eq!(unit.seat_class(), SeatClass::First);

        unit.seats_first_class = 40;
        unit.seats_second_class = 40;
        assert_eq!(unit.seat_class(), SeatClass::First);

        unit.seats_second_class = 80;
        assert_eq!(unit.seat_class(), SeatClass::Second);
    }

    #[test]
    fn features_from_flags() {
        let mut unit = Unit::new("0", 26.4);
        assert!(unit.features().is_empty());

        unit.has_bike_section = true;
        unit.has_priority_places = true;
        assert_eq!(
            unit.features(),
            vec![UnitFeature::Bike, UnitFeature::Wheelchair]
        );
    }
}
