//! Laying carriages out behind the stop signal.

use serde::Serialize;

use crate::domain::{
    Carriage, CarriageRole, Composition, Direction, ElementKind, ElementRef, PositionedCarriage,
};

use super::error::LocateError;
use super::projection::ProjectedPoint;

/// Carriage positions plus the platform markers they are read against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarriageLayout {
    pub carriages: Vec<PositionedCarriage>,
    /// Platform markers, west to east, with their projected positions.
    pub markers: Vec<ProjectedPoint>,
}

/// Number the units of a composition as carriages, 1-based in segment order.
///
/// Fails if any unit length is not a positive finite number: a zero or
/// missing length would silently stack carriages on top of each other.
pub fn carriages_from(composition: &Composition) -> Result<Vec<Carriage>, LocateError> {
    composition
        .units()
        .enumerate()
        .map(|(i, (segment, unit))| {
            if !(unit.length_m.is_finite() && unit.length_m > 0.0) {
                return Err(LocateError::MalformedComposition {
                    train: composition.train.clone(),
                    reason: format!(
                        "unit {} of segment {} has invalid length {}",
                        unit.id, segment, unit.length_m
                    ),
                });
            }
            Ok(Carriage {
                index: i as u32 + 1,
                length_m: unit.length_m,
                material_number: unit.material_number.clone(),
                seat_class: unit.seat_class(),
            })
        })
        .collect()
}

/// Position every carriage relative to the stop signal.
///
/// The head carriage sits at the stop signal and is the locomotive. Each
/// following carriage is offset from the previous one by the previous
/// carriage's length, forward for east-to-west trains and backward for
/// west-to-east ones.
pub fn layout_carriages(
    points: &[ProjectedPoint],
    stop_signal: ElementRef,
    carriages: Vec<Carriage>,
    direction: Direction,
) -> Result<CarriageLayout, LocateError> {
    let head = points
        .iter()
        .find(|p| p.element.kind == ElementKind::Signal && p.element.element_ref() == stop_signal)
        .ok_or(LocateError::MissingStopSignal {
            signal: stop_signal,
        })?;

    let sign = direction.sign();
    let mut positioned: Vec<PositionedCarriage> = Vec::with_capacity(carriages.len());

    for carriage in carriages {
        let (position, role) = match positioned.last() {
            None => (head.position, CarriageRole::Locomotive),
            Some(prev) => (
                prev.position + sign * prev.carriage.length_m,
                CarriageRole::Carriage,
            ),
        };
        positioned.push(PositionedCarriage {
            carriage,
            position,
            role,
        });
    }

    let markers = points
        .iter()
        .filter(|p| p.element.kind == ElementKind::PlatformMarker)
        .cloned()
        .collect();

    Ok(CarriageLayout {
        carriages: positioned,
        markers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CompositionSegment, Coordinate, GeoElement, OsmType, SeatClass, TrainId, Unit,
    };

    const STOP: ElementRef = ElementRef {
        osm_type: OsmType::Node,
        id: 99,
    };

    fn projected(id: u64, kind: ElementKind, position: f64) -> ProjectedPoint {
        ProjectedPoint {
            element: GeoElement::new(id, Coordinate::new(50.0, 4.0), kind),
            position,
        }
    }

    fn points() -> Vec<ProjectedPoint> {
        vec![
            projected(1, ElementKind::PlatformMarker, 0.0),
            projected(2, ElementKind::PlatformMarker, 60.0),
            projected(99, ElementKind::Signal, 100.0),
            projected(3, ElementKind::PlatformMarker, 150.0),
        ]
    }

    fn carriages(lengths: &[f64]) -> Vec<Carriage> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, l)| Carriage::new(i as u32 + 1, *l))
            .collect()
    }

    fn positions(layout: &CarriageLayout) -> Vec<f64> {
        layout.carriages.iter().map(|c| c.position).collect()
    }

    #[test]
    fn east_to_west_extends_forward() {
        let layout = layout_carriages(
            &points(),
            STOP,
            carriages(&[20.0, 20.0, 25.0]),
            Direction::EastToWest,
        )
        .unwrap();
        assert_eq!(positions(&layout), vec![100.0, 120.0, 140.0]);
    }

    #[test]
    fn west_to_east_extends_backward() {
        let layout = layout_carriages(
            &points(),
            STOP,
            carriages(&[20.0, 20.0, 25.0]),
            Direction::WestToEast,
        )
        .unwrap();
        assert_eq!(positions(&layout), vec![100.0, 80.0, 60.0]);
    }

    #[test]
    fn only_head_is_locomotive() {
        let layout =
            layout_carriages(&points(), STOP, carriages(&[20.0; 4]), Direction::EastToWest)
                .unwrap();
        assert!(layout.carriages[0].is_locomotive());
        assert!(layout.carriages[1..].iter().all(|c| !c.is_locomotive()));
    }

    #[test]
    fn markers_pass_through_in_order() {
        let layout =
            layout_carriages(&points(), STOP, carriages(&[20.0]), Direction::EastToWest).unwrap();
        let seen: Vec<_> = layout
            .markers
            .iter()
            .map(|m| (m.element.id, m.position))
            .collect();
        assert_eq!(seen, vec![(1, 0.0), (2, 60.0), (3, 150.0)]);
    }

    #[test]
    fn missing_stop_signal_fails() {
        let err = layout_carriages(&points(), ElementRef::node(7), carriages(&[20.0]), Direction::EastToWest)
            .unwrap_err();
        assert_eq!(err, LocateError::MissingStopSignal {
                signal: ElementRef::node(7)
            });
    }

    #[test]
    fn marker_with_signal_id_is_not_a_stop_signal() {
        let pts = vec![projected(99, ElementKind::PlatformMarker, 10.0)];
        let err =
            layout_carriages(&pts, STOP, carriages(&[20.0]), Direction::EastToWest).unwrap_err();
        assert_eq!(err, LocateError::MissingStopSignal { signal: STOP });
    }

    #[test]
    fn stop_signal_matched_by_osm_type_and_id() {
        let mut pts = points();
        pts.push(ProjectedPoint {
            element: GeoElement::new(99, Coordinate::new(50.0, 4.0), ElementKind::Signal)
                .with_osm_type(OsmType::Way),
            position: 40.0,
        });

        let node = layout_carriages(&pts, STOP, carriages(&[20.0]), Direction::EastToWest)
            .unwrap();
        assert_eq!(positions(&node), vec![100.0]);

        let way = layout_carriages(
            &pts,
            ElementRef::way(99),
            carriages(&[20.0]),
            Direction::EastToWest,
        )
        .unwrap();
        assert_eq!(positions(&way), vec![40.0]);
    }

    #[test]
    fn no_carriages_gives_empty_layout() {
        let layout = layout_carriages(&points(), STOP, Vec::new(), Direction::WestToEast).unwrap();
        assert!(layout.carriages.is_empty());
        assert_eq!(layout.markers.len(), 3);
    }

    #[test]
    fn carriages_numbered_across_segments() {
        let mut first = Unit::new("0", 26.4);
        first.seats_first_class = 60;
        let composition = Composition::new(
            TrainId::new("IC1832").unwrap(),
            vec![
                CompositionSegment {
                    id: "0".into(),
                    units: vec![first, Unit::new("1", 26.4)],
                },
                CompositionSegment {
                    id: "1".into(),
                    units: vec![Unit::new("0", 19.1)],
                },
            ],
        );

        let cars = carriages_from(&composition).unwrap();
        let indices: Vec<_> = cars.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(cars[2].length_m, 19.1);
        assert_eq!(cars[0].seat_class, SeatClass::First);
    }

    #[test]
    fn zero_length_unit_is_malformed() {
        let composition = Composition::new(
            TrainId::new("IC1832").unwrap(),
            vec![CompositionSegment {
                id: "0".into(),
                units: vec![Unit::new("0", 26.4), Unit::new("1", 0.0)],
            }],
        );

        let err = carriages_from(&composition).unwrap_err();
        assert!(matches!(err, LocateError::MalformedComposition { .. }));
        assert!(err.to_string().contains("unit 1 of segment 0"));
    }
}
