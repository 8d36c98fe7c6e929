//! Carriages as laid out along a platform.

use serde::Serialize;

use super::SeatClass;

/// Whether a carriage heads the train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarriageRole {
    Locomotive,
    Carriage,
}

/// A carriage before layout: its place in the train and its length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carriage {
    /// 1-based position in the train, counted over all segments.
    pub index: u32,
    pub length_m: f64,
    pub material_number: Option<String>,
    pub seat_class: SeatClass,
}

impl Carriage {
    pub fn new(index: u32, length_m: f64) -> Self {
        Self {
            index,
            length_m,
            material_number: None,
            seat_class: SeatClass::Second,
        }
    }
}

/// A carriage with its computed position along the projected platform line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedCarriage {
    #[serde(flatten)]
    pub carriage: Carriage,
    /// Metres from the westmost projected point.
    pub position: f64,
    pub role: CarriageRole,
}

impl PositionedCarriage {
    pub fn is_locomotive(&self) -> bool {
        self.role == CarriageRole::Locomotive
    }
}
