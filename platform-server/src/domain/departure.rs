//! Liveboard departures.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{StationId, TrackNumber, TrainId};

/// One departure on a station's liveboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Departure {
    /// Upstream departure id (stable only within one board).
    pub id: String,
    pub train: TrainId,
    /// Display name of the vehicle, e.g. `IC 1832`.
    pub train_name: String,
    /// Terminus name.
    pub destination: String,
    pub destination_id: Option<StationId>,
    pub scheduled: DateTime<Utc>,
    pub delay_secs: i64,
    /// Platform as printed on the board; may be absent or non-numeric.
    pub platform: Option<String>,
    pub is_canceled: bool,
}

impl Departure {
    /// True if the board lists this departure on the given track.
    pub fn is_on_track(&self, track: &TrackNumber) -> bool {
        self.platform.as_deref() == Some(track.as_str())
    }

    /// Scheduled time plus the announced delay.
    pub fn expected(&self) -> DateTime<Utc> {
        self.scheduled + chrono::Duration::seconds(self.delay_secs)
    }
}
