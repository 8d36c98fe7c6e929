//! Configuration for carriage locating.

/// Default half-width of the station bounding box, in degrees.
pub const DEFAULT_RADIUS: f64 = 0.015;

/// Longest train, in carriages, that has its own stop signal.
pub const DEFAULT_MAX_CARRIAGES: u32 = 12;

/// How the approach direction is read off the operative signal group.
///
/// Stop-signal references count towards one end of the track. If the
/// westmost signal of the operative group carries `west_to_east_ref`, the
/// train comes in from the west; otherwise from the east. This matches the
/// stations sampled so far and is kept configurable until confirmed
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionPolicy {
    pub west_to_east_ref: String,
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        Self {
            west_to_east_ref: "2".to_string(),
        }
    }
}

/// Configuration parameters for locating carriages.
#[derive(Debug, Clone)]
pub struct LocateConfig {
    /// Bounding box half-width around the station (degrees).
    pub radius: f64,

    /// Carriage counts above this are capped to it when picking a signal.
    pub max_carriages: u32,

    /// Rule deriving approach direction from the operative signals.
    pub direction_policy: DirectionPolicy,
}

impl LocateConfig {
    /// Set the bounding box half-width.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the carriage cap.
    pub fn with_max_carriages(mut self, max_carriages: u32) -> Self {
        self.max_carriages = max_carriages;
        self
    }

    /// Set the direction policy.
    pub fn with_direction_policy(mut self, policy: DirectionPolicy) -> Self {
        self.direction_policy = policy;
        self
    }
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            max_carriages: DEFAULT_MAX_CARRIAGES,
            direction_policy: DirectionPolicy::default(),
        }
    }
}
