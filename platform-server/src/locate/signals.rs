//! Forward and backward signal groups on one track.

use crate::domain::{ElementKind, GeoElement, SignalDirection};

/// Signals on a track, split by their direction tag.
///
/// Each group keeps every signal carrying that direction, in source order.
/// Signals without a numeric `ref` stay in the raw group but are dropped
/// by [`SignalGroups::ordered`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalGroups {
    pub forward: Vec<GeoElement>,
    pub backward: Vec<GeoElement>,
}

impl SignalGroups {
    /// Partition signals by `railway:signal:direction`.
    ///
    /// Non-signal elements and signals with no recognised direction are
    /// ignored.
    pub fn partition(signals: impl IntoIterator<Item = GeoElement>) -> Self {
        let mut groups = SignalGroups::default();
        for signal in signals {
            if signal.kind != ElementKind::Signal {
                continue;
            }
            match signal.signal_direction() {
                Some(SignalDirection::Forward) => groups.forward.push(signal),
                Some(SignalDirection::Backward) => groups.backward.push(signal),
                None => {}
            }
        }
        groups
    }

    /// The raw group for a direction.
    pub fn raw(&self, direction: SignalDirection) -> &[GeoElement] {
        match direction {
            SignalDirection::Forward => &self.forward,
            SignalDirection::Backward => &self.backward,
        }
    }

    /// The group's numerically referenced signals, ascending by `ref`.
    ///
    /// Ties keep source order.
    pub fn ordered(&self, direction: SignalDirection) -> Vec<GeoElement> {
        let mut numbered: Vec<(u64, &GeoElement)> = self
            .raw(direction)
            .iter()
            .filter_map(|s| s.numeric_ref().map(|n| (n, s)))
            .collect();
        numbered.sort_by_key(|(n, _)| *n);
        numbered.into_iter().map(|(_, s)| s.clone()).collect()
    }

    /// True if neither group has any signal at all.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.backward.is_empty()
    }
}
