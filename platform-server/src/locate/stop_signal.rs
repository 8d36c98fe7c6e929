//! Picking the signal the train head stops at.
//!
//! Stop signals are numbered by train length in carriages, in steps of two.
//! An odd-length train stops at the next even signal, and anything longer
//! than the longest numbered stop uses that one.

use crate::domain::GeoElement;

/// Round an odd count below the cap up to even; cap anything above it.
///
/// # Examples
///
/// ```
/// use platform_server::locate::adjusted_carriage_count;
///
/// assert_eq!(adjusted_carriage_count(9, 12), 10);
/// assert_eq!(adjusted_carriage_count(8, 12), 8);
/// assert_eq!(adjusted_carriage_count(15, 12), 12);
/// ```
pub fn adjusted_carriage_count(raw: u32, cap: u32) -> u32 {
    let mut count = raw;
    if count % 2 != 0 && count < cap {
        count += 1;
    }
    if count > cap {
        count = cap;
    }
    count
}

/// The first signal whose numeric `ref` equals `wanted`.
pub fn select_stop_signal(signals: &[GeoElement], wanted: u32) -> Option<&GeoElement> {
    signals.iter().find(|s| s.numeric_ref() == Some(u64::from(wanted)))
}
