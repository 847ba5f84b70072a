use chrono::{DateTime, TimeZone, Utc};

use crate::core::Observation;
use crate::core::interval::{self, TimeInterval};

/// Returns observations whose time falls inside an inclusive window.
///
/// Bounds may be given in either order.
#[must_use]
pub fn observations_in_time_window(
    observations: &[Observation],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Observation> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    observations
        .iter()
        .copied()
        .filter(|observation| observation.time >= min_t && observation.time <= max_t)
        .collect()
}

/// Returns observations whose bucket lies between two bucket boundaries, inclusive.
///
/// Bounds may be given in either order.
#[must_use]
pub fn observations_in_buckets<Tz: TimeZone>(
    observations: &[Observation],
    interval: TimeInterval,
    zone: &Tz,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Observation> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    observations
        .iter()
        .copied()
        .filter(|observation| {
            let bucket = interval::floor(interval, zone, observation.time);
            bucket >= min_t && bucket <= max_t
        })
        .collect()
}
