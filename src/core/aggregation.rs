use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::interval::{self, TimeInterval};
use crate::core::primitives::{merge_extents, time_extent};
use crate::core::{Observation, Series};

/// Named aggregation functions for bucketed series.
///
/// Every variant yields `0.0` for an empty bucket so gaps render as zero bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Sum,
    Mean,
    Min,
    Max,
    Count,
    First,
    Last,
}

impl Aggregation {
    #[must_use]
    pub fn apply(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        match self {
            Self::Sum => sum(values),
            Self::Mean => sum(values) / values.len() as f64,
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Count => values.len() as f64,
            Self::First => values[0],
            Self::Last => values[values.len() - 1],
        }
    }
}

/// Sum of `values`; the default bucket aggregate.
#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |total, value| total + value)
}

/// `(floor(min), ceiling(max))` of a series' timestamps.
///
/// An empty series yields `(epoch, epoch)`, which callers must read as "no
/// data" rather than a one-bucket range.
#[must_use]
pub fn interval_extent<Tz: TimeZone>(
    interval: TimeInterval,
    zone: &Tz,
    series: &[Observation],
) -> (DateTime<Utc>, DateTime<Utc>) {
    round_extent(interval, zone, time_extent(series))
}

/// Shared extent across many series.
///
/// Raw min/max are reconciled first and rounded once.
#[must_use]
pub fn interval_extent_multiple<Tz: TimeZone>(
    interval: TimeInterval,
    zone: &Tz,
    series_list: &[Series],
) -> (DateTime<Utc>, DateTime<Utc>) {
    let raw = merge_extents(series_list.iter().map(|series| time_extent(series)));
    round_extent(interval, zone, raw)
}

fn round_extent<Tz: TimeZone>(
    interval: TimeInterval,
    zone: &Tz,
    raw: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    match raw {
        Some((min, max)) => (
            interval::floor(interval, zone, min),
            interval::ceiling(interval, zone, max),
        ),
        None => (DateTime::UNIX_EPOCH, DateTime::UNIX_EPOCH),
    }
}

/// Buckets `series` into every interval boundary of `extent`, inclusive.
///
/// Each bucket holds `aggregate` of the values whose floored time equals the
/// boundary; empty buckets hold `aggregate(&[])`. Observations outside the
/// extent are dropped. The output is dense and ordered by boundary.
pub fn group_by_intervals_in_extent<F, Tz>(
    aggregate: F,
    interval: TimeInterval,
    zone: &Tz,
    extent: (DateTime<Utc>, DateTime<Utc>),
    series: &[Observation],
) -> Series
where
    F: Fn(&[f64]) -> f64,
    Tz: TimeZone,
{
    let (start, end) = extent;
    let boundaries = interval::range(
        interval,
        1,
        zone,
        start,
        interval::step_boundary(interval, 1, zone, end),
    );

    let mut buckets: IndexMap<DateTime<Utc>, Vec<f64>> =
        IndexMap::with_capacity(boundaries.len());
    for observation in series {
        buckets
            .entry(interval::floor(interval, zone, observation.time))
            .or_default()
            .push(observation.value);
    }

    let grouped: Series = boundaries
        .into_iter()
        .map(|boundary| {
            let values = buckets.get(&boundary).map_or(&[][..], Vec::as_slice);
            Observation::new(boundary, aggregate(values))
        })
        .collect();

    trace!(
        %interval,
        input_count = series.len(),
        bucket_count = grouped.len(),
        "grouped series into interval buckets"
    );
    grouped
}

/// Buckets one series over its own interval extent.
///
/// An empty series stays empty.
pub fn group_by_intervals<F, Tz>(
    aggregate: F,
    interval: TimeInterval,
    zone: &Tz,
    series: &[Observation],
) -> Series
where
    F: Fn(&[f64]) -> f64,
    Tz: TimeZone,
{
    if series.is_empty() {
        debug!(%interval, "no observations to bucket");
        return Vec::new();
    }
    let extent = interval_extent(interval, zone, series);
    group_by_intervals_in_extent(aggregate, interval, zone, extent, series)
}

/// Buckets every series over one shared extent so outputs align index-for-index.
///
/// When no series has data each output is empty.
pub fn group_by_intervals_multiple<F, Tz>(
    aggregate: F,
    interval: TimeInterval,
    zone: &Tz,
    series_list: &[Series],
) -> Vec<Series>
where
    F: Fn(&[f64]) -> f64,
    Tz: TimeZone,
{
    if series_list.iter().all(Vec::is_empty) {
        debug!(%interval, series_count = series_list.len(), "no observations to bucket");
        return vec![Vec::new(); series_list.len()];
    }
    let extent = interval_extent_multiple(interval, zone, series_list);
    series_list
        .iter()
        .map(|series| group_by_intervals_in_extent(&aggregate, interval, zone, extent, series))
        .collect()
}
