use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::Observation;
use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts fractional epoch milliseconds back into an instant.
///
/// Values outside chrono's representable range clamp to its bounds.
#[must_use]
pub fn millis_to_datetime(millis: f64) -> DateTime<Utc> {
    if millis.is_nan() {
        return DateTime::UNIX_EPOCH;
    }
    let min = DateTime::<Utc>::MIN_UTC.timestamp_millis() as f64;
    let max = DateTime::<Utc>::MAX_UTC.timestamp_millis() as f64;
    let clamped = millis.round().clamp(min, max);
    DateTime::from_timestamp_millis(clamped as i64).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Min/max of a projection over observations, ignoring NaN.
///
/// Returns `None` when no observation projects to a comparable value.
pub fn extent_by<F>(observations: &[Observation], project: F) -> Option<(f64, f64)>
where
    F: Fn(&Observation) -> f64,
{
    let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for observation in observations {
        let value = project(observation);
        if value.is_nan() {
            continue;
        }
        let value = OrderedFloat(value);
        extent = Some(match extent {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    extent.map(|(min, max)| (min.0, max.0))
}

/// Earliest and latest timestamps, regardless of observation order.
pub fn time_extent(observations: &[Observation]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let mut iter = observations.iter().map(|observation| observation.time);
    let first = iter.next()?;
    Some(iter.fold((first, first), |(min, max), time| {
        (min.min(time), max.max(time))
    }))
}

/// Extent of extents: min of mins and max of maxes.
pub fn merge_extents<I, T>(extents: I) -> Option<(T, T)>
where
    I: IntoIterator<Item = Option<(T, T)>>,
    T: PartialOrd + Copy,
{
    extents.into_iter().flatten().reduce(|(min_a, max_a), (min_b, max_b)| {
        (
            if min_b < min_a { min_b } else { min_a },
            if max_b > max_a { max_b } else { max_a },
        )
    })
}
