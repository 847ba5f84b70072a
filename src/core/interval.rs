//! Calendar-aware time intervals.
//!
//! Calendar fields are computed in the supplied zone's local time and then
//! mapped back to an instant. Ambiguous local times resolve to the earliest
//! instant; local times skipped by a DST gap move forward with the offset in
//! effect before the gap, so a floored boundary never lands in the previous
//! bucket.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone,
    Timelike, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Bucket granularity for time bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInterval {
    Year,
    Quarter,
    Month,
    /// ISO week, starting Monday 00:00.
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl TimeInterval {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }

    /// Whether buckets follow the local calendar rather than fixed durations.
    #[must_use]
    pub const fn is_calendar(self) -> bool {
        matches!(self, Self::Year | Self::Quarter | Self::Month | Self::Week | Self::Day)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeInterval {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "quarter" => Ok(Self::Quarter),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            "millisecond" => Ok(Self::Millisecond),
            other => Err(ChartError::InvalidData(format!(
                "unknown time interval `{other}`"
            ))),
        }
    }
}

/// Rounds `time` down to the start of its bucket.
#[must_use]
pub fn floor<Tz: TimeZone>(
    interval: TimeInterval,
    zone: &Tz,
    time: DateTime<Utc>,
) -> DateTime<Utc> {
    floor_local(interval, time.with_timezone(zone).naive_local())
        .map(|naive| resolve_local(zone, naive))
        .unwrap_or(time)
}

/// Rounds `time` up to a bucket boundary. Boundaries map to themselves.
#[must_use]
pub fn ceiling<Tz: TimeZone>(
    interval: TimeInterval,
    zone: &Tz,
    time: DateTime<Utc>,
) -> DateTime<Utc> {
    let floored = floor(interval, zone, time);
    if floored == time {
        time
    } else {
        step_boundary(interval, 1, zone, floored)
    }
}

/// Steps a bucket boundary by `count` intervals and lands on a boundary.
///
/// A boundary moved off local midnight by a DST gap keeps its shifted wall
/// clock under plain `add`; calendar steps are floored again to undo that.
#[must_use]
pub fn step_boundary<Tz: TimeZone>(
    interval: TimeInterval,
    count: i64,
    zone: &Tz,
    boundary: DateTime<Utc>,
) -> DateTime<Utc> {
    let stepped = add(interval, count, zone, boundary);
    if interval.is_calendar() {
        floor(interval, zone, stepped)
    } else {
        stepped
    }
}

/// Steps `time` by `count` intervals (negative counts step backwards).
///
/// Month-based intervals clamp the day to the target month's length.
/// Overflowing chrono's range leaves `time` unchanged.
#[must_use]
pub fn add<Tz: TimeZone>(
    interval: TimeInterval,
    count: i64,
    zone: &Tz,
    time: DateTime<Utc>,
) -> DateTime<Utc> {
    let stepped = match interval {
        TimeInterval::Year => add_local_months(zone, time, count.saturating_mul(12)),
        TimeInterval::Quarter => add_local_months(zone, time, count.saturating_mul(3)),
        TimeInterval::Month => add_local_months(zone, time, count),
        TimeInterval::Week => add_local_days(zone, time, count.saturating_mul(7)),
        TimeInterval::Day => add_local_days(zone, time, count),
        TimeInterval::Hour => TimeDelta::try_hours(count).and_then(|d| time.checked_add_signed(d)),
        TimeInterval::Minute => {
            TimeDelta::try_minutes(count).and_then(|d| time.checked_add_signed(d))
        }
        TimeInterval::Second => {
            TimeDelta::try_seconds(count).and_then(|d| time.checked_add_signed(d))
        }
        TimeInterval::Millisecond => {
            TimeDelta::try_milliseconds(count).and_then(|d| time.checked_add_signed(d))
        }
    };
    stepped.unwrap_or(time)
}

/// Bucket boundaries from `ceiling(start)` in steps of `step`, strictly below `end`.
///
/// Boundaries are stepped from the first one with [`step_boundary`].
#[must_use]
pub fn range<Tz: TimeZone>(
    interval: TimeInterval,
    step: u32,
    zone: &Tz,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    if step == 0 || start >= end {
        return Vec::new();
    }

    let first = ceiling(interval, zone, start);
    let mut boundaries = Vec::new();
    let mut current = first;
    let mut offset = 0_i64;
    while current < end {
        boundaries.push(current);
        offset += i64::from(step);
        let next = step_boundary(interval, offset, zone, first);
        if next <= current {
            break;
        }
        current = next;
    }
    boundaries
}

fn floor_local(interval: TimeInterval, local: NaiveDateTime) -> Option<NaiveDateTime> {
    let date = local.date();
    let midnight = |day: NaiveDate| day.and_hms_opt(0, 0, 0);
    match interval {
        TimeInterval::Year => midnight(NaiveDate::from_ymd_opt(date.year(), 1, 1)?),
        TimeInterval::Quarter => {
            let month = (date.month0() / 3) * 3 + 1;
            midnight(NaiveDate::from_ymd_opt(date.year(), month, 1)?)
        }
        TimeInterval::Month => midnight(date.with_day(1)?),
        TimeInterval::Week => {
            let back = u64::from(date.weekday().num_days_from_monday());
            midnight(date.checked_sub_days(Days::new(back))?)
        }
        TimeInterval::Day => midnight(date),
        TimeInterval::Hour => date.and_hms_opt(local.hour(), 0, 0),
        TimeInterval::Minute => date.and_hms_opt(local.hour(), local.minute(), 0),
        TimeInterval::Second => date.and_hms_opt(local.hour(), local.minute(), local.second()),
        TimeInterval::Millisecond => date.and_hms_milli_opt(
            local.hour(),
            local.minute(),
            local.second(),
            local.nanosecond() / 1_000_000,
        ),
    }
}

fn add_local_months<Tz: TimeZone>(
    zone: &Tz,
    time: DateTime<Utc>,
    months: i64,
) -> Option<DateTime<Utc>> {
    let naive = time.with_timezone(zone).naive_local();
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let stepped = if months >= 0 {
        naive.checked_add_months(magnitude)?
    } else {
        naive.checked_sub_months(magnitude)?
    };
    Some(resolve_local(zone, stepped))
}

fn add_local_days<Tz: TimeZone>(
    zone: &Tz,
    time: DateTime<Utc>,
    days: i64,
) -> Option<DateTime<Utc>> {
    let naive = time.with_timezone(zone).naive_local();
    let magnitude = Days::new(days.unsigned_abs());
    let stepped = if days >= 0 {
        naive.checked_add_days(magnitude)?
    } else {
        naive.checked_sub_days(magnitude)?
    };
    Some(resolve_local(zone, stepped))
}

fn resolve_local<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(resolved) = zone.from_local_datetime(&naive).earliest() {
        return resolved.with_timezone(&Utc);
    }
    // Skipped by a gap: a day earlier is still on the pre-transition offset.
    let before = naive.checked_sub_days(Days::new(1)).unwrap_or(naive);
    let offset = zone.offset_from_utc_datetime(&before).fix().local_minus_utc();
    let utc = naive
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset)))
        .unwrap_or(naive);
    Utc.from_utc_datetime(&utc)
}
