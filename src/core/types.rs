use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::ChartResult;

/// Pixel size of one sparkline drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One `(time, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl Observation {
    #[must_use]
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value }
    }

    /// Builds an observation from epoch milliseconds.
    ///
    /// Out-of-range milliseconds collapse to the epoch.
    #[must_use]
    pub fn from_millis(millis: i64, value: f64) -> Self {
        Self {
            time: DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH),
            value,
        }
    }

    pub fn from_decimal(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            time,
            value: decimal_to_f64(value, "value")?,
        })
    }
}

/// Ordered sequence of observations.
///
/// Order is the caller's; nothing here assumes it is sorted by time.
pub type Series = Vec<Observation>;
