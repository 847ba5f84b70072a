use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{datetime_to_millis, millis_to_datetime};

/// Continuous time axis: instants map linearly to pixels at millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self {
            start: domain.0,
            end: domain.1,
            linear: LinearScale::new(
                (datetime_to_millis(domain.0), datetime_to_millis(domain.1)),
                range,
            ),
        }
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn time_to_pixel(self, time: DateTime<Utc>) -> f64 {
        self.linear.domain_to_pixel(datetime_to_millis(time))
    }

    /// Exact inverse of [`Self::time_to_pixel`], rounded to the nearest millisecond.
    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> DateTime<Utc> {
        millis_to_datetime(self.linear.pixel_to_domain(pixel))
    }
}
