use chrono::{DateTime, Utc};

use crate::core::{BandScale, TimeScale};

/// Horizontal axis of a sparkline: continuous for lines, banded for columns.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    Continuous(TimeScale),
    Band(BandScale),
}

impl XScale {
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Continuous(scale) => scale.range(),
            Self::Band(scale) => scale.range(),
        }
    }

    /// Pixel x of `time`: the mapped instant, or the center of its band.
    #[must_use]
    pub fn position(&self, time: DateTime<Utc>) -> Option<f64> {
        match self {
            Self::Continuous(scale) => Some(scale.time_to_pixel(time)),
            Self::Band(scale) => scale.band_center(time),
        }
    }

    /// Width drawn per observation; zero on a continuous axis.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        match self {
            Self::Continuous(_) => 0.0,
            Self::Band(scale) => scale.bandwidth(),
        }
    }

    #[must_use]
    pub fn is_band(&self) -> bool {
        matches!(self, Self::Band(_))
    }
}

impl From<TimeScale> for XScale {
    fn from(value: TimeScale) -> Self {
        Self::Continuous(value)
    }
}

impl From<BandScale> for XScale {
    fn from(value: BandScale) -> Self {
        Self::Band(value)
    }
}
