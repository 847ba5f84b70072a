use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Padding and alignment for band scales, in band-step units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub align: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            padding_inner: 0.1,
            padding_outer: 0.1,
            align: 0.5,
        }
    }
}

impl BandConfig {
    /// Config with no padding: bands tile the range exactly.
    #[must_use]
    pub fn flush() -> Self {
        Self {
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner;
        self.padding_outer = outer;
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align;
        self
    }

    fn sanitized(self) -> Self {
        let clamp_unit = |value: f64| {
            if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        Self {
            padding_inner: clamp_unit(self.padding_inner),
            padding_outer: if self.padding_outer.is_finite() {
                self.padding_outer.max(0.0)
            } else {
                0.0
            },
            align: if self.align.is_finite() {
                self.align.clamp(0.0, 1.0)
            } else {
                0.5
            },
        }
    }
}

/// Discrete time axis: each distinct bucket boundary owns one contiguous pixel band.
///
/// The domain is kept sorted ascending and free of duplicates. There is no
/// inverse here; pixel-to-band lookup lives with the brush code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<DateTime<Utc>>,
    range: (f64, f64),
    config: BandConfig,
    step: f64,
    bandwidth: f64,
    first_band_start: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(mut domain: Vec<DateTime<Utc>>, range: (f64, f64), config: BandConfig) -> Self {
        domain.sort_unstable();
        domain.dedup();
        let config = config.sanitized();

        let count = domain.len() as f64;
        let (start, stop) = ordered(range);
        let slots = (count - config.padding_inner + config.padding_outer * 2.0).max(1.0);
        let step = (stop - start) / slots;
        let first_band_start =
            start + (stop - start - step * (count - config.padding_inner)) * config.align;
        let bandwidth = step * (1.0 - config.padding_inner);

        Self {
            domain,
            range,
            config,
            step,
            bandwidth,
            first_band_start,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[DateTime<Utc>] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn config(&self) -> BandConfig {
        self.config
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Pixel start of the band at `index` in domain order.
    ///
    /// A reversed range (`range.0 > range.1`) lays bands out right to left.
    #[must_use]
    pub fn band_start_at(&self, index: usize) -> Option<f64> {
        if index >= self.domain.len() {
            return None;
        }
        let slot = if self.range.0 > self.range.1 {
            self.domain.len() - 1 - index
        } else {
            index
        };
        Some(self.first_band_start + self.step * slot as f64)
    }

    /// Pixel start of the band holding `time`, if `time` is in the domain.
    #[must_use]
    pub fn band_start(&self, time: DateTime<Utc>) -> Option<f64> {
        let index = self.domain.binary_search(&time).ok()?;
        self.band_start_at(index)
    }

    #[must_use]
    pub fn band_center(&self, time: DateTime<Utc>) -> Option<f64> {
        self.band_start(time).map(|start| start + self.bandwidth / 2.0)
    }
}

pub(crate) fn ordered(range: (f64, f64)) -> (f64, f64) {
    if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    }
}
