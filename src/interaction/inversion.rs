use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::band_scale::ordered;
use crate::core::interval::{self, TimeInterval};
use crate::core::{
    BandScale, Observation, Series, TimeScale, XScale, observations_in_buckets,
    observations_in_time_window,
};

use super::BrushExtent;

/// Time-domain reading of a brush snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushOutcome {
    /// Inverted bounds in gesture order; `None` without a usable selection.
    pub domain: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Observations inside the selected time range.
    pub selected: Series,
    /// The earlier bound lands on a highlighted observation.
    pub lower_highlighted: bool,
    /// The later bound lands on a highlighted observation.
    pub upper_highlighted: bool,
}

impl BrushOutcome {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.domain.is_some()
    }
}

/// Maps a pixel to the band domain element it falls in.
///
/// The index is `floor(f * n) - 1` clamped at zero, where `f` is the pixel's
/// fraction of the range span. This is not a geometric inverse: band padding
/// is ignored and a pixel inside band `k > 0` resolves to band `k - 1`.
/// Existing selections depend on this mapping, so it is kept as is.
#[must_use]
pub fn invert_band(scale: &BandScale, pixel: f64) -> Option<DateTime<Utc>> {
    if !pixel.is_finite() || scale.is_empty() {
        return None;
    }
    let (start, stop) = ordered(scale.range());
    let span = stop - start;
    let fraction = if span == 0.0 {
        0.0
    } else {
        (pixel - start) / span
    };
    let index = ((fraction * scale.len() as f64).floor() - 1.0).max(0.0);
    if index >= scale.len() as f64 {
        return None;
    }
    scale.domain().get(index as usize).copied()
}

/// Converts a brush snapshot into a time range, the observations inside it,
/// and whether each bound coincides with a highlighted observation.
///
/// Continuous axes compare bounds to highlights by exact timestamp. Band axes
/// compare calendar buckets, since a column selection lands on a bucket
/// rather than an instant. `interval` and `zone` only matter for band axes.
pub fn invert_brush<Tz: TimeZone>(
    axis: &XScale,
    extent: Option<BrushExtent>,
    series: &[Observation],
    highlights: &[Observation],
    interval: TimeInterval,
    zone: &Tz,
) -> BrushOutcome {
    let Some((p0, p1)) = extent else {
        return BrushOutcome::default();
    };
    if !p0.is_finite() || !p1.is_finite() {
        trace!(p0, p1, "ignoring non-finite brush extent");
        return BrushOutcome::default();
    }

    match axis {
        XScale::Continuous(scale) => invert_continuous(*scale, (p0, p1), series, highlights),
        XScale::Band(scale) => invert_banded(scale, (p0, p1), series, highlights, interval, zone),
    }
}

fn invert_continuous(
    scale: TimeScale,
    (p0, p1): BrushExtent,
    series: &[Observation],
    highlights: &[Observation],
) -> BrushOutcome {
    let t0 = scale.pixel_to_time(p0);
    let t1 = scale.pixel_to_time(p1);
    let (lower, upper) = (t0.min(t1), t0.max(t1));

    BrushOutcome {
        domain: Some((t0, t1)),
        selected: observations_in_time_window(series, t0, t1),
        lower_highlighted: highlights.iter().any(|highlight| highlight.time == lower),
        upper_highlighted: highlights.iter().any(|highlight| highlight.time == upper),
    }
}

fn invert_banded<Tz: TimeZone>(
    scale: &BandScale,
    (p0, p1): BrushExtent,
    series: &[Observation],
    highlights: &[Observation],
    interval: TimeInterval,
    zone: &Tz,
) -> BrushOutcome {
    let (Some(b0), Some(b1)) = (invert_band(scale, p0), invert_band(scale, p1)) else {
        trace!(p0, p1, "brush extent does not resolve to bands");
        return BrushOutcome::default();
    };
    let (lower, upper) = (b0.min(b1), b0.max(b1));
    let in_bucket = |boundary: DateTime<Utc>| {
        highlights
            .iter()
            .any(|highlight| interval::floor(interval, zone, highlight.time) == boundary)
    };

    BrushOutcome {
        domain: Some((b0, b1)),
        selected: observations_in_buckets(series, interval, zone, b0, b1),
        lower_highlighted: in_bucket(lower),
        upper_highlighted: in_bucket(upper),
    }
}
