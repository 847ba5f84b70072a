//! Shared vs. per-series scale derivation for small multiples.
//!
//! Every function here is total. When there is nothing to measure (no
//! series, or only empty series) the scale falls back to a caller-supplied
//! default domain, `(epoch, epoch)` for time axes or an empty band domain.
//! That keeps rendering always producible, but the resulting scale is
//! degenerate: callers that care must check for empty input themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::{extent_by, merge_extents, time_extent};
use crate::core::{BandConfig, BandScale, LinearScale, Observation, Series, TimeScale};

/// Per-axis scale sharing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    /// One scale spanning the union of all series.
    #[default]
    Fixed,
    /// One scale per series spanning only that series.
    Free,
}

/// Scaling per axis; fixed for the lifetime of one facet render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingPolicy {
    pub x: Scaling,
    pub y: Scaling,
}

impl ScalingPolicy {
    #[must_use]
    pub const fn new(x: Scaling, y: Scaling) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn fixed() -> Self {
        Self::new(Scaling::Fixed, Scaling::Fixed)
    }

    #[must_use]
    pub const fn free() -> Self {
        Self::new(Scaling::Free, Scaling::Free)
    }
}

/// One shared scale, or exactly one scale per input series.
#[derive(Debug, Clone, PartialEq)]
pub enum Scales<S> {
    Shared(S),
    PerSeries(Vec<S>),
}

impl<S> Scales<S> {
    /// Scale used by the series at `index`.
    ///
    /// A shared scale answers for every index.
    #[must_use]
    pub fn for_series(&self, index: usize) -> Option<&S> {
        match self {
            Self::Shared(scale) => Some(scale),
            Self::PerSeries(scales) => scales.get(index),
        }
    }

    #[must_use]
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }

    #[must_use]
    pub fn map<T, F>(self, mut f: F) -> Scales<T>
    where
        F: FnMut(S) -> T,
    {
        match self {
            Self::Shared(scale) => Scales::Shared(f(scale)),
            Self::PerSeries(scales) => Scales::PerSeries(scales.into_iter().map(f).collect()),
        }
    }
}

/// Shared continuous scale over the extent of every series' projection.
pub fn fixed_scale<F>(
    series_list: &[Series],
    project: F,
    default_domain: (f64, f64),
    range: (f64, f64),
) -> LinearScale
where
    F: Fn(&Observation) -> f64,
{
    let extent = merge_extents(series_list.iter().map(|series| extent_by(series, &project)));
    let domain = extent.unwrap_or_else(|| {
        debug!(
            series_count = series_list.len(),
            "no data for fixed scale, using default domain"
        );
        default_domain
    });
    trace!(domain_start = domain.0, domain_end = domain.1, "fixed scale");
    LinearScale::new(domain, range)
}

/// One continuous scale per series over that series' own extent.
pub fn free_scales<F>(
    series_list: &[Series],
    project: F,
    default_domain: (f64, f64),
    range: (f64, f64),
) -> Vec<LinearScale>
where
    F: Fn(&Observation) -> f64,
{
    series_list
        .iter()
        .map(|series| {
            let domain = extent_by(series, &project).unwrap_or(default_domain);
            LinearScale::new(domain, range)
        })
        .collect()
}

pub fn continuous_scales<F>(
    scaling: Scaling,
    series_list: &[Series],
    project: F,
    default_domain: (f64, f64),
    range: (f64, f64),
) -> Scales<LinearScale>
where
    F: Fn(&Observation) -> f64,
{
    match scaling {
        Scaling::Fixed => Scales::Shared(fixed_scale(series_list, project, default_domain, range)),
        Scaling::Free => {
            Scales::PerSeries(free_scales(series_list, project, default_domain, range))
        }
    }
}

/// Shared time scale; `(epoch, epoch)` when no series has data.
pub fn fixed_time_scale(series_list: &[Series], range: (f64, f64)) -> TimeScale {
    let extent = merge_extents(series_list.iter().map(|series| time_extent(series)));
    TimeScale::new(extent.unwrap_or_else(epoch_domain), range)
}

pub fn free_time_scales(series_list: &[Series], range: (f64, f64)) -> Vec<TimeScale> {
    series_list
        .iter()
        .map(|series| TimeScale::new(time_extent(series).unwrap_or_else(epoch_domain), range))
        .collect()
}

pub fn time_scales(
    scaling: Scaling,
    series_list: &[Series],
    range: (f64, f64),
) -> Scales<TimeScale> {
    match scaling {
        Scaling::Fixed => Scales::Shared(fixed_time_scale(series_list, range)),
        Scaling::Free => Scales::PerSeries(free_time_scales(series_list, range)),
    }
}

/// Shared band scale whose domain is every distinct timestamp across the series.
///
/// Series are expected to be bucketed already; nothing is re-bucketed here.
pub fn fixed_time_band_scale(
    series_list: &[Series],
    range: (f64, f64),
    band: BandConfig,
) -> BandScale {
    let domain: Vec<DateTime<Utc>> = series_list
        .iter()
        .flat_map(|series| series.iter().map(|observation| observation.time))
        .collect();
    let scale = BandScale::new(domain, range, band);
    trace!(band_count = scale.len(), "fixed band scale");
    scale
}

pub fn free_time_band_scales(
    series_list: &[Series],
    range: (f64, f64),
    band: BandConfig,
) -> Vec<BandScale> {
    series_list
        .iter()
        .map(|series| {
            BandScale::new(
                series.iter().map(|observation| observation.time).collect(),
                range,
                band,
            )
        })
        .collect()
}

pub fn time_band_scales(
    scaling: Scaling,
    series_list: &[Series],
    range: (f64, f64),
    band: BandConfig,
) -> Scales<BandScale> {
    match scaling {
        Scaling::Fixed => Scales::Shared(fixed_time_band_scale(series_list, range, band)),
        Scaling::Free => Scales::PerSeries(free_time_band_scales(series_list, range, band)),
    }
}

/// Widens a scale's domain so it contains `baseline` (column charts grow from zero).
#[must_use]
pub fn include_baseline(scale: LinearScale, baseline: f64) -> LinearScale {
    let (start, end) = scale.domain();
    LinearScale::new((start.min(baseline), end.max(baseline)), scale.range())
}

/// Value projection, the usual y-axis input.
#[must_use]
pub fn value(observation: &Observation) -> f64 {
    observation.value
}

fn epoch_domain() -> (DateTime<Utc>, DateTime<Utc>) {
    (DateTime::UNIX_EPOCH, DateTime::UNIX_EPOCH)
}
