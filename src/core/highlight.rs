use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Observation;

/// Emphasized subset of a series. Most policies pick at most two points.
pub type HighlightSet = SmallVec<[Observation; 2]>;

/// Windowed peak detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakSpec {
    /// Neighbors compared on each side of a candidate.
    pub lookaround: usize,
    /// Required lift above the neighbor mean, in neighbor standard deviations.
    pub sensitivity: f64,
    /// Candidates at most this many positions apart merge into one peak.
    pub coalesce: usize,
}

impl Default for PeakSpec {
    fn default() -> Self {
        Self {
            lookaround: 3,
            sensitivity: 1.0,
            coalesce: 0,
        }
    }
}

/// Which observations a sparkline emphasizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Highlight {
    #[default]
    None,
    Last,
    Negative,
    Min,
    Max,
    /// Minimum then maximum.
    MinMax,
    Peaks(PeakSpec),
}

/// Selects the observations `highlight` emphasizes, in a stable order.
///
/// Min and Max keep the first occurrence on ties and skip NaN values.
#[must_use]
pub fn select_highlights(series: &[Observation], highlight: Highlight) -> HighlightSet {
    match highlight {
        Highlight::None => HighlightSet::new(),
        Highlight::Last => series.last().copied().into_iter().collect(),
        Highlight::Negative => series
            .iter()
            .filter(|observation| observation.value < 0.0)
            .copied()
            .collect(),
        Highlight::Min => first_extreme(series, |candidate, best| candidate < best)
            .map(|index| series[index])
            .into_iter()
            .collect(),
        Highlight::Max => first_extreme(series, |candidate, best| candidate > best)
            .map(|index| series[index])
            .into_iter()
            .collect(),
        Highlight::MinMax => {
            let mut selected = HighlightSet::new();
            let min = first_extreme(series, |candidate, best| candidate < best);
            let max = first_extreme(series, |candidate, best| candidate > best);
            if let Some(index) = min {
                selected.push(series[index]);
            }
            if let Some(index) = max.filter(|index| Some(*index) != min) {
                selected.push(series[index]);
            }
            selected
        }
        Highlight::Peaks(spec) => {
            let values: Vec<f64> = series.iter().map(|observation| observation.value).collect();
            peak_indices(&values, spec)
                .into_iter()
                .map(|index| series[index])
                .collect()
        }
    }
}

fn first_extreme<F>(series: &[Observation], better: F) -> Option<usize>
where
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<usize> = None;
    for (index, observation) in series.iter().enumerate() {
        if observation.value.is_nan() {
            continue;
        }
        match best {
            Some(current) if !better(observation.value, series[current].value) => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Indices of positive local peaks in `values`.
///
/// A candidate must be strictly above every non-NaN neighbor within
/// `lookaround` positions and at least `sensitivity` population standard
/// deviations above their mean. A point without neighbors is never a peak.
/// Runs of candidates separated by at most `coalesce` positions keep only
/// their highest member (the first one on ties).
#[must_use]
pub fn peak_indices(values: &[f64], spec: PeakSpec) -> Vec<usize> {
    let mut candidates = Vec::new();
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() || value <= 0.0 {
            continue;
        }
        let low = index.saturating_sub(spec.lookaround);
        let high = index.saturating_add(spec.lookaround).min(values.len() - 1);
        let neighbors: SmallVec<[f64; 16]> = values[low..index]
            .iter()
            .chain(&values[index + 1..=high])
            .copied()
            .filter(|neighbor| !neighbor.is_nan())
            .collect();
        if neighbors.is_empty() || neighbors.iter().any(|&neighbor| neighbor >= value) {
            continue;
        }

        let count = neighbors.len() as f64;
        let mean = neighbors.iter().sum::<f64>() / count;
        let variance = neighbors
            .iter()
            .map(|neighbor| (neighbor - mean).powi(2))
            .sum::<f64>()
            / count;
        if value - mean >= spec.sensitivity * variance.sqrt() {
            candidates.push(index);
        }
    }

    let mut peaks: Vec<usize> = Vec::with_capacity(candidates.len());
    let mut previous: Option<usize> = None;
    for index in candidates {
        let merges = previous.is_some_and(|prev| index - prev <= spec.coalesce);
        previous = Some(index);
        match peaks.last_mut() {
            Some(kept) if merges => {
                if values[index] > values[*kept] {
                    *kept = index;
                }
            }
            _ => peaks.push(index),
        }
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_spike_is_a_peak() {
        let values = [1.0, 1.0, 1.0, 9.0, 1.0, 1.0, 1.0];
        assert_eq!(peak_indices(&values, PeakSpec::default()), vec![3]);
    }

    #[test]
    fn negative_spikes_are_ignored() {
        let values = [-5.0, -5.0, -1.0, -5.0, -5.0];
        assert!(peak_indices(&values, PeakSpec::default()).is_empty());
    }

    #[test]
    fn coalesce_keeps_highest_of_nearby_peaks() {
        let values = [0.0, 5.0, 0.0, 7.0, 0.0, 0.0, 0.0, 0.0, 4.0, 0.0];
        let spec = PeakSpec {
            lookaround: 1,
            sensitivity: 0.0,
            coalesce: 0,
        };
        assert_eq!(peak_indices(&values, spec), vec![1, 3, 8]);

        let spec = PeakSpec { coalesce: 2, ..spec };
        assert_eq!(peak_indices(&values, spec), vec![3, 8]);
    }

    #[test]
    fn high_sensitivity_rejects_noisy_bumps() {
        let values = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0, 2.0];
        let spec = PeakSpec {
            lookaround: 1,
            sensitivity: 10.0,
            coalesce: 0,
        };
        assert!(peak_indices(&values, spec).is_empty());
    }

    #[test]
    fn single_value_has_no_peak() {
        assert!(peak_indices(&[3.0], PeakSpec::default()).is_empty());
        assert!(peak_indices(&[], PeakSpec::default()).is_empty());
    }
}
