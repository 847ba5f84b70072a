use chrono::{DateTime, TimeDelta, Utc};
use proptest::prelude::*;
use sparkline_rs::core::facet::{fixed_scale, free_scales, value};
use sparkline_rs::core::{
    BandConfig, BandScale, Highlight, Observation, Series, TimeInterval, TimeScale, XScale,
    select_highlights,
};
use sparkline_rs::interaction::{invert_band, invert_brush};

fn at(hours: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::hours(hours)
}

fn series_from(values: &[f64]) -> Series {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| Observation::new(at(index as i64), value))
        .collect()
}

proptest! {
    #[test]
    fn fixed_domain_covers_every_free_domain(
        lists in prop::collection::vec(prop::collection::vec(-500.0f64..500.0, 1..16), 1..6)
    ) {
        let list: Vec<Series> = lists.iter().map(|values| series_from(values)).collect();
        let fixed = fixed_scale(&list, value, (0.0, 0.0), (0.0, 100.0)).domain();
        let free = free_scales(&list, value, (0.0, 0.0), (0.0, 100.0));

        prop_assert_eq!(free.len(), list.len());
        for scale in &free {
            let (min, max) = scale.domain();
            prop_assert!(fixed.0 <= min && max <= fixed.1);
        }
        let lowest = free.iter().map(|s| s.domain().0).fold(f64::INFINITY, f64::min);
        let highest = free.iter().map(|s| s.domain().1).fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(fixed, (lowest, highest));
    }

    #[test]
    fn continuous_brush_is_order_independent(
        values in prop::collection::vec(-10.0f64..10.0, 2..40),
        p0 in -20.0f64..220.0,
        p1 in -20.0f64..220.0
    ) {
        let series = series_from(&values);
        let axis: XScale =
            TimeScale::new((at(0), at(values.len() as i64 - 1)), (0.0, 200.0)).into();
        let highlights = select_highlights(&series, Highlight::MinMax);

        let invert = |extent| {
            invert_brush(&axis, Some(extent), &series, &highlights, TimeInterval::Hour, &Utc)
        };
        let forward = invert((p0, p1));
        let backward = invert((p1, p0));
        prop_assert_eq!(&forward.selected, &backward.selected);
        prop_assert_eq!(forward.lower_highlighted, backward.lower_highlighted);
        prop_assert_eq!(forward.upper_highlighted, backward.upper_highlighted);
    }

    #[test]
    fn band_inversion_matches_the_index_formula(
        band_count in 1usize..40,
        fraction in 0.0f64..=1.0
    ) {
        let domain: Vec<_> = (0..band_count as i64).map(at).collect();
        let scale = BandScale::new(domain.clone(), (0.0, 400.0), BandConfig::default());
        let pixel = fraction * 400.0;

        let expected_index = ((pixel / 400.0 * band_count as f64).floor() - 1.0).max(0.0) as usize;
        prop_assert_eq!(invert_band(&scale, pixel), domain.get(expected_index).copied());
    }

    #[test]
    fn min_max_orders_minimum_first(values in prop::collection::vec(-100.0f64..100.0, 1..32)) {
        let series = series_from(&values);
        let selected = select_highlights(&series, Highlight::MinMax);
        prop_assert!(!selected.is_empty() && selected.len() <= 2);
        prop_assert!(selected[0].value <= selected[selected.len() - 1].value);
    }
}
