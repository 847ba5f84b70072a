use chrono::{DateTime, TimeZone, Utc};
use sparkline_rs::core::{
    BandConfig, BandScale, Highlight, Observation, TimeInterval, TimeScale, XScale,
    select_highlights,
};
use sparkline_rs::interaction::{BrushOutcome, invert_brush};

fn h(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, hour, 0, 0)
        .single()
        .expect("valid hour")
}

fn d(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, day, hour, 0, 0)
        .single()
        .expect("valid day")
}

fn hourly() -> Vec<Observation> {
    (0..=10)
        .map(|hour| Observation::new(h(hour), f64::from(hour % 6)))
        .collect()
}

fn continuous_axis() -> XScale {
    TimeScale::new((h(0), h(10)), (0.0, 100.0)).into()
}

#[test]
fn continuous_brush_selects_the_inclusive_time_window() {
    let series = hourly();
    let outcome = invert_brush(
        &continuous_axis(),
        Some((20.0, 50.0)),
        &series,
        &[],
        TimeInterval::Day,
        &Utc,
    );
    assert_eq!(outcome.domain, Some((h(2), h(5))));
    assert_eq!(
        outcome.selected.iter().map(|o| o.time).collect::<Vec<_>>(),
        vec![h(2), h(3), h(4), h(5)]
    );
    assert!(outcome.is_active());
}

#[test]
fn continuous_selection_ignores_gesture_direction() {
    let series = hourly();
    let forward = invert_brush(
        &continuous_axis(),
        Some((20.0, 50.0)),
        &series,
        &[],
        TimeInterval::Day,
        &Utc,
    );
    let backward = invert_brush(
        &continuous_axis(),
        Some((50.0, 20.0)),
        &series,
        &[],
        TimeInterval::Day,
        &Utc,
    );
    assert_eq!(forward.selected, backward.selected);
    assert_eq!(backward.domain, Some((h(5), h(2))));
}

#[test]
fn continuous_bounds_match_highlights_exactly() {
    let series = hourly();
    // Max is 5.0 at hour 5, min is 0.0 at hour 0.
    let highlights = select_highlights(&series, Highlight::MinMax);
    let outcome = invert_brush(
        &continuous_axis(),
        Some((50.0, 20.0)),
        &series,
        &highlights,
        TimeInterval::Day,
        &Utc,
    );
    assert!(!outcome.lower_highlighted);
    assert!(outcome.upper_highlighted);

    let off_grid = invert_brush(
        &continuous_axis(),
        Some((1.0, 51.0)),
        &series,
        &highlights,
        TimeInterval::Day,
        &Utc,
    );
    assert!(!off_grid.lower_highlighted);
    assert!(!off_grid.upper_highlighted);
}

#[test]
fn zero_width_brush_is_still_a_selection() {
    let series = hourly();
    let outcome = invert_brush(
        &continuous_axis(),
        Some((30.0, 30.0)),
        &series,
        &[],
        TimeInterval::Day,
        &Utc,
    );
    assert_eq!(outcome.domain, Some((h(3), h(3))));
    assert_eq!(outcome.selected, vec![series[3]]);
}

#[test]
fn inactive_or_invalid_brush_yields_nothing() {
    let series = hourly();
    let highlights = select_highlights(&series, Highlight::Last);
    for extent in [None, Some((f64::NAN, 10.0)), Some((0.0, f64::INFINITY))] {
        let outcome = invert_brush(
            &continuous_axis(),
            extent,
            &series,
            &highlights,
            TimeInterval::Day,
            &Utc,
        );
        assert_eq!(outcome, BrushOutcome::default());
        assert!(!outcome.is_active());
    }
}

#[test]
fn band_brush_selects_whole_buckets() {
    let buckets: Vec<Observation> = (1..=4).map(|day| Observation::new(d(day, 0), 1.0)).collect();
    let axis: XScale = BandScale::new(
        buckets.iter().map(|o| o.time).collect(),
        (0.0, 100.0),
        BandConfig::flush(),
    )
    .into();
    // A highlight inside the third day's bucket.
    let highlights = [Observation::new(d(3, 12), 9.0)];

    let outcome = invert_brush(
        &axis,
        Some((30.0, 80.0)),
        &buckets,
        &highlights,
        TimeInterval::Day,
        &Utc,
    );
    assert_eq!(outcome.domain, Some((d(1, 0), d(3, 0))));
    assert_eq!(outcome.selected, buckets[..3].to_vec());
    assert!(!outcome.lower_highlighted);
    assert!(outcome.upper_highlighted);
}

#[test]
fn band_brush_with_an_unresolved_bound_is_inactive() {
    let buckets: Vec<Observation> = (1..=4).map(|day| Observation::new(d(day, 0), 1.0)).collect();
    let axis: XScale = BandScale::new(
        buckets.iter().map(|o| o.time).collect(),
        (0.0, 100.0),
        BandConfig::flush(),
    )
    .into();
    let outcome = invert_brush(
        &axis,
        Some((30.0, 130.0)),
        &buckets,
        &[],
        TimeInterval::Day,
        &Utc,
    );
    assert_eq!(outcome, BrushOutcome::default());
}

#[test]
fn empty_series_produces_an_empty_selection() {
    let outcome = invert_brush(
        &continuous_axis(),
        Some((0.0, 100.0)),
        &[],
        &[],
        TimeInterval::Hour,
        &Utc,
    );
    assert!(outcome.is_active());
    assert!(outcome.selected.is_empty());
}
