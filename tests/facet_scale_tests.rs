use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use sparkline_rs::core::facet::{
    continuous_scales, fixed_scale, fixed_time_band_scale, fixed_time_scale, free_scales,
    free_time_scales, include_baseline, time_band_scales, time_scales, value,
};
use sparkline_rs::core::{BandConfig, LinearScale, Observation, Scales, Scaling, Series};

fn t(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0)
        .single()
        .expect("valid day")
}

fn two_series() -> Vec<Series> {
    vec![
        vec![Observation::new(t(1), 1.0), Observation::new(t(2), 5.0)],
        vec![Observation::new(t(1), -3.0), Observation::new(t(2), 2.0)],
    ]
}

#[test]
fn fixed_y_spans_the_union_of_series() {
    let scale = fixed_scale(&two_series(), value, (0.0, 0.0), (20.0, 0.0));
    assert_eq!(scale.domain(), (-3.0, 5.0));
    assert_eq!(scale.range(), (20.0, 0.0));
}

#[test]
fn free_y_spans_each_series_alone() {
    let scales = free_scales(&two_series(), value, (0.0, 0.0), (20.0, 0.0));
    assert_eq!(scales.len(), 2);
    assert_eq!(scales[0].domain(), (1.0, 5.0));
    assert_eq!(scales[1].domain(), (-3.0, 2.0));
}

#[test]
fn policy_dispatch_returns_shared_or_per_series() {
    let list = two_series();
    let fixed = continuous_scales(Scaling::Fixed, &list, value, (0.0, 0.0), (0.0, 1.0));
    assert!(fixed.is_shared());
    assert_eq!(fixed.for_series(0), fixed.for_series(1));
    assert_eq!(fixed.for_series(7).map(|s| s.domain()), Some((-3.0, 5.0)));

    let free = continuous_scales(Scaling::Free, &list, value, (0.0, 0.0), (0.0, 1.0));
    assert!(!free.is_shared());
    assert_eq!(free.for_series(1).map(|s| s.domain()), Some((-3.0, 2.0)));
    assert_eq!(free.for_series(2), None);
}

#[test]
fn free_empty_series_uses_the_default_domain() {
    let list = vec![vec![Observation::new(t(1), 4.0)], Vec::new()];
    let scales = free_scales(&list, value, (0.0, 1.0), (0.0, 100.0));
    assert_eq!(scales[0].domain(), (4.0, 4.0));
    assert_eq!(scales[1].domain(), (0.0, 1.0));
}

#[test]
fn time_scales_fixed_and_free() {
    let list = vec![
        vec![Observation::new(t(3), 1.0), Observation::new(t(1), 1.0)],
        vec![Observation::new(t(5), 1.0)],
    ];
    let shared = fixed_time_scale(&list, (0.0, 100.0));
    assert_eq!(shared.domain(), (t(1), t(5)));
    assert_relative_eq!(shared.time_to_pixel(t(3)), 50.0);

    let per_series = free_time_scales(&list, (0.0, 100.0));
    assert_eq!(per_series[0].domain(), (t(1), t(3)));
    assert_eq!(per_series[1].domain(), (t(5), t(5)));
    assert_relative_eq!(per_series[1].time_to_pixel(t(5)), 50.0);

    match time_scales(Scaling::Free, &list, (0.0, 100.0)) {
        Scales::PerSeries(scales) => assert_eq!(scales, per_series),
        Scales::Shared(_) => panic!("free scaling must not share"),
    }
}

#[test]
fn band_scales_fixed_and_free() {
    let list = vec![
        vec![Observation::new(t(1), 1.0), Observation::new(t(2), 1.0)],
        vec![Observation::new(t(2), 1.0), Observation::new(t(3), 1.0)],
    ];
    let shared = fixed_time_band_scale(&list, (0.0, 90.0), BandConfig::flush());
    assert_eq!(shared.domain(), &[t(1), t(2), t(3)]);
    assert_relative_eq!(shared.step(), 30.0);
    assert_eq!(shared.band_start(t(3)), Some(60.0));

    let free = time_band_scales(Scaling::Free, &list, (0.0, 90.0), BandConfig::flush());
    let second = free.for_series(1).expect("second facet scale");
    assert_eq!(second.domain(), &[t(2), t(3)]);
    assert_eq!(second.band_start(t(2)), Some(0.0));
    assert_eq!(second.band_start(t(1)), None);
}

#[test]
fn baseline_is_pulled_into_the_domain() {
    let positive = LinearScale::new((2.0, 8.0), (20.0, 0.0));
    assert_eq!(include_baseline(positive, 0.0).domain(), (0.0, 8.0));

    let negative = LinearScale::new((-6.0, -1.0), (20.0, 0.0));
    assert_eq!(include_baseline(negative, 0.0).domain(), (-6.0, 0.0));

    let spanning = LinearScale::new((-1.0, 1.0), (20.0, 0.0));
    assert_eq!(include_baseline(spanning, 0.0), spanning);
}

#[test]
fn degenerate_scales_stay_total() {
    let flat = LinearScale::new((3.0, 3.0), (0.0, 10.0));
    assert!(flat.is_degenerate());
    assert_eq!(flat.domain_to_pixel(3.0), 5.0);
    assert_eq!(flat.domain_to_pixel(-100.0), 5.0);

    let collapsed = LinearScale::new((0.0, 10.0), (4.0, 4.0));
    assert_eq!(collapsed.pixel_to_domain(4.0), 0.0);
}

#[test]
fn empty_lists_fall_back_to_defaults() {
    let empty: Vec<Series> = Vec::new();
    assert_eq!(
        fixed_scale(&empty, value, (0.0, 0.0), (0.0, 1.0)).domain(),
        (0.0, 0.0)
    );
    assert_eq!(
        fixed_scale(&[Vec::new(), Vec::new()], value, (0.0, 0.0), (0.0, 1.0)).domain(),
        (0.0, 0.0)
    );
    assert!(free_scales(&empty, value, (0.0, 0.0), (0.0, 1.0)).is_empty());
    assert_eq!(
        fixed_time_scale(&empty, (0.0, 1.0)).domain(),
        (DateTime::UNIX_EPOCH, DateTime::UNIX_EPOCH)
    );
    assert!(fixed_time_band_scale(&empty, (0.0, 1.0), BandConfig::default()).is_empty());
    assert_eq!(
        time_scales(Scaling::Free, &empty, (0.0, 1.0)),
        Scales::PerSeries(Vec::new())
    );
}

#[test]
fn nan_values_do_not_poison_extents() {
    let list = vec![vec![
        Observation::new(t(1), f64::NAN),
        Observation::new(t(2), 2.0),
        Observation::new(t(3), -1.0),
    ]];
    assert_eq!(
        fixed_scale(&list, value, (0.0, 0.0), (0.0, 1.0)).domain(),
        (-1.0, 2.0)
    );
}
