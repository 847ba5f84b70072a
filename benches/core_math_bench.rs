use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use sparkline_rs::api::{SparklineConfig, SparklineKind, render_small_multiples};
use sparkline_rs::core::aggregation::sum;
use sparkline_rs::core::{
    BandConfig, BandScale, Highlight, Observation, PeakSpec, ScalingPolicy, Series, TimeInterval,
    Viewport, group_by_intervals, select_highlights,
};
use sparkline_rs::interaction::invert_band;
use std::hint::black_box;

fn minute_series(len: i64, phase: f64) -> Series {
    (0..len)
        .map(|i| {
            let time = DateTime::UNIX_EPOCH + TimeDelta::minutes(i * 7);
            let value = ((i as f64) * 0.05 + phase).sin() * 50.0 + 60.0;
            Observation::new(time, value)
        })
        .collect()
}

fn bench_group_by_hour_10k(c: &mut Criterion) {
    let series = minute_series(10_000, 0.0);
    let zone = FixedOffset::east_opt(3 * 3600).expect("valid offset");

    c.bench_function("group_by_hour_10k", |b| {
        b.iter(|| {
            let _ = group_by_intervals(sum, TimeInterval::Hour, &zone, black_box(&series));
        })
    });
}

fn bench_peak_highlights_10k(c: &mut Criterion) {
    let series = minute_series(10_000, 1.3);
    let policy = Highlight::Peaks(PeakSpec::default());

    c.bench_function("peak_highlights_10k", |b| {
        b.iter(|| {
            let _ = select_highlights(black_box(&series), black_box(policy));
        })
    });
}

fn bench_band_inversion_sweep(c: &mut Criterion) {
    let domain: Vec<_> = (0..365)
        .map(|day| DateTime::UNIX_EPOCH + TimeDelta::days(day))
        .collect();
    let scale = BandScale::new(domain, (0.0, 1_460.0), BandConfig::default());

    c.bench_function("band_inversion_sweep_1460", |b| {
        b.iter(|| {
            for pixel in 0..1_460 {
                let _ = invert_band(&scale, black_box(f64::from(pixel)));
            }
        })
    });
}

fn bench_small_multiples_free_columns(c: &mut Criterion) {
    let list: Vec<Series> = (0..8).map(|i| minute_series(2_000, f64::from(i))).collect();
    let config = SparklineConfig::new(Viewport::new(240, 32))
        .with_interval(TimeInterval::Hour)
        .with_scaling(ScalingPolicy::free())
        .with_highlight(Highlight::MinMax);
    let brush = Some((40.0, 160.0));

    c.bench_function("small_multiples_free_columns_8x2k", |b| {
        b.iter(|| {
            let _ = render_small_multiples(
                black_box(&list),
                SparklineKind::Column,
                &config,
                &Utc,
                &brush,
            )
            .expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_group_by_hour_10k,
    bench_peak_highlights_10k,
    bench_band_inversion_sweep,
    bench_small_multiples_free_columns
);
criterion_main!(benches);
