use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::facet::{self, include_baseline};
use crate::core::{
    HighlightSet, LinearScale, Observation, Scales, Scaling, ScalingPolicy, Series, XScale,
    group_by_intervals, group_by_intervals_multiple, select_highlights,
};
use crate::error::ChartResult;
use crate::interaction::{Brush, BrushExtent, BrushOutcome, invert_brush};
use crate::render::{
    Color, LinePrimitive, PointPrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};
use crate::style::{ColorPair, series_colors};

use super::SparklineConfig;

/// Sparkline layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SparklineKind {
    /// Continuous time axis, one segment per adjacent pair of observations.
    Line,
    /// Bucketed time axis, one bar per interval (gaps render as zero bars).
    Column,
}

/// One plotted series with its derived selections.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    /// Series as plotted: time-sorted for lines, bucketed for columns.
    pub series: Series,
    pub highlights: HighlightSet,
    pub brush: BrushOutcome,
}

/// Geometry and scales for one sparkline surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineFrame {
    pub frame: RenderFrame,
    pub x_scale: XScale,
    pub y_scale: LinearScale,
    pub layers: Vec<SeriesLayer>,
}

/// Renders a single-series sparkline.
pub fn render_sparkline<Tz, B>(
    series: &[Observation],
    kind: SparklineKind,
    config: &SparklineConfig,
    zone: &Tz,
    brush: &B,
) -> ChartResult<SparklineFrame>
where
    Tz: TimeZone,
    B: Brush + ?Sized,
{
    render_multi_sparkline(&[series.to_vec()], kind, config, zone, brush)
}

/// Overlays several series on one surface with shared x and y scales.
///
/// Series after the first use the default series color cycle.
pub fn render_multi_sparkline<Tz, B>(
    series_list: &[Series],
    kind: SparklineKind,
    config: &SparklineConfig,
    zone: &Tz,
    brush: &B,
) -> ChartResult<SparklineFrame>
where
    Tz: TimeZone,
    B: Brush + ?Sized,
{
    let config = config.validate()?;
    debug!(?kind, series_count = series_list.len(), "render multi sparkline");

    let plotted = prepare_series(series_list, kind, &config, zone, true);
    let (x_scale, y_scale) = shared_scales(&plotted, kind, &config);

    let mut frame = RenderFrame::new(config.viewport);
    let selection = brush.current_selection();
    let mut layers = Vec::with_capacity(plotted.len());
    for (index, series) in plotted.into_iter().enumerate() {
        let colors = if index == 0 {
            config.colors
        } else {
            series_colors(index)
        };
        let layer = build_layer(series, &x_scale, selection, &config, zone);
        draw_layer(&mut frame, &layer, &x_scale, y_scale, kind, colors, &config);
        layers.push(layer);
    }
    draw_brush(&mut frame, selection, &config);

    Ok(SparklineFrame {
        frame,
        x_scale,
        y_scale,
        layers,
    })
}

/// Renders one surface per series, scaled per the config's scaling policy.
///
/// The brush snapshot is shared by every facet, so with a fixed x scale all
/// facets select the same time range.
pub fn render_small_multiples<Tz, B>(
    series_list: &[Series],
    kind: SparklineKind,
    config: &SparklineConfig,
    zone: &Tz,
    brush: &B,
) -> ChartResult<Vec<SparklineFrame>>
where
    Tz: TimeZone,
    B: Brush + ?Sized,
{
    let config = config.validate()?;
    debug!(
        ?kind,
        series_count = series_list.len(),
        scaling = ?config.scaling,
        "render small multiples"
    );

    let shared_buckets = config.scaling.x == Scaling::Fixed;
    let plotted = prepare_series(series_list, kind, &config, zone, shared_buckets);
    let (x_scales, y_scales) = derive_scales(&plotted, kind, &config, config.scaling);
    let selection = brush.current_selection();

    let mut frames = Vec::with_capacity(plotted.len());
    for (index, series) in plotted.into_iter().enumerate() {
        let (Some(x_scale), Some(y_scale)) =
            (x_scales.for_series(index), y_scales.for_series(index))
        else {
            continue;
        };
        let mut frame = RenderFrame::new(config.viewport);
        let layer = build_layer(series, x_scale, selection, &config, zone);
        draw_layer(&mut frame, &layer, x_scale, *y_scale, kind, config.colors, &config);
        draw_brush(&mut frame, selection, &config);
        frames.push(SparklineFrame {
            frame,
            x_scale: x_scale.clone(),
            y_scale: *y_scale,
            layers: vec![layer],
        });
    }
    Ok(frames)
}

fn prepare_series<Tz: TimeZone>(
    series_list: &[Series],
    kind: SparklineKind,
    config: &SparklineConfig,
    zone: &Tz,
    shared_buckets: bool,
) -> Vec<Series> {
    let aggregate = |values: &[f64]| config.aggregation.apply(values);
    match kind {
        SparklineKind::Line => series_list
            .iter()
            .map(|series| {
                let mut sorted = series.clone();
                sorted.sort_by_key(|observation| observation.time);
                sorted
            })
            .collect(),
        SparklineKind::Column if shared_buckets => {
            group_by_intervals_multiple(aggregate, config.interval, zone, series_list)
        }
        SparklineKind::Column => series_list
            .iter()
            .map(|series| group_by_intervals(aggregate, config.interval, zone, series))
            .collect(),
    }
}

fn shared_scales(
    plotted: &[Series],
    kind: SparklineKind,
    config: &SparklineConfig,
) -> (XScale, LinearScale) {
    let y_scale = facet::fixed_scale(plotted, facet::value, (0.0, 0.0), config.y_range());
    match kind {
        SparklineKind::Line => (
            facet::fixed_time_scale(plotted, config.x_range()).into(),
            y_scale,
        ),
        SparklineKind::Column => (
            facet::fixed_time_band_scale(plotted, config.x_range(), config.band).into(),
            include_baseline(y_scale, 0.0),
        ),
    }
}

fn derive_scales(
    plotted: &[Series],
    kind: SparklineKind,
    config: &SparklineConfig,
    policy: ScalingPolicy,
) -> (Scales<XScale>, Scales<LinearScale>) {
    let x_range = config.x_range();
    let y_range = config.y_range();
    let y_scales =
        facet::continuous_scales(policy.y, plotted, facet::value, (0.0, 0.0), y_range);
    match kind {
        SparklineKind::Line => (
            facet::time_scales(policy.x, plotted, x_range).map(XScale::from),
            y_scales,
        ),
        SparklineKind::Column => (
            facet::time_band_scales(policy.x, plotted, x_range, config.band).map(XScale::from),
            y_scales.map(|scale| include_baseline(scale, 0.0)),
        ),
    }
}

fn build_layer<Tz: TimeZone>(
    series: Series,
    x_scale: &XScale,
    selection: Option<BrushExtent>,
    config: &SparklineConfig,
    zone: &Tz,
) -> SeriesLayer {
    let highlights = select_highlights(&series, config.highlight);
    let brush = invert_brush(x_scale, selection, &series, &highlights, config.interval, zone);
    SeriesLayer {
        series,
        highlights,
        brush,
    }
}

fn draw_layer(
    frame: &mut RenderFrame,
    layer: &SeriesLayer,
    x_scale: &XScale,
    y_scale: LinearScale,
    kind: SparklineKind,
    colors: ColorPair,
    config: &SparklineConfig,
) {
    match (kind, x_scale) {
        (SparklineKind::Column, XScale::Band(bands)) => {
            let baseline_y = y_scale.domain_to_pixel(0.0);
            for observation in &layer.series {
                let Some(x) = bands.band_start(observation.time) else {
                    continue;
                };
                if !observation.value.is_finite() {
                    continue;
                }
                let value_y = y_scale.domain_to_pixel(observation.value);
                let fill = if layer.highlights.contains(observation) {
                    colors.highlight
                } else {
                    colors.primary
                };
                frame.rects.push(RectPrimitive::new(
                    x,
                    value_y.min(baseline_y),
                    bands.bandwidth(),
                    (value_y - baseline_y).abs(),
                    fill,
                ));
            }
        }
        _ => {
            let mapped: Vec<(f64, f64)> = layer
                .series
                .iter()
                .filter(|observation| observation.value.is_finite())
                .filter_map(|observation| {
                    let x = x_scale.position(observation.time)?;
                    Some((x, y_scale.domain_to_pixel(observation.value)))
                })
                .collect();
            for pair in mapped.windows(2) {
                frame.lines.push(LinePrimitive::new(
                    pair[0].0,
                    pair[0].1,
                    pair[1].0,
                    pair[1].1,
                    config.stroke_width,
                    colors.primary,
                ));
            }
            for highlight in &layer.highlights {
                let Some(x) = x_scale.position(highlight.time) else {
                    continue;
                };
                if !highlight.value.is_finite() {
                    continue;
                }
                let y = y_scale.domain_to_pixel(highlight.value);
                frame
                    .points
                    .push(PointPrimitive::new(x, y, config.point_radius, colors.highlight));
            }
        }
    }

    if let Some(formatter) = config.label_formatter {
        draw_labels(frame, layer, x_scale, y_scale, colors.highlight, formatter, config);
    }
}

fn draw_labels(
    frame: &mut RenderFrame,
    layer: &SeriesLayer,
    x_scale: &XScale,
    y_scale: LinearScale,
    color: Color,
    formatter: super::LabelFormatter,
    config: &SparklineConfig,
) {
    for highlight in &layer.highlights {
        let text = formatter(highlight);
        if text.is_empty() || !highlight.value.is_finite() {
            continue;
        }
        let Some(x) = x_scale.position(highlight.time) else {
            continue;
        };
        let y = y_scale.domain_to_pixel(highlight.value) - config.point_radius - 2.0;
        frame.texts.push(TextPrimitive::new(
            text,
            x,
            y,
            config.label_font_size_px,
            color,
            TextHAlign::Center,
        ));
    }
}

fn draw_brush(frame: &mut RenderFrame, selection: Option<BrushExtent>, config: &SparklineConfig) {
    let Some((p0, p1)) = selection else {
        return;
    };
    if !p0.is_finite() || !p1.is_finite() {
        return;
    }
    let (x_min, x_max) = config.x_range();
    let left = p0.min(p1).clamp(x_min, x_max);
    let right = p0.max(p1).clamp(x_min, x_max);
    let (bottom, top) = config.y_range();
    let style = config.brush_style;

    frame.rects.push(RectPrimitive::new(
        left,
        top,
        right - left,
        bottom - top,
        style.fill,
    ));
    for x in [left, right] {
        frame
            .lines
            .push(LinePrimitive::new(x, top, x, bottom, style.edge_width, style.edge));
    }
}
