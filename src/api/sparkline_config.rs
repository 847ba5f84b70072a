use serde::{Deserialize, Serialize};

use crate::core::{
    Aggregation, BandConfig, Highlight, Observation, ScalingPolicy, TimeInterval, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::style::{BrushStyle, ColorPair, DEFAULT_BRUSH_STYLE, DEFAULT_COLORS};

/// Formats the label drawn next to a highlighted observation.
pub type LabelFormatter = fn(&Observation) -> String;

/// Pixel insets between the viewport edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(2.0)
    }
}

impl Padding {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Declarative sparkline setup.
///
/// Every field has a default, so a partially specified config (including
/// partial JSON) is always usable. The label formatter is a function pointer
/// and is not serialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineConfig {
    pub viewport: Viewport,
    pub padding: Padding,
    pub interval: TimeInterval,
    pub aggregation: Aggregation,
    pub highlight: Highlight,
    pub scaling: ScalingPolicy,
    pub band: BandConfig,
    pub stroke_width: f64,
    pub point_radius: f64,
    pub label_font_size_px: f64,
    pub colors: ColorPair,
    pub brush_style: BrushStyle,
    #[serde(skip)]
    pub label_formatter: Option<LabelFormatter>,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(100, 20),
            padding: Padding::default(),
            interval: TimeInterval::Day,
            aggregation: Aggregation::Sum,
            highlight: Highlight::None,
            scaling: ScalingPolicy::fixed(),
            band: BandConfig::default(),
            stroke_width: 1.0,
            point_radius: 1.5,
            label_font_size_px: 9.0,
            colors: DEFAULT_COLORS,
            brush_style: DEFAULT_BRUSH_STYLE,
            label_formatter: None,
        }
    }
}

impl SparklineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the bucket granularity for column charts.
    #[must_use]
    pub fn with_interval(mut self, interval: TimeInterval) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_scaling(mut self, scaling: ScalingPolicy) -> Self {
        self.scaling = scaling;
        self
    }

    #[must_use]
    pub fn with_band(mut self, band: BandConfig) -> Self {
        self.band = band;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn with_point_radius(mut self, point_radius: f64) -> Self {
        self.point_radius = point_radius;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_brush_style(mut self, brush_style: BrushStyle) -> Self {
        self.brush_style = brush_style;
        self
    }

    /// Enables highlight labels formatted by `formatter`.
    #[must_use]
    pub fn with_label_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.label_formatter = Some(formatter);
        self
    }

    /// Horizontal pixel range of the plot area.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (
            self.padding.left,
            f64::from(self.viewport.width) - self.padding.right,
        )
    }

    /// Vertical pixel range of the plot area, bottom first so larger values sit higher.
    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (
            f64::from(self.viewport.height) - self.padding.bottom,
            self.padding.top,
        )
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for (value, name) in [
            (self.padding.top, "padding.top"),
            (self.padding.right, "padding.right"),
            (self.padding.bottom, "padding.bottom"),
            (self.padding.left, "padding.left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "sparkline config `{name}` must be finite and >= 0"
                )));
            }
        }

        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();
        if x1 <= x0 || y0 <= y1 {
            return Err(ChartError::InvalidData(
                "sparkline padding leaves no plot area".to_owned(),
            ));
        }

        for (value, name) in [
            (self.stroke_width, "stroke_width"),
            (self.point_radius, "point_radius"),
            (self.label_font_size_px, "label_font_size_px"),
            (self.brush_style.edge_width, "brush_style.edge_width"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "sparkline config `{name}` must be finite and > 0"
                )));
            }
        }

        self.colors.primary.validate()?;
        self.colors.highlight.validate()?;
        self.brush_style.fill.validate()?;
        self.brush_style.edge.validate()?;
        Ok(self)
    }
}
