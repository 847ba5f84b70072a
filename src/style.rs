//! Default appearance values.

use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Stroke/fill color plus the color used for highlighted observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub primary: Color,
    pub highlight: Color,
}

/// Brush overlay appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushStyle {
    pub fill: Color,
    pub edge: Color,
    pub edge_width: f64,
}

pub const DEFAULT_COLORS: ColorPair = ColorPair {
    primary: Color::rgb(0.42, 0.45, 0.50),
    highlight: Color::rgb(0.86, 0.20, 0.18),
};

/// Colors cycled by multi-series charts, one pair per series index.
pub const DEFAULT_SERIES_COLORS: [ColorPair; 4] = [
    DEFAULT_COLORS,
    ColorPair {
        primary: Color::rgb(0.12, 0.47, 0.71),
        highlight: Color::rgb(0.84, 0.15, 0.16),
    },
    ColorPair {
        primary: Color::rgb(0.17, 0.63, 0.17),
        highlight: Color::rgb(0.58, 0.40, 0.74),
    },
    ColorPair {
        primary: Color::rgb(1.0, 0.50, 0.05),
        highlight: Color::rgb(0.55, 0.34, 0.29),
    },
];

pub const DEFAULT_BRUSH_STYLE: BrushStyle = BrushStyle {
    fill: Color::rgba(0.47, 0.53, 0.60, 0.25),
    edge: Color::rgba(0.25, 0.28, 0.32, 0.8),
    edge_width: 1.0,
};

#[must_use]
pub fn series_colors(index: usize) -> ColorPair {
    DEFAULT_SERIES_COLORS[index % DEFAULT_SERIES_COLORS.len()]
}
