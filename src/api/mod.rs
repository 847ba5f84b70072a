//! Sparkline assembly: configuration plus the render entry points.

mod sparkline;
mod sparkline_config;

pub use sparkline::{
    SeriesLayer, SparklineFrame, SparklineKind, render_multi_sparkline, render_small_multiples,
    render_sparkline,
};
pub use sparkline_config::{LabelFormatter, Padding, SparklineConfig};
