//! sparkline-rs: compact time-series charts.
//!
//! Observations are bucketed by calendar interval, mapped through shared or
//! per-series scales, decorated with highlight markers, and emitted as
//! backend-agnostic draw commands. Brush snapshots are inverted back into
//! time ranges so hosts can link selections across charts.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod loader;
pub mod render;
pub mod style;
pub mod telemetry;

pub use api::{
    SparklineConfig, SparklineFrame, SparklineKind, render_multi_sparkline,
    render_small_multiples, render_sparkline,
};
pub use error::{ChartError, ChartResult};
