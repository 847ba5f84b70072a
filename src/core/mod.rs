pub mod aggregation;
pub mod axis;
pub mod band_scale;
pub mod facet;
pub mod highlight;
pub mod interval;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod windowing;

pub use aggregation::{
    Aggregation, group_by_intervals, group_by_intervals_in_extent, group_by_intervals_multiple,
    interval_extent, interval_extent_multiple,
};
pub use axis::XScale;
pub use band_scale::{BandConfig, BandScale};
pub use facet::{Scales, Scaling, ScalingPolicy};
pub use highlight::{Highlight, HighlightSet, PeakSpec, select_highlights};
pub use interval::TimeInterval;
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{Observation, Series, Viewport};
pub use windowing::{observations_in_buckets, observations_in_time_window};
