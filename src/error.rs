use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised while validating configuration or input data.
///
/// Scale and aggregation math never fail: degenerate inputs fall back to
/// documented defaults instead.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
