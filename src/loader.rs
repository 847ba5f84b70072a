//! CSV ingestion for sparkline series.
//!
//! Decoding is pure and always available. Fetching over HTTP needs the
//! `http-loader` feature. Failures are reported once and never retried.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::{Observation, Series};

/// Closed set of failures when loading a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("bad url: {0}")]
    BadUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("unexpected http status {0}")]
    BadStatus(u16),

    #[error("bad body: {0}")]
    BadBody(String),
}

/// Decodes a headed CSV body into observations.
///
/// `time_column` accepts RFC 3339 timestamps or integer epoch milliseconds.
/// Rows with an empty value cell are skipped; any other unparsable cell fails
/// the whole body. Row order is preserved.
pub fn decode_series(
    body: &str,
    time_column: &str,
    value_column: &str,
) -> Result<Series, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| LoadError::BadBody(err.to_string()))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .ok_or_else(|| LoadError::BadBody(format!("missing column `{name}`")))
    };
    let time_index = column(time_column)?;
    let value_index = column(value_column)?;

    let mut series = Series::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|err| LoadError::BadBody(err.to_string()))?;
        let raw_time = record.get(time_index).unwrap_or_default();
        let raw_value = record.get(value_index).unwrap_or_default();
        if raw_value.is_empty() {
            trace!(row, "skipping row with empty value");
            continue;
        }

        let time = parse_time(raw_time)
            .ok_or_else(|| LoadError::BadBody(format!("row {row}: bad time `{raw_time}`")))?;
        let value = raw_value.parse::<f64>().map_err(|err| {
            LoadError::BadBody(format!("row {row}: bad value `{raw_value}`: {err}"))
        })?;
        series.push(Observation::new(time, value));
    }

    debug!(rows = series.len(), time_column, value_column, "decoded csv series");
    Ok(series)
}

/// Deserializes every CSV row into `T` by header name.
pub fn decode_records<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|err| LoadError::BadBody(err.to_string()))
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

#[cfg(feature = "http-loader")]
pub use http::{fetch_csv, fetch_series};

#[cfg(feature = "http-loader")]
mod http {
    use std::time::Duration;

    use tracing::{debug, warn};

    use super::{LoadError, decode_series};
    use crate::core::Series;

    /// Fetches a CSV body with a blocking GET.
    pub fn fetch_csv(url: &str, timeout: Duration) -> Result<String, LoadError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|err| LoadError::BadUrl(err.to_string()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LoadError::NetworkError(err.to_string()))?;

        let response = client.get(parsed).send().map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "csv fetch rejected");
            return Err(LoadError::BadStatus(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|err| LoadError::BadBody(err.to_string()))?;
        debug!(%url, bytes = body.len(), "fetched csv");
        Ok(body)
    }

    /// Fetches and decodes a series in one step.
    pub fn fetch_series(
        url: &str,
        time_column: &str,
        value_column: &str,
        timeout: Duration,
    ) -> Result<Series, LoadError> {
        let body = fetch_csv(url, timeout)?;
        decode_series(&body, time_column, value_column)
    }

    fn classify(err: reqwest::Error) -> LoadError {
        if err.is_timeout() {
            LoadError::Timeout
        } else if err.is_builder() {
            LoadError::BadUrl(err.to_string())
        } else {
            LoadError::NetworkError(err.to_string())
        }
    }
}
