//! Error types for bank holiday fetching and working-day arithmetic.

use thiserror::Error;

/// Low-level reason a bank holiday fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{url} returned HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("malformed bank holiday payload: {0}")]
  Malformed(String),
}

impl From<serde_json::Error> for FetchError {
  fn from(value: serde_json::Error) -> Self {
    Self::Malformed(value.to_string())
  }
}

/// The bank holiday feed could not be fetched or parsed.
///
/// Never retried locally and never replaced by a stale calendar.
#[derive(Debug, Error)]
#[error("bank holiday calendar unavailable")]
pub struct UpstreamUnavailable(#[from] pub FetchError);

impl UpstreamUnavailable {
  /// The underlying fetch failure.
  pub fn cause(&self) -> &FetchError {
    &self.0
  }
}

#[derive(Debug, Error)]
pub enum WorkingDayError {
  #[error(transparent)]
  UpstreamUnavailable(#[from] UpstreamUnavailable),

  #[error("number of days must be a non-negative count, got {0}")]
  InvalidNumberOfDays(i64),

  #[error("no working day representable after {0}")]
  DateOutOfRange(chrono::NaiveDate),
}

impl WorkingDayError {
  /// HTTP status a request handler should answer with for this error.
  pub fn http_status(&self) -> u16 {
    match self {
      Self::UpstreamUnavailable(_) => 503,
      Self::InvalidNumberOfDays(_) | Self::DateOutOfRange(_) => 400,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::error::Error as _;

  #[test]
  fn test_upstream_unavailable_keeps_cause() {
    let err = UpstreamUnavailable::from(FetchError::Status {
      url: "http://localhost/bank-holidays.json".to_string(),
      status: 502,
    });

    let source = err.source().map(|s| s.to_string());
    assert_eq!(
      source.as_deref(),
      Some("http://localhost/bank-holidays.json returned HTTP 502")
    );
    assert!(matches!(err.cause(), FetchError::Status { status: 502, .. }));
  }

  #[test]
  fn test_http_status_mapping() {
    let upstream: WorkingDayError =
      UpstreamUnavailable::from(FetchError::Malformed("eof".to_string())).into();
    assert_eq!(upstream.http_status(), 503);
    assert_eq!(WorkingDayError::InvalidNumberOfDays(-1).http_status(), 400);
  }

  #[test]
  fn test_serde_error_is_malformed() {
    let err = serde_json::from_str::<u32>("not json").unwrap_err();
    assert!(matches!(FetchError::from(err), FetchError::Malformed(_)));
  }
}
