//! Bank holiday source wrapped with the shared time-boxed cache.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{CacheSource, TtlCache};
use crate::config::BankHolidaysConfig;
use crate::error::UpstreamUnavailable;

use super::client::{BankHolidaySource, BankHolidaysClient};
use super::types::BankHolidayCalendar;

/// Bank holiday calendar with transparent caching.
///
/// Construct once at startup and clone the handle; clones share one cache
/// entry and one upstream source.
pub struct CachedBankHolidays<S> {
  source: Arc<S>,
  cache: TtlCache<BankHolidayCalendar>,
}

impl CachedBankHolidays<BankHolidaysClient> {
  /// Create a cached client for the configured feed.
  pub fn from_config(config: &BankHolidaysConfig) -> color_eyre::Result<Self> {
    let client = BankHolidaysClient::new(config)?;
    Ok(Self::new(client, config.cache_ttl()?))
  }

  /// Probe the upstream feed, bypassing the cache.
  pub async fn health_check(&self) -> Result<(), UpstreamUnavailable> {
    self.source.health_check().await.map_err(UpstreamUnavailable::from)
  }
}

impl<S: BankHolidaySource> CachedBankHolidays<S> {
  pub fn new(source: S, ttl: chrono::Duration) -> Self {
    Self {
      source: Arc::new(source),
      cache: TtlCache::new().with_stale_time(ttl),
    }
  }

  /// Return the cached calendar, fetching it when missing or expired.
  ///
  /// A failed fetch is a hard failure for this call even if an expired
  /// calendar is still held.
  pub async fn get_bank_holidays(&self) -> Result<Arc<BankHolidayCalendar>, UpstreamUnavailable> {
    let result = self
      .cache
      .get_or_fetch(|| self.source.fetch_bank_holidays())
      .await
      .map_err(|e| {
        warn!(error = %e, "bank holiday calendar unavailable");
        UpstreamUnavailable::from(e)
      })?;

    if result.source == CacheSource::Network {
      debug!(
        cached_at = %result.cached_at,
        ttl_secs = self.cache.stale_time().num_seconds(),
        "bank holiday calendar refreshed"
      );
    }

    Ok(result.data)
  }

  /// Drop the cached calendar so the next call refetches.
  pub async fn invalidate(&self) {
    self.cache.invalidate().await;
  }
}

impl<S> Clone for CachedBankHolidays<S> {
  fn clone(&self) -> Self {
    Self {
      source: Arc::clone(&self.source),
      cache: self.cache.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bank_holidays::{HolidayEvent, Region};
  use crate::error::FetchError;
  use chrono::{Duration, NaiveDate};
  use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

  struct StubSource {
    calls: AtomicU32,
    failing: AtomicBool,
  }

  impl StubSource {
    fn new() -> Self {
      Self {
        calls: AtomicU32::new(0),
        failing: AtomicBool::new(false),
      }
    }
  }

  impl BankHolidaySource for StubSource {
    async fn fetch_bank_holidays(&self) -> Result<BankHolidayCalendar, FetchError> {
      let call = self.calls.fetch_add(1, Ordering::SeqCst);
      if self.failing.load(Ordering::SeqCst) {
        return Err(FetchError::Status {
          url: "http://stub/bank-holidays.json".to_string(),
          status: 500,
        });
      }
      // Each fetch publishes a different holiday so refreshes are observable
      Ok(BankHolidayCalendar {
        england_and_wales: vec![HolidayEvent {
          title: format!("Fetch {}", call),
          date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(call as i64),
          notes: String::new(),
          bunting: false,
        }],
        ..BankHolidayCalendar::default()
      })
    }
  }

  #[tokio::test]
  async fn test_calendar_is_cached_within_ttl() {
    let holidays = CachedBankHolidays::new(StubSource::new(), Duration::hours(1));

    let first = holidays.get_bank_holidays().await.unwrap();
    let second = holidays.clone().get_bank_holidays().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(holidays.source.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_expired_calendar_is_replaced() {
    let holidays = CachedBankHolidays::new(StubSource::new(), Duration::zero());

    let first = holidays.get_bank_holidays().await.unwrap();
    let second = holidays.get_bank_holidays().await.unwrap();

    assert_eq!(first.events(Region::EnglandAndWales)[0].title, "Fetch 0");
    assert_eq!(second.events(Region::EnglandAndWales)[0].title, "Fetch 1");
  }

  #[tokio::test]
  async fn test_failed_refresh_is_not_masked_by_stale_calendar() {
    let holidays = CachedBankHolidays::new(StubSource::new(), Duration::zero());
    holidays.get_bank_holidays().await.unwrap();

    holidays.source.failing.store(true, Ordering::SeqCst);
    let err = holidays.get_bank_holidays().await.unwrap_err();

    assert!(matches!(err.cause(), FetchError::Status { status: 500, .. }));
  }

  #[tokio::test]
  async fn test_invalidate_refetches() {
    let holidays = CachedBankHolidays::new(StubSource::new(), Duration::hours(1));

    holidays.get_bank_holidays().await.unwrap();
    holidays.invalidate().await;
    holidays.get_bank_holidays().await.unwrap();

    assert_eq!(holidays.source.calls.load(Ordering::SeqCst), 2);
  }
}
