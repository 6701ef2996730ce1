//! Cache layer that orchestrates cache-or-fetch with a hard time-to-live.

use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

use super::traits::CacheResult;

/// A cached value together with the moment it was stored.
struct CachedValue<T> {
  value: Arc<T>,
  /// Wall-clock time, reported to callers
  cached_at: DateTime<Utc>,
  /// Monotonic time, used for expiry
  fetched_at: Instant,
}

impl<T> Clone for CachedValue<T> {
  fn clone(&self) -> Self {
    Self {
      value: Arc::clone(&self.value),
      cached_at: self.cached_at,
      fetched_at: self.fetched_at,
    }
  }
}

/// Single-value cache with a hard time-to-live.
///
/// Clones share the same entry, so one cache constructed at startup can be
/// handed to every caller.
pub struct TtlCache<T> {
  entry: Arc<RwLock<Option<CachedValue<T>>>>,
  /// Held while a refresh is in flight
  refresh_lock: Arc<Mutex<()>>,
  /// How long before cached data is considered stale
  stale_time: Duration,
}

impl<T> TtlCache<T> {
  /// Create an empty cache with a one day time-to-live.
  pub fn new() -> Self {
    Self {
      entry: Arc::new(RwLock::new(None)),
      refresh_lock: Arc::new(Mutex::new(())),
      stale_time: Duration::days(1),
    }
  }

  /// Set the stale time for cached data.
  pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
    self.stale_time = stale_time;
    self
  }

  pub fn stale_time(&self) -> Duration {
    self.stale_time
  }

  /// Check if cached data is stale based on the monotonic fetch time.
  ///
  /// Wall-clock adjustments cannot extend an entry's life. A negative stale
  /// time counts as zero.
  fn is_stale(&self, fetched_at: Instant) -> bool {
    match self.stale_time.to_std() {
      Ok(ttl) => fetched_at.elapsed() >= ttl,
      Err(_) => true,
    }
  }

  async fn fresh_entry(&self) -> Option<CachedValue<T>> {
    let entry = self.entry.read().await;
    entry
      .as_ref()
      .filter(|cached| !self.is_stale(cached.fetched_at))
      .cloned()
  }

  /// Return the cached value if fresh, otherwise fetch and store a new one.
  ///
  /// 1. Check cache - if fresh, return immediately
  /// 2. Take the refresh lock and check again, another caller may have refreshed
  /// 3. Fetch; on success swap the new value in, on failure keep the old entry
  ///    untouched and return the error
  pub async fn get_or_fetch<F, Fut, E>(&self, fetcher: F) -> Result<CacheResult<Arc<T>>, E>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
  {
    if let Some(cached) = self.fresh_entry().await {
      debug!(cached_at = %cached.cached_at, "cache hit");
      return Ok(CacheResult::from_cache(cached.value, cached.cached_at));
    }

    let _refresh = self.refresh_lock.lock().await;

    if let Some(cached) = self.fresh_entry().await {
      debug!(cached_at = %cached.cached_at, "cache refreshed by concurrent caller");
      return Ok(CacheResult::from_cache(cached.value, cached.cached_at));
    }

    let value = Arc::new(fetcher().await?);
    let cached_at = Utc::now();

    *self.entry.write().await = Some(CachedValue {
      value: Arc::clone(&value),
      cached_at,
      fetched_at: Instant::now(),
    });

    Ok(CacheResult::from_network(value, cached_at))
  }

  /// When the current entry was stored, fresh or not.
  pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
    self.entry.read().await.as_ref().map(|cached| cached.cached_at)
  }

  /// Drop the current entry so the next call fetches.
  pub async fn invalidate(&self) {
    *self.entry.write().await = None;
  }
}

impl<T> Default for TtlCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for TtlCache<T> {
  fn clone(&self) -> Self {
    Self {
      entry: Arc::clone(&self.entry),
      refresh_lock: Arc::clone(&self.refresh_lock),
      stale_time: self.stale_time,
    }
  }
}
