//! In-memory time-boxed caching.
//!
//! This module provides a domain-agnostic cache that:
//! - Holds a single shared value behind an `Arc` with a hard time-to-live
//! - Serializes refreshes so only one fetch is in flight at a time
//! - Replaces the value atomically; readers see the old or the new value, never a mix
//! - Never serves an expired value when a refresh fails

mod layer;
mod traits;

pub use layer::TtlCache;
pub use traits::{CacheResult, CacheSource};
