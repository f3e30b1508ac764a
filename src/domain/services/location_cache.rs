//! Location Cache
//!
//! Persists the last resolved country under a single key with a TTL.
//! Every storage or decoding fault is logged and treated as a miss; the
//! cache never fails the resolution pipeline.

use crate::domain::entities::CachedLocation;
use crate::domain::ports::{Clock, KeyValueStore};
use crate::domain::value_objects::CountryCode;
use std::sync::Arc;

/// Default storage key for the cached record.
pub const DEFAULT_CACHE_KEY: &str = "visitor_country_data";

/// Single-record, TTL-bound cache over a [`KeyValueStore`].
pub struct LocationCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    key: String,
    ttl_ms: i64,
}

impl LocationCache {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        key: impl Into<String>,
        ttl_ms: i64,
    ) -> Self {
        Self {
            store,
            clock,
            key: key.into(),
            ttl_ms,
        }
    }

    /// Caching is disabled for a non-positive TTL.
    pub fn is_enabled(&self) -> bool {
        self.ttl_ms > 0
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Return the cached record if present and still valid.
    ///
    /// A record that is present but no longer valid is deleted.
    pub async fn read(&self) -> Option<CachedLocation> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("failed to read location cache: {}", e);
                return None;
            }
        };

        let record: CachedLocation = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("discarding unreadable location cache entry: {}", e);
                return None;
            }
        };

        let now = self.clock.now_ms();
        if record.is_valid(now, self.ttl_ms) {
            tracing::debug!(country = %record.country_code, "using cached country code");
            return Some(record);
        }

        match self.store.remove(&self.key).await {
            Ok(()) => tracing::debug!(
                country = %record.country_code,
                age_ms = now.saturating_sub(record.resolved_at),
                "purged expired location cache entry"
            ),
            Err(e) => tracing::warn!("failed to purge expired location cache entry: {}", e),
        }
        None
    }

    /// Replace the cached record with `country` stamped at the current time.
    ///
    /// No-op when caching is disabled.
    pub async fn write(&self, country: &CountryCode) {
        if !self.is_enabled() {
            tracing::debug!("location cache disabled, skipping write");
            return;
        }

        let record = CachedLocation::new(country.clone(), self.clock.now_ms());
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("failed to encode location cache entry: {}", e);
                return;
            }
        };

        match self.store.set(&self.key, &raw).await {
            Ok(()) => tracing::debug!(country = %country, "country code cached"),
            Err(e) => tracing::warn!("failed to write location cache: {}", e),
        }
    }
}
