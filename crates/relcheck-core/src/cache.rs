use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, warn};
use relcheck_platform::KeyValueStore;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::CacheError;
use crate::release::ReleaseRecord;

/// Key of the single tracked release stream.
pub const RELEASE_CACHE_KEY: &str = "github_release";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub record: ReleaseRecord,
    pub stored_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let ttl = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        now - self.stored_at < ttl
    }
}

/// Time-bounded release records on top of the host's option store.
///
/// Entries are replaced whole and never touched on read, so expiry is fixed
/// from the fetch that stored them.
#[derive(Clone)]
pub struct ReleaseCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl ReleaseCache {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The cached record, if present, readable, valid, and still fresh.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ReleaseRecord> {
        let value = match self.store.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("Release cache miss for {key}");
                return None;
            }
            Err(error) => {
                warn!("Release cache read failed for {key}: {error}");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(error) => {
                warn!("Ignoring unreadable release cache entry {key}: {error}");
                return None;
            }
        };

        if !entry.is_fresh(self.clock.now()) {
            debug!("Release cache entry {key} expired (stored {})", entry.stored_at);
            return None;
        }
        if !entry.record.is_valid() {
            warn!("Ignoring invalid release cache entry {key}");
            return None;
        }

        debug!("Release cache hit for {key}: {}", entry.record.version);
        Some(entry.record)
    }

    /// Replace the entry under `key`.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidRecord`] for records without a version or
    /// download URL, or the storage error when the write fails.
    pub fn put(&self, key: &str, record: ReleaseRecord, ttl: Duration) -> Result<(), CacheError> {
        if !record.is_valid() {
            return Err(CacheError::InvalidRecord);
        }

        let entry = CacheEntry {
            record,
            stored_at: self.clock.now(),
            ttl_seconds: ttl.as_secs(),
        };
        let value = serde_json::to_value(&entry).map_err(CacheError::Encode)?;
        self.store.set(key, value)?;
        Ok(())
    }

    /// Remove the entry under `key`.
    ///
    /// # Errors
    /// Returns the storage error when the delete fails.
    pub fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)?;
        Ok(())
    }
}
