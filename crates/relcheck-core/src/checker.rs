use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::cache::{RELEASE_CACHE_KEY, ReleaseCache};
use crate::error::CacheError;
use crate::fetcher::ReleaseSource;
use crate::info::DisplayInfo;
use crate::release::ReleaseRecord;
use crate::version::is_newer_version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    UpdateAvailable(ReleaseRecord),
}

impl UpdateStatus {
    #[must_use]
    pub fn is_update_available(&self) -> bool {
        matches!(self, Self::UpdateAvailable(_))
    }
}

/// Answers "is there a newer release?" from the cache, falling back to the
/// release source on a miss.
///
/// Safe to call on every host poll: the cache TTL bounds steady-state traffic
/// and the source's rate gate bounds retries after a miss.
pub struct UpdateChecker {
    source: Arc<dyn ReleaseSource>,
    cache: ReleaseCache,
    cache_ttl: Duration,
}

impl UpdateChecker {
    #[must_use]
    pub fn new(source: Arc<dyn ReleaseSource>, cache: ReleaseCache, cache_ttl: Duration) -> Self {
        Self {
            source,
            cache,
            cache_ttl,
        }
    }

    /// Compare the latest known release against `current_version`.
    ///
    /// Failures never surface here: without a valid record the answer is
    /// [`UpdateStatus::UpToDate`].
    pub async fn check_for_update(&self, current_version: &str) -> UpdateStatus {
        let Some(record) = self.latest_release().await else {
            return UpdateStatus::UpToDate;
        };

        debug!(
            "Comparing versions: current={current_version}, remote={}",
            record.version
        );
        if is_newer_version(&record.version, current_version) {
            info!("Update available: {current_version} -> {}", record.version);
            UpdateStatus::UpdateAvailable(record)
        } else {
            debug!("No update needed, {current_version} is current");
            UpdateStatus::UpToDate
        }
    }

    /// Display-ready details of the latest release, priming the cache on a
    /// miss.
    pub async fn describe(&self) -> Option<DisplayInfo> {
        self.latest_release()
            .await
            .map(|record| DisplayInfo::from_record(&record))
    }

    /// Drop the cached release so the next query fetches again (subject to
    /// the rate gate).
    ///
    /// # Errors
    /// Returns the storage error when the entry cannot be removed.
    pub fn clear_cached_release(&self) -> Result<(), CacheError> {
        self.cache.invalidate(RELEASE_CACHE_KEY)
    }

    async fn latest_release(&self) -> Option<ReleaseRecord> {
        if let Some(record) = self.cache.get(RELEASE_CACHE_KEY) {
            return Some(record);
        }

        debug!("No cached release data, fetching");
        let record = match self.source.fetch().await {
            Ok(record) => record,
            Err(error) => {
                warn!("Release fetch failed (kind={}): {error}", error.kind());
                return None;
            }
        };

        if let Err(error) = self
            .cache
            .put(RELEASE_CACHE_KEY, record.clone(), self.cache_ttl)
        {
            match error {
                CacheError::InvalidRecord => {
                    warn!("Discarding invalid release record {}", record.version);
                    return None;
                }
                error => warn!("Failed to cache release {}: {error}", record.version),
            }
        }

        Some(record)
    }
}
