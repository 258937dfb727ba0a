use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use relcheck_platform::KeyValueStore;
use serde_json::json;

use crate::clock::Clock;
use crate::error::FetchError;

/// Option key holding the unix time of the last attempt that reached the
/// network.
pub const LAST_CHECK_OPTION_KEY: &str = "last_github_check";

/// Minimum-interval gate in front of remote release requests.
///
/// Checking and recording are separate calls on shared storage, so two
/// concurrent callers can both pass before either records. That costs at most
/// a few redundant requests per interval and is accepted.
#[derive(Clone)]
pub struct RateGate {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl RateGate {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    /// Whether an attempt may proceed now. Never writes.
    ///
    /// # Errors
    /// Returns [`FetchError::RateLimited`] inside the interval, and also when
    /// the stored state cannot be read.
    pub fn check(&self) -> Result<(), FetchError> {
        let last_check = match self.store.get(LAST_CHECK_OPTION_KEY) {
            Ok(value) => value.and_then(|value| value.as_i64()),
            Err(error) => {
                warn!("Cannot read last release check time, holding back: {error}");
                return Err(FetchError::RateLimited);
            }
        };
        let Some(last_check) = last_check else {
            return Ok(());
        };

        let elapsed = self.clock.now().timestamp() - last_check;
        let interval = i64::try_from(self.interval.as_secs()).unwrap_or(i64::MAX);
        if elapsed < interval {
            debug!("Rate limited: last release check {elapsed}s ago, interval {interval}s");
            return Err(FetchError::RateLimited);
        }
        Ok(())
    }

    /// Record an attempt at the current time.
    pub fn record_attempt(&self) {
        let now = self.clock.now().timestamp();
        if let Err(error) = self.store.set(LAST_CHECK_OPTION_KEY, json!(now)) {
            warn!("Failed to record release check time: {error}");
        }
    }

    pub fn reset(&self) {
        if let Err(error) = self.store.delete(LAST_CHECK_OPTION_KEY) {
            warn!("Failed to reset release check time: {error}");
        }
    }
}
