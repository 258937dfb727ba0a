//! Release update checks for relcheck.
//!
//! This crate owns everything between the host asking "is there a newer
//! version?" and the remote release API:
//! - Fetching and normalizing the latest GitHub release, behind a minimum
//!   interval gate.
//! - A time-bounded cache of the last good release record.
//! - Dotted-numeric version comparison.
//! - The update decision and the display-ready release details built on top
//!   of the cache.

mod auth;
mod cache;
mod checker;
mod clock;
mod config;
mod error;
mod fetcher;
mod info;
mod rate_limit;
mod release;
mod version;

/// Token resolution for authenticated release requests.
pub use auth::{AuthConfig, TOKEN_OPTION_KEY};
/// Time-bounded store of the last fetched release.
pub use cache::{CacheEntry, RELEASE_CACHE_KEY, ReleaseCache};
/// Update decision engine and its result type.
pub use checker::{UpdateChecker, UpdateStatus};
/// Injectable time source.
pub use clock::{Clock, ManualClock, SystemClock};
/// Fetch parameters and their defaults.
pub use config::UpdaterConfig;
/// Tagged failures of fetch and cache operations.
pub use error::{CacheError, FetchError};
/// Release source seam and the GitHub implementation.
pub use fetcher::{GitHubReleaseSource, ReleaseSource};
/// Display-ready release details.
pub use info::{DisplayInfo, sanitize_changelog};
/// Minimum-interval guard in front of remote fetches.
pub use rate_limit::{LAST_CHECK_OPTION_KEY, RateGate};
/// Normalized release metadata and the GitHub payload it is built from.
pub use release::{GitHubAsset, GitHubRelease, ReleaseRecord};
/// Version ordering helpers.
pub use version::{compare_versions, is_newer_version};
