use relcheck_platform::StoreError;
use thiserror::Error;

/// Why a release could not be fetched.
///
/// None of these are fatal: callers degrade to "no update information".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("rate limited: a release check ran less than the minimum interval ago")]
    RateLimited,
    #[error("release request failed: {0}")]
    Network(String),
    #[error("release API returned HTTP {0}")]
    BadStatus(u16),
    #[error("invalid release payload: {0}")]
    InvalidPayload(String),
    #[error("no download URL found in release")]
    NoDownloadUrl,
}

impl FetchError {
    /// Stable short name used in log records.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Network(_) => "network",
            Self::BadStatus(_) => "bad_status",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::NoDownloadUrl => "no_download_url",
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("refusing to cache release without a version or download URL")]
    InvalidRecord,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode cache entry: {0}")]
    Encode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::FetchError;

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            FetchError::RateLimited.kind(),
            FetchError::Network("timeout".to_string()).kind(),
            FetchError::BadStatus(403).kind(),
            FetchError::InvalidPayload("no tag_name".to_string()).kind(),
            FetchError::NoDownloadUrl.kind(),
        ];
        let mut unique = kinds.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), kinds.len());
    }

    #[test]
    fn display_includes_context() {
        assert_eq!(
            FetchError::BadStatus(404).to_string(),
            "release API returned HTTP 404"
        );
        assert_eq!(
            FetchError::Network("connection refused".to_string()).to_string(),
            "release request failed: connection refused"
        );
    }
}
