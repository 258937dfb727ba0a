use relcheck_core::CacheError;
use relcheck_platform::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to update plugin state: {0}")]
    Store(#[from] StoreError),
    #[error("failed to clear release cache: {0}")]
    Cache(#[from] CacheError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
