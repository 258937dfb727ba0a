use relcheck_host::HostError;
use relcheck_platform::{AppPathsError, StoreError};
use thiserror::Error;

/// Local failures. Remote failures never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Paths(#[from] AppPathsError),
    #[error("Failed to create application directories: {0}")]
    CreateDirs(#[source] std::io::Error),
    #[error("Failed to update stored state: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
    #[error("Token must not be empty")]
    EmptyToken,
}

#[cfg(test)]
mod tests {
    use relcheck_platform::AppPathsError;

    use super::AppError;

    #[test]
    fn paths_error_is_shown_as_is() {
        let error = AppError::from(AppPathsError::DataDirUnavailable);
        assert_eq!(error.to_string(), "Could not determine data directory");
    }

    #[test]
    fn create_dirs_error_includes_io_detail() {
        let error = AppError::CreateDirs(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(
            error.to_string(),
            "Failed to create application directories: denied"
        );
    }
}
