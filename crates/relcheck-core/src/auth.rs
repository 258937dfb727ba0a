use log::{debug, warn};
use relcheck_platform::KeyValueStore;

/// Option key holding a token saved through the host's settings.
pub const TOKEN_OPTION_KEY: &str = "github_token";

/// Optional token for release API requests.
///
/// Authenticated requests get a 5000/hour remote quota instead of 60/hour.
/// A missing token is never an error.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: non_empty(token.into()),
        }
    }

    /// Resolve the token: the persisted option first, then the static value.
    #[must_use]
    pub fn resolve(store: &dyn KeyValueStore, static_token: Option<String>) -> Self {
        let stored = match store.get(TOKEN_OPTION_KEY) {
            Ok(value) => value
                .and_then(|value| value.as_str().map(str::to_string))
                .and_then(non_empty),
            Err(error) => {
                warn!("Failed to read stored GitHub token: {error}");
                None
            }
        };

        if let Some(token) = stored {
            debug!("Using GitHub token from stored option");
            return Self { token: Some(token) };
        }

        let token = static_token.and_then(non_empty);
        if token.is_some() {
            debug!("Using GitHub token from static configuration");
        }
        Self { token }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

fn non_empty(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
