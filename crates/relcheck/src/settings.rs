use std::path::Path;
use std::time::Duration;

use relcheck_core::UpdaterConfig;
use serde::Deserialize;

/// Environment variable holding a static GitHub token.
pub const TOKEN_ENV_VAR: &str = "RELCHECK_GITHUB_TOKEN";

#[derive(Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Overrides the `releases/latest` endpoint.
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub github_token: Option<String>,

    /// Version to compare against instead of the built-in one.
    #[serde(default)]
    pub current_version: Option<String>,
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_http_timeout() -> u64 {
    15
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
            http_timeout_secs: default_http_timeout(),
            api_url: None,
            github_token: None,
            current_version: None,
        }
    }
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("debug_logging", &self.debug_logging)
            .field("max_log_size_bytes", &self.max_log_size_bytes)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("api_url", &self.api_url)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("current_version", &self.current_version)
            .finish()
    }
}

impl AppSettings {
    /// Read settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load(settings_path: &Path) -> Self {
        if !settings_path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(settings_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn updater_config(&self) -> UpdaterConfig {
        let config = UpdaterConfig::default()
            .with_request_timeout(Duration::from_secs(self.http_timeout_secs));
        match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => config.with_api_url(url),
            _ => config,
        }
    }

    /// Token used when no `github_token` option is stored: the environment
    /// first, then this file.
    pub fn static_token(&self, env_token: Option<String>) -> Option<String> {
        env_token
            .filter(|token| !token.trim().is_empty())
            .or_else(|| {
                self.github_token
                    .clone()
                    .filter(|token| !token.trim().is_empty())
            })
    }
}
