use std::time::Duration;

const DEFAULT_API_URL: &str =
    "https://api.github.com/repos/devora-as/rank-math-api-manager/releases/latest";
const DEFAULT_PACKAGE_NAME: &str = "rank-math-api-manager.zip";

/// Parameters of the release check.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// `releases/latest` endpoint of the tracked repository.
    pub api_url: String,
    /// Release asset preferred over the source archive.
    pub package_name: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Minimum time between two attempts that reach the network.
    pub min_check_interval: Duration,
    pub cache_ttl: Duration,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            user_agent: format!("relcheck/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(15),
            min_check_interval: Duration::from_secs(300),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl UpdaterConfig {
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::UpdaterConfig;

    #[test]
    fn defaults_match_release_check_policy() {
        let config = UpdaterConfig::default();

        assert!(config.api_url.ends_with("/releases/latest"));
        assert_eq!(config.package_name, "rank-math-api-manager.zip");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.min_check_interval, Duration::from_secs(300));
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn builders_override_fields() {
        let config = UpdaterConfig::default()
            .with_api_url("http://127.0.0.1:9/releases/latest")
            .with_user_agent("host/6.4")
            .with_request_timeout(Duration::from_secs(2));

        assert_eq!(config.api_url, "http://127.0.0.1:9/releases/latest");
        assert_eq!(config.user_agent, "host/6.4");
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }
}
