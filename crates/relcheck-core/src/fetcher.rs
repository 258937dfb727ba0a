use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{StatusCode, header};

use crate::auth::AuthConfig;
use crate::config::UpdaterConfig;
use crate::error::FetchError;
use crate::rate_limit::RateGate;
use crate::release::ReleaseRecord;

/// Where release records come from.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn fetch(&self) -> Result<ReleaseRecord, FetchError>;
}

/// Fetches the latest release from the GitHub releases API.
pub struct GitHubReleaseSource {
    client: reqwest::Client,
    config: UpdaterConfig,
    auth: AuthConfig,
    gate: RateGate,
}

impl GitHubReleaseSource {
    /// Build a source with its own HTTP client.
    ///
    /// # Errors
    /// Returns the client build error (for example when the TLS backend cannot
    /// be initialized).
    pub fn new(
        config: UpdaterConfig,
        auth: AuthConfig,
        gate: RateGate,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, config, auth, gate))
    }

    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        config: UpdaterConfig,
        auth: AuthConfig,
        gate: RateGate,
    ) -> Self {
        Self {
            client,
            config,
            auth,
            gate,
        }
    }

    async fn request(&self) -> Result<String, FetchError> {
        let mut request = self
            .client
            .get(&self.config.api_url)
            .timeout(self.config.request_timeout)
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .header(header::USER_AGENT, &self.config.user_agent);

        if let Some(token) = self.auth.token() {
            debug!("Using authenticated GitHub API request (5000/hour limit)");
            request = request.header(header::AUTHORIZATION, format!("token {token}"));
        } else {
            debug!("Using unauthenticated GitHub API request (60/hour limit)");
        }

        let response = request
            .send()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))?;

        let status = response.status();
        debug!("GitHub API response code: {}", status.as_u16());
        if status != StatusCode::OK {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn fetch(&self) -> Result<ReleaseRecord, FetchError> {
        self.gate.check()?;

        debug!("Requesting latest release from {}", self.config.api_url);
        let result = self.request().await;
        self.gate.record_attempt();

        let body = result.inspect_err(|error| warn!("GitHub API request failed: {error}"))?;
        ReleaseRecord::from_json(&body, &self.config.package_name)
    }
}
