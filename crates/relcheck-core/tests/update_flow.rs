use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use relcheck_core::{
    AuthConfig, GitHubReleaseSource, ManualClock, RateGate, ReleaseCache, UpdateChecker,
    UpdateStatus, UpdaterConfig,
};
use relcheck_platform::FileStore;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RELEASE_PATH: &str = "/repos/devora-as/rank-math-api-manager/releases/latest";

struct Harness {
    _dir: TempDir,
    store: Arc<FileStore>,
    clock: Arc<ManualClock>,
    config: UpdaterConfig,
}

impl Harness {
    fn new(server: &MockServer) -> Self {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = Arc::new(FileStore::new(dir.path().join("state.json")));
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 7, 2, 9, 0, 0)
                .single()
                .expect("test time should be unambiguous"),
        ));
        let config = UpdaterConfig::default()
            .with_api_url(format!("{}{RELEASE_PATH}", server.uri()))
            .with_request_timeout(Duration::from_secs(2));
        Self {
            _dir: dir,
            store,
            clock,
            config,
        }
    }

    /// A fresh checker over the same on-disk state, as a new process would build it.
    fn checker(&self) -> UpdateChecker {
        let gate = RateGate::new(
            self.store.clone(),
            self.clock.clone(),
            self.config.min_check_interval,
        );
        let source = GitHubReleaseSource::new(self.config.clone(), AuthConfig::anonymous(), gate)
            .expect("client should build");
        let cache = ReleaseCache::new(self.store.clone(), self.clock.clone());
        UpdateChecker::new(Arc::new(source), cache, self.config.cache_ttl)
    }
}

fn release_body(tag: &str) -> serde_json::Value {
    json!({
        "tag_name": tag,
        "html_url": format!(
            "https://github.com/devora-as/rank-math-api-manager/releases/tag/{tag}"
        ),
        "published_at": "2025-07-01T08:30:00Z",
        "body": "Bug fixes",
        "assets": [
            {
                "name": "rank-math-api-manager.zip",
                "browser_download_url": format!(
                    "https://github.com/devora-as/rank-math-api-manager/releases/download/{tag}/rank-math-api-manager.zip"
                )
            }
        ]
    })
}

#[tokio::test]
async fn cached_release_survives_across_checkers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RELEASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_body("v1.1.0")))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server);

    let status = harness.checker().check_for_update("1.0.8").await;
    let UpdateStatus::UpdateAvailable(record) = status else {
        panic!("expected an update, got {status:?}");
    };
    assert_eq!(record.version, "1.1.0");

    harness.clock.advance(chrono::Duration::seconds(1800));
    let info = harness
        .checker()
        .describe()
        .await
        .expect("cached release should be described");
    assert_eq!(info.version, "1.1.0");
    assert_eq!(
        harness.checker().check_for_update("1.1.0").await,
        UpdateStatus::UpToDate
    );
}

#[tokio::test]
async fn expired_cache_refetches_after_gate_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RELEASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_body("v1.2.0")))
        .expect(2)
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    let checker = harness.checker();

    assert!(checker.check_for_update("1.0.8").await.is_update_available());

    harness.clock.advance(chrono::Duration::seconds(3600));
    assert!(checker.check_for_update("1.0.8").await.is_update_available());
}

#[tokio::test]
async fn failed_fetch_is_gated_until_interval_passes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RELEASE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let harness = Harness::new(&server);
    let checker = harness.checker();

    assert_eq!(checker.check_for_update("1.0.8").await, UpdateStatus::UpToDate);

    harness.clock.advance(chrono::Duration::seconds(120));
    assert_eq!(checker.check_for_update("1.0.8").await, UpdateStatus::UpToDate);
    assert!(checker.describe().await.is_none());

    harness.clock.advance(chrono::Duration::seconds(180));
    assert_eq!(checker.check_for_update("1.0.8").await, UpdateStatus::UpToDate);
}
