use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use relcheck_core::{
    AuthConfig, Clock, GitHubReleaseSource, RateGate, ReleaseCache, ReleaseSource, UpdateChecker,
    UpdateStatus, UpdaterConfig,
};
use relcheck_platform::KeyValueStore;
use serde_json::json;

use crate::error::HostError;
use crate::meta::PluginMeta;
use crate::types::{
    InfoArgs, PLUGIN_INFORMATION_ACTION, PluginInfo, UpdateDescriptor, UpdateTransient,
};

pub const ACTIVATED_AT_OPTION_KEY: &str = "activated_at";

/// One per host process. Handlers borrow it; nothing here is global.
pub struct PluginUpdater {
    meta: PluginMeta,
    checker: UpdateChecker,
    gate: RateGate,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl PluginUpdater {
    #[must_use]
    pub fn new(
        meta: PluginMeta,
        source: Arc<dyn ReleaseSource>,
        config: &UpdaterConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = ReleaseCache::new(store.clone(), clock.clone());
        let gate = RateGate::new(store.clone(), clock.clone(), config.min_check_interval);
        Self {
            meta,
            checker: UpdateChecker::new(source, cache, config.cache_ttl),
            gate,
            store,
            clock,
        }
    }

    /// Wire the GitHub release source to the host's option store.
    ///
    /// The token is resolved once, here: a stored `github_token` option wins
    /// over `static_token`.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_store(
        meta: PluginMeta,
        config: UpdaterConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        static_token: Option<String>,
    ) -> Result<Self, HostError> {
        let auth = AuthConfig::resolve(store.as_ref(), static_token);
        let gate = RateGate::new(store.clone(), clock.clone(), config.min_check_interval);
        let source = GitHubReleaseSource::new(config.clone(), auth, gate)?;
        Ok(Self::new(meta, Arc::new(source), &config, store, clock))
    }

    #[must_use]
    pub fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    #[must_use]
    pub fn checker(&self) -> &UpdateChecker {
        &self.checker
    }

    /// Update-manager hook: add this plugin's update to `transient` when one
    /// is available.
    pub async fn filter_update_transient(&self, mut transient: UpdateTransient) -> UpdateTransient {
        if transient.checked.is_empty() {
            debug!("Update transient has nothing checked");
            return transient;
        }
        if !transient.checked.contains_key(&self.meta.plugin_file) {
            debug!("Plugin not in checked list: {}", self.meta.plugin_file);
            return transient;
        }

        if let UpdateStatus::UpdateAvailable(record) =
            self.checker.check_for_update(&self.meta.version).await
        {
            let descriptor = UpdateDescriptor {
                slug: self.meta.slug().to_string(),
                plugin: self.meta.plugin_file.clone(),
                new_version: record.version,
                url: self.meta.homepage.clone(),
                package: record.download_url,
                icons: BTreeMap::new(),
                banners: BTreeMap::new(),
                banners_rtl: BTreeMap::new(),
                tested: self.meta.tested.clone(),
                requires_php: self.meta.requires_php.clone(),
            };
            transient
                .response
                .insert(self.meta.plugin_file.clone(), descriptor);
            debug!("Added update for {} to transient", self.meta.plugin_file);
        }

        transient
    }

    /// Info-modal hook. Answers only `plugin_information` requests for this
    /// plugin's slug, and only when release details are obtainable.
    pub async fn plugin_information(&self, action: &str, args: &InfoArgs) -> Option<PluginInfo> {
        if action != PLUGIN_INFORMATION_ACTION || args.slug != self.meta.slug() {
            return None;
        }

        let info = self.checker.describe().await?;
        let sections = BTreeMap::from([
            (
                "description".to_string(),
                format!("<p>{}</p>", htmlescape::encode_minimal(&self.meta.description)),
            ),
            ("changelog".to_string(), info.changelog),
        ]);

        Some(PluginInfo {
            name: self.meta.name.clone(),
            slug: self.meta.slug().to_string(),
            version: info.version,
            author: format!(
                "<a href=\"{}\">{}</a>",
                htmlescape::encode_attribute(&self.meta.author_uri),
                htmlescape::encode_minimal(&self.meta.author_name)
            ),
            homepage: self.meta.homepage.clone(),
            requires: self.meta.requires.clone(),
            tested: self.meta.tested.clone(),
            requires_php: self.meta.requires_php.clone(),
            last_updated: info.published_at,
            download_link: info.download_url,
            sections,
        })
    }

    /// # Errors
    /// Returns an error when the activation time cannot be stored.
    pub fn activate(&self) -> Result<(), HostError> {
        self.store.set(
            ACTIVATED_AT_OPTION_KEY,
            json!(self.clock.now().to_rfc3339()),
        )?;
        Ok(())
    }

    /// Forget the cached release and the last check time.
    ///
    /// # Errors
    /// Returns an error when the cached release cannot be removed.
    pub fn deactivate(&self) -> Result<(), HostError> {
        self.checker.clear_cached_release()?;
        self.gate.reset();
        Ok(())
    }

    /// # Errors
    /// Returns an error when stored state cannot be removed.
    pub fn uninstall(&self) -> Result<(), HostError> {
        self.deactivate()?;
        self.store.delete(ACTIVATED_AT_OPTION_KEY)?;
        Ok(())
    }
}
