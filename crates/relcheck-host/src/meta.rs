/// Static description of the plugin as the host knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMeta {
    pub name: String,
    /// Host identifier of the plugin, `directory/main-file.php`.
    pub plugin_file: String,
    /// Version of the running plugin.
    pub version: String,
    pub homepage: String,
    pub author_name: String,
    pub author_uri: String,
    pub description: String,
    /// Minimum host version.
    pub requires: String,
    /// Host version the release was tested against.
    pub tested: String,
    pub requires_php: String,
}

impl Default for PluginMeta {
    fn default() -> Self {
        Self {
            name: "Rank Math API Manager".to_string(),
            plugin_file: "rank-math-api-manager/rank-math-api-manager.php".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            homepage: "https://devora.no/plugins/rankmath-api-manager".to_string(),
            author_name: "Devora AS".to_string(),
            author_uri: "https://devora.no".to_string(),
            description: "Manages the update of Rank Math metadata (SEO Title, SEO Description, \
                          Canonical URL, Focus Keyword) via the REST API."
                .to_string(),
            requires: "5.0".to_string(),
            tested: "6.4".to_string(),
            requires_php: "7.4".to_string(),
        }
    }
}

impl PluginMeta {
    /// Directory part of the plugin identifier.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.plugin_file
            .split_once('/')
            .map_or(self.plugin_file.as_str(), |(dir, _)| dir)
    }
}
