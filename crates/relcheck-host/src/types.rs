use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Action name the host uses when it asks for plugin details.
pub const PLUGIN_INFORMATION_ACTION: &str = "plugin_information";

/// The host's record of installed plugins and the updates found for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTransient {
    /// Plugin identifier to installed version, for every plugin being checked.
    #[serde(default)]
    pub checked: BTreeMap<String, String>,
    #[serde(default)]
    pub response: BTreeMap<String, UpdateDescriptor>,
}

/// An available update, in the shape the host's update manager expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDescriptor {
    pub slug: String,
    pub plugin: String,
    pub new_version: String,
    pub url: String,
    pub package: String,
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
    #[serde(default)]
    pub banners: BTreeMap<String, String>,
    #[serde(default)]
    pub banners_rtl: BTreeMap<String, String>,
    pub tested: String,
    pub requires_php: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InfoArgs {
    #[serde(default)]
    pub slug: String,
}

/// Contents of the "view details" modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub slug: String,
    pub version: String,
    /// HTML link to the author.
    pub author: String,
    pub homepage: String,
    pub requires: String,
    pub tested: String,
    pub requires_php: String,
    pub last_updated: String,
    pub download_link: String,
    /// `description` and `changelog`, both HTML.
    pub sections: BTreeMap<String, String>,
}
