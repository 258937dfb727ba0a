use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One discovered remote release, normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub version: String,
    pub source_url: String,
    pub download_url: String,
    pub published_at: String,
    /// Raw release notes. Untrusted; sanitize before display.
    pub description: String,
}

impl ReleaseRecord {
    /// A record is only usable with a version and somewhere to download it from.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.version.trim().is_empty() && !self.download_url.trim().is_empty()
    }

    /// Normalize a GitHub release payload.
    ///
    /// # Errors
    /// Returns [`FetchError::InvalidPayload`] when the tag is missing or empty
    /// and [`FetchError::NoDownloadUrl`] when neither the package asset nor a
    /// source archive is available.
    pub fn from_github(release: GitHubRelease, package_name: &str) -> Result<Self, FetchError> {
        let tag = release
            .tag_name
            .ok_or_else(|| FetchError::InvalidPayload("missing tag_name".to_string()))?;
        let version = normalize_tag(&tag);
        if version.trim().is_empty() {
            return Err(FetchError::InvalidPayload(format!(
                "tag {tag:?} has no version"
            )));
        }
        debug!("Found release version {version} with {} assets", release.assets.len());

        let download_url = resolve_download_url(&release.assets, release.zipball_url, package_name)
            .ok_or(FetchError::NoDownloadUrl)?;

        Ok(Self {
            version: version.to_string(),
            source_url: release.html_url.unwrap_or_default(),
            download_url,
            published_at: release.published_at.unwrap_or_default(),
            description: release.body.unwrap_or_default(),
        })
    }

    /// Parse and normalize a raw `releases/latest` response body.
    ///
    /// # Errors
    /// Returns [`FetchError::InvalidPayload`] for bodies that are not a release
    /// object, plus anything [`ReleaseRecord::from_github`] rejects.
    pub fn from_json(body: &str, package_name: &str) -> Result<Self, FetchError> {
        let release: GitHubRelease = serde_json::from_str(body)
            .map_err(|error| FetchError::InvalidPayload(error.to_string()))?;
        Self::from_github(release, package_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubAsset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub browser_download_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubRelease {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
    #[serde(default)]
    pub zipball_url: Option<String>,
}

fn normalize_tag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix('v').unwrap_or(tag)
}

fn resolve_download_url(
    assets: &[GitHubAsset],
    zipball_url: Option<String>,
    package_name: &str,
) -> Option<String> {
    if let Some(asset) = assets
        .iter()
        .find(|a| a.name == package_name && !a.browser_download_url.is_empty())
    {
        debug!("Using package asset {}", asset.browser_download_url);
        return Some(asset.browser_download_url.clone());
    }

    let zipball_url = zipball_url.filter(|url| !url.is_empty())?;
    debug!("No {package_name} asset, using source archive {zipball_url}");
    Some(zipball_url)
}

#[cfg(test)]
mod tests {
    use super::{GitHubAsset, GitHubRelease, ReleaseRecord};
    use crate::error::FetchError;

    const PACKAGE: &str = "rank-math-api-manager.zip";

    fn asset(name: &str, url: &str) -> GitHubAsset {
        GitHubAsset {
            name: name.to_string(),
            browser_download_url: url.to_string(),
        }
    }

    fn release(tag: &str) -> GitHubRelease {
        GitHubRelease {
            tag_name: Some(tag.to_string()),
            html_url: Some(
                "https://github.com/devora-as/rank-math-api-manager/releases/tag/v1.2.3".to_string(),
            ),
            published_at: Some("2025-06-01T10:00:00Z".to_string()),
            body: Some("Fixes".to_string()),
            assets: Vec::new(),
            zipball_url: Some("https://api.github.com/zipball/v1.2.3".to_string()),
        }
    }

    #[test]
    fn tag_prefix_is_stripped_once() {
        let prefixed = ReleaseRecord::from_github(release("v1.2.3"), PACKAGE)
            .expect("release should normalize");
        let bare = ReleaseRecord::from_github(release("1.2.3"), PACKAGE)
            .expect("release should normalize");

        assert_eq!(prefixed.version, "1.2.3");
        assert_eq!(bare.version, "1.2.3");
        assert_eq!(
            ReleaseRecord::from_github(release("vv2.0.0"), PACKAGE)
                .expect("release should normalize")
                .version,
            "v2.0.0"
        );
    }

    #[test]
    fn package_asset_wins_over_archive() {
        let mut release = release("v1.2.3");
        release.assets = vec![
            asset("checksums.txt", "https://example.com/checksums.txt"),
            asset(PACKAGE, "https://example.com/rank-math-api-manager.zip"),
            asset("source.tar.gz", "https://example.com/source.tar.gz"),
        ];

        let record = ReleaseRecord::from_github(release, PACKAGE)
            .expect("release should normalize");
        assert_eq!(
            record.download_url,
            "https://example.com/rank-math-api-manager.zip"
        );
    }

    #[test]
    fn archive_is_used_without_matching_asset() {
        let mut release = release("v1.2.3");
        release.assets = vec![asset(
            "rank-math-api-manager-1.2.3.zip",
            "https://example.com/other.zip",
        )];

        let record = ReleaseRecord::from_github(release, PACKAGE)
            .expect("release should normalize");
        assert_eq!(record.download_url, "https://api.github.com/zipball/v1.2.3");
    }

    #[test]
    fn missing_asset_and_archive_is_no_download_url() {
        let mut release = release("v1.2.3");
        release.zipball_url = None;

        assert_eq!(
            ReleaseRecord::from_github(release, PACKAGE),
            Err(FetchError::NoDownloadUrl)
        );
    }

    #[test]
    fn missing_or_empty_tag_is_invalid_payload() {
        let mut untagged = release("v1.0.0");
        untagged.tag_name = None;
        assert!(matches!(
            ReleaseRecord::from_github(untagged, PACKAGE),
            Err(FetchError::InvalidPayload(_))
        ));
        assert!(matches!(
            ReleaseRecord::from_github(release("v"), PACKAGE),
            Err(FetchError::InvalidPayload(_))
        ));
    }

    #[test]
    fn from_json_fills_optional_fields() {
        let body = r#"{
            "tag_name": "v1.1.0",
            "html_url": "https://github.com/devora-as/rank-math-api-manager/releases/tag/v1.1.0",
            "published_at": "2025-07-01T08:30:00Z",
            "zipball_url": "https://api.github.com/zipball/v1.1.0"
        }"#;

        let record = ReleaseRecord::from_json(body, PACKAGE)
            .expect("release should normalize");
        assert_eq!(record.version, "1.1.0");
        assert_eq!(record.description, "");
        assert_eq!(record.published_at, "2025-07-01T08:30:00Z");
        assert!(record.is_valid());
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(matches!(
            ReleaseRecord::from_json("not json", PACKAGE),
            Err(FetchError::InvalidPayload(_))
        ));
        assert!(matches!(
            ReleaseRecord::from_json("[]", PACKAGE),
            Err(FetchError::InvalidPayload(_))
        ));
    }

    #[test]
    fn validity_requires_version_and_download_url() {
        let record = ReleaseRecord::from_github(release("v1.2.3"), PACKAGE)
            .expect("release should normalize");
        assert!(record.is_valid());

        let mut no_url = record.clone();
        no_url.download_url = String::new();
        assert!(!no_url.is_valid());

        let mut no_version = record;
        no_version.version = " ".to_string();
        assert!(!no_version.is_valid());
    }
}
