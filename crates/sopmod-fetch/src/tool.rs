//! sop releases on GitHub.

use serde::Deserialize;
use sopmod_version::ReleaseIndex;

use crate::client::HttpClient;
use crate::error::Result;

pub const TOOL_RELEASES_URL: &str = "https://api.github.com/repos/halcyonnouveau/soppo/releases";

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name:   String,
    #[serde(default)]
    pub draft:      bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets:     Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name:                 String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size:                 Option<u64>,
}

impl Release {
    /// Version from the tag, without a leading `v`.
    pub fn version(&self) -> &str { self.tag_name.strip_prefix('v').unwrap_or(&self.tag_name) }

    pub fn is_stable(&self) -> bool { !self.draft && !self.prerelease }

    /// First asset whose name starts with `prefix`.
    pub fn find_asset(&self, prefix: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name.starts_with(prefix))
    }
}

pub struct ToolReleases<'a, C: HttpClient + ?Sized> {
    client: &'a C,
    base:   String,
}

impl<'a, C: HttpClient + ?Sized> ToolReleases<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            base: TOOL_RELEASES_URL.to_string(),
        }
    }

    /// Releases as listed by GitHub, newest first.
    pub fn list(&self) -> Result<Vec<Release>> { self.client.get(&self.base)?.error_for_status()?.json() }

    /// The release tagged `v<version>`; `None` when GitHub has no such tag.
    pub fn by_tag(&self, version: &str) -> Result<Option<Release>> {
        let url = format!("{}/tags/v{}", self.base, version);
        let response = self.client.get(&url)?;
        if response.status == 404 {
            return Ok(None);
        }
        response.error_for_status()?.json().map(Some)
    }
}

impl<C: HttpClient + ?Sized> ReleaseIndex for ToolReleases<'_, C> {
    type Error = crate::Error;

    fn stable_versions(&self) -> Result<Vec<String>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(Release::is_stable)
            .map(|r| r.version().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockClient;

    fn release(tag: &str, prerelease: bool) -> serde_json::Value {
        serde_json::json!({
            "tag_name": tag,
            "draft": false,
            "prerelease": prerelease,
            "assets": [
                {"name": "sopls-x86_64-unknown-linux-gnu.tar.gz", "browser_download_url": "https://dl/sopls"},
                {"name": "sop-x86_64-unknown-linux-gnu.tar.gz", "browser_download_url": "https://dl/sop"}
            ]
        })
    }

    #[test]
    fn test_stable_versions_skip_prereleases() {
        let body = serde_json::json!([release("v0.6.0-beta", true), release("v0.5.0", false), release("v0.4.1", false)]);
        let client = MockClient::new().with_json(TOOL_RELEASES_URL, &body);
        let releases = ToolReleases::new(&client);
        assert_eq!(releases.stable_versions().unwrap(), vec!["0.5.0", "0.4.1"]);
    }

    #[test]
    fn test_by_tag_and_asset_prefix() {
        let url = format!("{TOOL_RELEASES_URL}/tags/v0.5.0");
        let client = MockClient::new().with_json(&url, &release("v0.5.0", false));
        let release = ToolReleases::new(&client).by_tag("0.5.0").unwrap().unwrap();

        let sop = release.find_asset("sop-x86_64-unknown-linux-gnu").unwrap();
        assert_eq!(sop.browser_download_url, "https://dl/sop");
        let sopls = release.find_asset("sopls-x86_64-unknown-linux-gnu").unwrap();
        assert_eq!(sopls.browser_download_url, "https://dl/sopls");
        assert!(release.find_asset("sop-aarch64-apple-darwin").is_none());
    }

    #[test]
    fn test_missing_tag_is_none() {
        let client = MockClient::new();
        assert!(ToolReleases::new(&client).by_tag("9.9.9").unwrap().is_none());
    }
}
