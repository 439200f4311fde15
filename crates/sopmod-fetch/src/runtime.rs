//! The Go release index at go.dev.

use once_cell::unsync::OnceCell;
use serde::Deserialize;
use sopmod_platform::Platform;
use sopmod_version::ReleaseIndex;

use crate::client::HttpClient;
use crate::error::Result;

/// Every published release, newest first, including unstable ones.
pub const RUNTIME_INDEX_URL: &str = "https://go.dev/dl/?mode=json&include=all";

pub const RUNTIME_DOWNLOAD_BASE: &str = "https://go.dev/dl/";

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeRelease {
    /// As published, e.g. `go1.22.5`.
    pub version: String,
    pub stable:  bool,
    #[serde(default)]
    pub files:   Vec<RuntimeFile>,
}

impl RuntimeRelease {
    /// Version without the `go` prefix.
    pub fn version(&self) -> &str { self.version.strip_prefix("go").unwrap_or(&self.version) }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeFile {
    pub filename: String,
    #[serde(default)]
    pub os:       String,
    #[serde(default)]
    pub arch:     String,
    #[serde(default)]
    pub sha256:   String,
    #[serde(default)]
    pub kind:     String,
}

/// File name of the runtime archive for `version` on `platform`.
pub fn archive_name(version: &str, platform: &Platform) -> String {
    format!("go{version}.{platform}.{}", platform.archive_ext())
}

/// Runtime releases from go.dev, fetched at most once per instance.
pub struct RuntimeIndex<'a, C: HttpClient + ?Sized> {
    client:   &'a C,
    url:      String,
    base:     String,
    releases: OnceCell<Vec<RuntimeRelease>>,
}

impl<'a, C: HttpClient + ?Sized> RuntimeIndex<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            url: RUNTIME_INDEX_URL.to_string(),
            base: RUNTIME_DOWNLOAD_BASE.to_string(),
            releases: OnceCell::new(),
        }
    }

    pub fn releases(&self) -> Result<&[RuntimeRelease]> {
        let releases = self.releases.get_or_try_init(|| {
            let releases: Vec<RuntimeRelease> = self.client.get(&self.url)?.error_for_status()?.json()?;
            tracing::debug!(count = releases.len(), "fetched runtime index");
            Ok::<_, crate::Error>(releases)
        })?;
        Ok(releases)
    }

    pub fn download_url(&self, version: &str, platform: &Platform) -> String {
        format!("{}{}", self.base, archive_name(version, platform))
    }

    /// Published SHA-256 of `filename`, if the index lists one.
    pub fn checksum(&self, filename: &str) -> Result<Option<String>> {
        let found = self
            .releases()?
            .iter()
            .flat_map(|r| r.files.iter())
            .find(|f| f.filename == filename && !f.sha256.is_empty())
            .map(|f| f.sha256.to_ascii_lowercase());
        Ok(found)
    }
}

impl<C: HttpClient + ?Sized> ReleaseIndex for RuntimeIndex<'_, C> {
    type Error = crate::Error;

    fn stable_versions(&self) -> Result<Vec<String>> {
        Ok(self
            .releases()?
            .iter()
            .filter(|r| r.stable)
            .map(|r| r.version().to_string())
            .collect())
    }
}
