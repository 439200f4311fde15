//! Global configuration and project manifests.
//!
//! Both records are plain key/value TOML with every field optional. They are
//! merged field by field: a manifest that pins only `runtime` still lets the
//! tool version come from further up the directory chain or from the global
//! default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sopmod_fs::{AtomicWriteOptions, atomic_write};

use crate::error::{Error, Result};
use crate::toolchain::Toolchain;

/// File name searched for in the working directory and its ancestors.
pub const MANIFEST_FILE: &str = "sop.mod";

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&content).map(Some).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `<root>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "default_sop")]
    pub default_tool:    Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "default_go")]
    pub default_runtime: Option<String>,
}

impl GlobalConfig {
    /// Load the config, treating a missing file as the empty config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = read_toml(path)?.unwrap_or_default();
        tracing::debug!(path = %path.display(), ?config, "loaded global config");
        Ok(config)
    }

    /// Replace the file atomically.
    ///
    /// There is no locking: two processes doing load/modify/save at the same
    /// time keep whichever save lands last.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        atomic_write(path, content.as_bytes(), AtomicWriteOptions::new().sync(true))?;
        tracing::debug!(path = %path.display(), "saved global config");
        Ok(())
    }

    pub fn default_for(&self, toolchain: Toolchain) -> Option<&str> {
        match toolchain {
            Toolchain::Tool => self.default_tool.as_deref(),
            Toolchain::Runtime => self.default_runtime.as_deref(),
        }
    }

    pub fn set_default(&mut self, toolchain: Toolchain, version: Option<String>) {
        match toolchain {
            Toolchain::Tool => self.default_tool = version,
            Toolchain::Runtime => self.default_runtime = version,
        }
    }
}

/// A project's `sop.mod`. Keys other than the two pins are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectManifest {
    #[serde(default, alias = "sop")]
    pub tool:    Option<String>,
    #[serde(default, alias = "go")]
    pub runtime: Option<String>,
}

impl ProjectManifest {
    /// Load `sop.mod` from `dir`, `None` if there is none.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Option<Self>> { read_toml(&dir.as_ref().join(MANIFEST_FILE)) }

    pub fn pin(&self, toolchain: Toolchain) -> Option<&str> {
        match toolchain {
            Toolchain::Tool => self.tool.as_deref(),
            Toolchain::Runtime => self.runtime.as_deref(),
        }
    }
}

/// A version pin and the manifest it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPin {
    pub version:  String,
    pub manifest: PathBuf,
}

/// Walk from `start` towards the filesystem root and return the nearest
/// manifest pinning `toolchain`.
///
/// Manifests that exist but do not pin this toolchain are passed over. A
/// manifest that fails to parse is an error rather than being skipped.
pub fn find_pin(start: impl AsRef<Path>, toolchain: Toolchain) -> Result<Option<ManifestPin>> {
    for dir in start.as_ref().ancestors() {
        let Some(manifest) = ProjectManifest::load_from_dir(dir)? else {
            continue;
        };
        if let Some(version) = manifest.pin(toolchain) {
            let path = dir.join(MANIFEST_FILE);
            tracing::debug!(manifest = %path.display(), %toolchain, version, "found manifest pin");
            return Ok(Some(ManifestPin {
                version:  version.to_string(),
                manifest: path,
            }));
        }
    }
    Ok(None)
}
