//! Filesystem layout below the installation root.
//!
//! ```text
//! <root>/runtime/<version>/go/bin/go[.exe]
//! <root>/tool/<version>/sop[.exe]
//! <root>/tool/<version>/sopls[.exe]
//! <root>/bin/sop[.exe]
//! <root>/bin/sopls[.exe]
//! <root>/config.toml
//! ```
//!
//! Every path function is pure. Only [`Layout::ensure_dirs`] and
//! [`Layout::list_installed`] touch the disk.

use std::env;
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::toolchain::{Shim, Toolchain};

/// Overrides the installation root.
pub const ROOT_ENV: &str = "SOPMOD_ROOT";

const ROOT_DIR_NAME: &str = ".sopmod";
const CONFIG_FILE: &str = "config.toml";
const BIN_DIR: &str = "bin";

fn exe(name: &str) -> String { format!("{name}{EXE_SUFFIX}") }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    /// `$SOPMOD_ROOT` when set and non-empty, otherwise `~/.sopmod`.
    pub fn from_env() -> Result<Self> {
        if let Some(root) = env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(root));
        }
        let home = sopmod_platform::dir::require_home()?;
        Ok(Self::new(home.join(ROOT_DIR_NAME)))
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn config_path(&self) -> PathBuf { self.root.join(CONFIG_FILE) }

    pub fn bin_dir(&self) -> PathBuf { self.root.join(BIN_DIR) }

    pub fn shim(&self, shim: Shim) -> PathBuf { self.bin_dir().join(exe(shim.command())) }

    /// `<root>/runtime` or `<root>/tool`.
    pub fn versions_dir(&self, toolchain: Toolchain) -> PathBuf { self.root.join(toolchain.dir_name()) }

    pub fn version_dir(&self, toolchain: Toolchain, version: &str) -> PathBuf {
        self.versions_dir(toolchain).join(version)
    }

    /// Directory holding the main executable of an installed version.
    pub fn binary_dir(&self, toolchain: Toolchain, version: &str) -> PathBuf {
        let dir = self.version_dir(toolchain, version);
        match toolchain {
            Toolchain::Runtime => dir.join("go").join("bin"),
            Toolchain::Tool => dir,
        }
    }

    pub fn binary(&self, toolchain: Toolchain, version: &str) -> PathBuf {
        self.binary_dir(toolchain, version).join(exe(toolchain.name()))
    }

    /// Binary a shim dispatches to for a given tool version.
    pub fn shim_target(&self, shim: Shim, tool_version: &str) -> PathBuf {
        self.version_dir(Toolchain::Tool, tool_version)
            .join(exe(shim.command()))
    }

    /// Create the root, both version directories and `bin/`.
    ///
    /// Safe to call repeatedly and from concurrent processes.
    pub fn ensure_dirs(&self) -> Result<()> {
        let dirs = [
            self.versions_dir(Toolchain::Runtime),
            self.versions_dir(Toolchain::Tool),
            self.bin_dir(),
        ];
        for dir in dirs {
            std::fs::create_dir_all(&dir).map_err(|source| Error::CreateDir { path: dir.clone(), source })?;
        }
        Ok(())
    }

    /// Version directory names currently present for `toolchain`.
    ///
    /// Read fresh on every call. Hidden entries (in-flight staging
    /// directories) and plain files are ignored; a missing versions
    /// directory means nothing is installed.
    pub fn list_installed(&self, toolchain: Toolchain) -> Result<Vec<String>> {
        let dir = self.versions_dir(toolchain);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(Error::Read { path: dir, source }),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Read {
                path: dir.clone(),
                source,
            })?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') || !entry.path().is_dir() {
                continue;
            }
            versions.push(name);
        }
        versions.sort();
        Ok(versions)
    }

    /// Whether `version` of `toolchain` is installed.
    pub fn is_installed(&self, toolchain: Toolchain, version: &str) -> bool {
        self.version_dir(toolchain, version).is_dir()
    }
}
