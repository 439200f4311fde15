use std::path::{Component, Path};

use console::style;
use sopmod_archive::{ArchiveFormat, extract_file};
use sopmod_core::{Layout, Shim, Toolchain, compat};
use sopmod_fetch::{HttpClient, ReleaseAsset, RuntimeIndex, ToolReleases, archive_name, download_to_temp, verify_sha256};
use sopmod_fs::{Commit, Workspace, copy_executable};
use sopmod_platform::Platform;
use sopmod_version::{LATEST, ReleaseIndex, compare_versions, resolve_installed, resolve_symbolic};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Result of [`Installer::install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub toolchain: Toolchain,
    pub version:   String,
    /// `false` when the version was already present and nothing was downloaded.
    pub fresh:     bool,
}

pub struct Installer<'a, C: HttpClient + ?Sized> {
    layout:   &'a Layout,
    client:   &'a C,
    platform: Option<Platform>,
    progress: bool,
}

impl<'a, C: HttpClient + ?Sized> Installer<'a, C> {
    pub fn new(layout: &'a Layout, client: &'a C) -> Self {
        Self {
            layout,
            client,
            platform: None,
            progress: false,
        }
    }

    /// Install for `platform` instead of the host.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn layout(&self) -> &Layout { self.layout }

    fn platform(&self) -> Result<Platform> {
        match &self.platform {
            Some(platform) => Ok(*platform),
            None => Ok(Platform::current()?),
        }
    }

    /// Turn `latest` or a partial version into a concrete release version.
    pub fn resolve(&self, toolchain: Toolchain, specifier: &str) -> Result<String> {
        let version = match toolchain {
            Toolchain::Runtime => resolve_symbolic(specifier, &RuntimeIndex::new(self.client))?,
            Toolchain::Tool => resolve_symbolic(specifier, &ToolReleases::new(self.client))?,
        };
        Ok(version)
    }

    /// Newest stable release published upstream.
    pub fn latest(&self, toolchain: Toolchain) -> Result<String> {
        let versions = match toolchain {
            Toolchain::Runtime => RuntimeIndex::new(self.client).stable_versions()?,
            Toolchain::Tool => ToolReleases::new(self.client).stable_versions()?,
        };
        versions
            .into_iter()
            .next()
            .ok_or_else(|| Error::VersionNotFound(format!("a stable {toolchain} release")))
    }

    /// Install `specifier` of `toolchain`. Installing a present version is a no-op.
    pub fn install(&self, toolchain: Toolchain, specifier: &str) -> Result<Installed> {
        let runtimes = RuntimeIndex::new(self.client);
        let tools = ToolReleases::new(self.client);
        let version = match toolchain {
            Toolchain::Runtime => resolve_symbolic(specifier, &runtimes)?,
            Toolchain::Tool => resolve_symbolic(specifier, &tools)?,
        };
        let version = single_component(version)?;
        let platform = self.platform()?;
        debug!(%toolchain, specifier, %version, %platform, "installing");

        if self.layout.is_installed(toolchain, &version) {
            info!(%toolchain, %version, "already installed");
            return Ok(Installed {
                toolchain,
                version,
                fresh: false,
            });
        }

        let commit = match toolchain {
            Toolchain::Runtime => self.install_runtime(&version, &platform, &runtimes)?,
            Toolchain::Tool => self.install_tool(&version, &platform, &tools)?,
        };
        Ok(Installed {
            toolchain,
            version,
            fresh: commit == Commit::Published,
        })
    }

    fn install_runtime(&self, version: &str, platform: &Platform, index: &RuntimeIndex<'_, C>) -> Result<Commit> {
        let filename = archive_name(version, platform);
        let url = index.download_url(version, platform);

        let response = self.client.get(&url)?;
        if !response.is_success() {
            debug!(%url, status = response.status, "runtime download unavailable");
            return Err(Error::VersionNotFound(format!("go {version} for {platform}")));
        }
        let archive = download_to_temp(response, &format!("go {version}"), self.progress)?;

        match index.checksum(&filename)? {
            Some(expected) => verify_sha256(archive.path(), &expected)?,
            None => warn!(%filename, "no published checksum, skipping verification"),
        }

        let dest = self.layout.version_dir(Toolchain::Runtime, version);
        let staging = Workspace::beside(&dest)?;
        let report = extract_file(archive.path(), ArchiveFormat::from_name(&filename), staging.path())?;
        debug!(files = report.files, bytes = report.bytes, "extracted runtime");

        self.check_binary(&staging, Toolchain::Runtime, version)?;
        Ok(staging.commit(&dest)?)
    }

    fn install_tool(&self, version: &str, platform: &Platform, releases: &ToolReleases<'_, C>) -> Result<Commit> {
        self.warn_if_no_compatible_runtime(version)?;

        let release = releases
            .by_tag(version)?
            .ok_or_else(|| Error::VersionNotFound(format!("sop {version}")))?;

        let triple = platform.target_triple();
        let primary = release
            .find_asset(&format!("{}-{triple}", Shim::Tool.command()))
            .ok_or_else(|| Error::VersionNotFound(format!("sop {version} for {triple}")))?;
        let companion = release.find_asset(&format!("{}-{triple}", Shim::Companion.command()));

        let dest = self.layout.version_dir(Toolchain::Tool, version);
        let staging = Workspace::beside(&dest)?;
        self.fetch_asset(primary, Shim::Tool, version, &staging)?;
        match companion {
            Some(asset) => self.fetch_asset(asset, Shim::Companion, version, &staging)?,
            None => debug!(%triple, "release has no companion binary"),
        }

        self.check_binary(&staging, Toolchain::Tool, version)?;
        Ok(staging.commit(&dest)?)
    }

    fn fetch_asset(&self, asset: &ReleaseAsset, shim: Shim, version: &str, staging: &Workspace) -> Result<()> {
        let response = self.client.get(&asset.browser_download_url)?.error_for_status()?;
        let file = download_to_temp(response, &format!("{shim} {version}"), self.progress)?;

        match ArchiveFormat::from_name(&asset.name) {
            ArchiveFormat::Raw => {
                let target = self.staged(staging, &self.layout.shim_target(shim, version), Toolchain::Tool, version);
                copy_executable(file.path(), target)?;
            }
            format => {
                extract_file(file.path(), format, staging.path())?;
            }
        }
        Ok(())
    }

    /// Map a path inside the final version directory onto the staging directory.
    fn staged(&self, staging: &Workspace, path: &Path, toolchain: Toolchain, version: &str) -> std::path::PathBuf {
        let dest = self.layout.version_dir(toolchain, version);
        match path.strip_prefix(&dest) {
            Ok(relative) => staging.join(relative),
            Err(_) => staging.join(path.file_name().unwrap_or_default()),
        }
    }

    fn check_binary(&self, staging: &Workspace, toolchain: Toolchain, version: &str) -> Result<()> {
        let expected = self.layout.binary(toolchain, version);
        if !self.staged(staging, &expected, toolchain, version).is_file() {
            return Err(Error::BinaryNotFound { path: expected });
        }
        Ok(())
    }

    fn warn_if_no_compatible_runtime(&self, tool_version: &str) -> Result<()> {
        let runtimes = self.layout.list_installed(Toolchain::Runtime)?;
        if runtimes.is_empty() || compat::best_compatible(&runtimes, tool_version).is_some() {
            return Ok(());
        }

        eprintln!(
            "{} {}; installed go versions: {}",
            style("warning:").yellow().bold(),
            compat::compat_message(tool_version),
            runtimes.join(", ")
        );
        if let Some(rule) = compat::compatibility_for(tool_version) {
            eprintln!("  hint: sopmod install go {}", rule.min_runtime);
        }
        Ok(())
    }

    /// Delete the installed version `specifier` maps to and return its name.
    ///
    /// `latest` means the newest installed version; partial versions map the
    /// way the shims map them. Only members of the installed set are touched.
    pub fn remove(&self, toolchain: Toolchain, specifier: &str) -> Result<String> {
        let installed = self.installed(toolchain)?;
        let found = match specifier.trim() {
            LATEST => installed.first().cloned(),
            specifier => resolve_installed(specifier, &installed),
        };
        let version = found.ok_or_else(|| Error::VersionNotFound(format!("{toolchain} {specifier}")))?;
        let version = single_component(version)?;

        let dir = self.layout.version_dir(toolchain, &version);
        std::fs::remove_dir_all(&dir).map_err(|source| Error::Remove { path: dir, source })?;
        info!(%toolchain, %version, "removed");
        Ok(version)
    }

    /// Installed versions of `toolchain`, newest first.
    pub fn installed(&self, toolchain: Toolchain) -> Result<Vec<String>> {
        let mut versions = self.layout.list_installed(toolchain)?;
        versions.sort_by(|a, b| compare_versions(b, a));
        Ok(versions)
    }

    /// Highest installed runtime compatible with `tool_version`, installing
    /// the latest runtime when none qualifies.
    pub fn find_or_install_compatible_runtime(&self, tool_version: &str) -> Result<Installed> {
        let runtimes = self.layout.list_installed(Toolchain::Runtime)?;
        if let Some(best) = compat::best_compatible(&runtimes, tool_version) {
            return Ok(Installed {
                toolchain: Toolchain::Runtime,
                version:   best.to_string(),
                fresh:     false,
            });
        }
        debug!(tool_version, "no compatible runtime installed");
        self.install(Toolchain::Runtime, LATEST)
    }
}

/// Version names become directory names; anything but one plain path
/// component could point outside the toolchain directory.
fn single_component(version: String) -> Result<String> {
    let mut components = Path::new(&version).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !version.starts_with('.') => Ok(version),
        _ => Err(Error::InvalidVersion(version)),
    }
}
