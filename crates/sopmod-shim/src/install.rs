use std::path::{Path, PathBuf};

use sopmod_core::{Layout, Shim};
use sopmod_fs::copy_executable;

use crate::error::{Error, Result};

/// Copy the running executable to every shim path.
pub fn install_shims(layout: &Layout) -> Result<Vec<PathBuf>> {
    let current = std::env::current_exe().map_err(Error::CurrentExe)?;
    install_shims_from(layout, &current)
}

/// Copy `source` to every shim path, replacing earlier copies.
pub fn install_shims_from(layout: &Layout, source: &Path) -> Result<Vec<PathBuf>> {
    layout.ensure_dirs()?;
    let mut installed = Vec::with_capacity(Shim::ALL.len());
    for shim in Shim::ALL {
        let dest = layout.shim(shim);
        copy_executable(source, &dest)?;
        tracing::debug!(%shim, path = %dest.display(), "installed shim");
        installed.push(dest);
    }
    Ok(installed)
}
