//! Error types for shim operations.

use std::path::PathBuf;

use sopmod_core::{Shim, Toolchain};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no sop version configured; run `sopmod default <version>` or pin one in sop.mod")]
    NoVersionConfigured,

    #[error("{toolchain} {specifier} is not installed; run `sopmod install {toolchain} {specifier}`")]
    NotInstalled { toolchain: Toolchain, specifier: String },

    #[error("sop {version} does not ship {shim} (expected {})", path.display())]
    MissingBinary { shim: Shim, version: String, path: PathBuf },

    #[error("failed to execute {}: {source}", program.display())]
    Exec { program: PathBuf, source: std::io::Error },

    #[error("cannot locate the running executable: {0}")]
    CurrentExe(std::io::Error),

    #[error(transparent)]
    Core(#[from] sopmod_core::Error),

    #[error(transparent)]
    Platform(#[from] sopmod_platform::Error),

    #[error(transparent)]
    Fs(#[from] sopmod_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
