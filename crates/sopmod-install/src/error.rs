use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    UnsupportedPlatform(#[from] sopmod_platform::Error),

    #[error("{0} was not found")]
    VersionNotFound(String),

    #[error("`{0}` is not a version name")]
    InvalidVersion(String),

    #[error("expected binary missing after extraction: {}", path.display())]
    BinaryNotFound { path: PathBuf },

    #[error("failed to remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: std::io::Error },

    #[error(transparent)]
    Fetch(#[from] sopmod_fetch::Error),

    #[error(transparent)]
    Archive(#[from] sopmod_archive::Error),

    #[error(transparent)]
    Fs(#[from] sopmod_fs::Error),

    #[error(transparent)]
    Core(#[from] sopmod_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sopmod_version::ResolveError<sopmod_fetch::Error>> for Error {
    fn from(e: sopmod_version::ResolveError<sopmod_fetch::Error>) -> Self {
        match e {
            sopmod_version::ResolveError::Index(e) => Error::Fetch(e),
            sopmod_version::ResolveError::NoStableRelease => Error::VersionNotFound("a stable release".into()),
        }
    }
}
