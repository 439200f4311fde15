use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path:   PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to create {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("unknown toolchain {0:?}, expected \"go\" or \"sop\"")]
    UnknownToolchain(String),

    #[error(transparent)]
    Platform(#[from] sopmod_platform::Error),

    #[error(transparent)]
    Fs(#[from] sopmod_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
