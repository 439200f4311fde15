use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("unknown operating system: {0}")]
    UnknownOS(String),

    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    #[error("could not determine the home directory")]
    NoHome,

    #[error("PATH entry contains a separator: {0}")]
    InvalidPathEntry(String),
}
