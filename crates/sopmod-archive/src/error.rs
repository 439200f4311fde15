use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0:?} is not an archive")]
    NotAnArchive(String),

    #[error("archive entry '{}' escapes the destination directory", entry.display())]
    PathEscape { entry: PathBuf },

    #[error("archive is corrupted: {0}")]
    Corrupted(String),

    #[error("failed to extract '{}': {source}", path.display())]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => Error::Io(io),
            other => Error::Corrupted(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
