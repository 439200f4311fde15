use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} has no parent directory", path.display())]
    NoParent { path: PathBuf },

    #[error("failed to create staging directory in {}: {source}", dir.display())]
    Staging { dir: PathBuf, source: std::io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Rename {
        from:   PathBuf,
        to:     PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
