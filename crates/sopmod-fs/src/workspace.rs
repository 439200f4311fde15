use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};

/// Outcome of [`Workspace::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The staged tree now lives at the destination.
    Published,
    /// Another writer published the destination first; the staged tree was discarded.
    AlreadyPresent,
}

/// A hidden staging directory created beside its final destination.
///
/// The directory is named `.<dest-name>.staging-XXXXXX` so it lives on the
/// same filesystem as the destination and can be published with a single
/// rename. It is removed on drop unless it was committed.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn beside(destination: impl AsRef<Path>) -> Result<Self> {
        let destination = destination.as_ref();
        let parent = destination.parent().ok_or_else(|| Error::NoParent {
            path: destination.to_path_buf(),
        })?;
        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        std::fs::create_dir_all(parent).map_err(|source| Error::Staging {
            dir: parent.to_path_buf(),
            source,
        })?;
        let dir = tempfile::Builder::new()
            .prefix(&format!(".{name}.staging-"))
            .tempdir_in(parent)
            .map_err(|source| Error::Staging {
                dir: parent.to_path_buf(),
                source,
            })?;

        tracing::debug!(staging = %dir.path().display(), "created staging directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path { self.dir.path() }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf { self.dir.path().join(relative) }

    /// Publish the staged tree at `destination` with a rename.
    ///
    /// If `destination` already exists, or appears while committing, the
    /// staged tree is dropped and [`Commit::AlreadyPresent`] is returned.
    pub fn commit(self, destination: impl AsRef<Path>) -> Result<Commit> {
        let destination = destination.as_ref();
        if destination.exists() {
            return Ok(Commit::AlreadyPresent);
        }

        // Temporary directories are created 0700; published trees are shared.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(self.dir.path(), std::fs::Permissions::from_mode(0o755)).map_err(|source| {
                Error::Staging {
                    dir: self.dir.path().to_path_buf(),
                    source,
                }
            })?;
        }

        match rename_dir(self.dir.path(), destination) {
            Ok(()) => Ok(Commit::Published),
            Err(_) if destination.exists() => Ok(Commit::AlreadyPresent),
            Err(source) => Err(Error::Rename {
                from: self.dir.path().to_path_buf(),
                to: destination.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(not(windows))]
fn rename_dir(src: &Path, dest: &Path) -> std::io::Result<()> { std::fs::rename(src, dest) }

// Virus scanners and indexers briefly hold handles on freshly written files.
#[cfg(windows)]
fn rename_dir(src: &Path, dest: &Path) -> std::io::Result<()> {
    use std::time::Duration;

    let mut delay = Duration::from_millis(8);
    let mut attempts = 0;
    loop {
        match std::fs::rename(src, dest) {
            Ok(()) => return Ok(()),
            Err(e) if dest.exists() || attempts >= 6 => return Err(e),
            Err(_) => {
                attempts += 1;
                std::thread::sleep(delay);
                delay *= 2;
            }
        }
    }
}
