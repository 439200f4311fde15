//! Filesystem primitives for crash-safe installs.
//!
//! Everything that becomes visible to other processes is first written
//! next to its final location and then renamed into place, so readers
//! observe either nothing or the complete result.

mod error;
mod workspace;

pub use error::{Error, Result};
pub use workspace::{Commit, Workspace};

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    permissions: Option<u32>,
    sync:        bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self { Self::default() }

    /// Unix mode for the written file. Ignored elsewhere.
    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

fn parent_of(path: &Path) -> Result<&Path> {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => Ok(p),
        Some(_) => Ok(Path::new(".")),
        None => Err(Error::NoParent {
            path: path.to_path_buf(),
        }),
    }
}

fn persist_from(mut tmp: NamedTempFile, path: &Path, options: AtomicWriteOptions) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    tmp.flush().map_err(write_err)?;
    if options.sync {
        tmp.as_file().sync_all().map_err(write_err)?;
    }

    #[cfg(unix)]
    if let Some(mode) = options.permissions {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(mode)).map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| Error::Write {
        path:   path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Write `content` to `path` through a temporary file in the same directory.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: AtomicWriteOptions) -> Result<()> {
    let path = path.as_ref();
    let parent = parent_of(path)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.write_all(content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    persist_from(tmp, path, options)
}

/// Copy `src` over `dest` and mark the result executable.
///
/// The copy goes through a sibling temporary file, so `src` and `dest`
/// may name the same file.
pub fn copy_executable(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    let parent = parent_of(dest)?;

    let mut input = fs::File::open(src).map_err(|source| Error::Read {
        path: src.to_path_buf(),
        source,
    })?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })?;
    io::copy(&mut input, &mut tmp).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    tracing::debug!(from = %src.display(), to = %dest.display(), "copying executable");
    persist_from(tmp, dest, AtomicWriteOptions::new().permissions(0o755))
}
