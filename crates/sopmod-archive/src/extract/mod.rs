use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::ArchiveFormat;

mod tar;
mod zip;

/// Counts gathered while extracting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub files:       usize,
    pub directories: usize,
    pub skipped:     usize,
    pub bytes:       u64,
}

/// Extract the archive at `archive` into the existing or new directory `destination`.
pub fn extract_file(
    archive: impl AsRef<Path>,
    format: ArchiveFormat,
    destination: impl AsRef<Path>,
) -> Result<ExtractReport> {
    let archive = archive.as_ref();
    let destination = destination.as_ref();
    create_dir(destination)?;

    let file = File::open(archive).map_err(|source| Error::ExtractionFailed {
        path: archive.to_path_buf(),
        source,
    })?;

    let report = match format {
        ArchiveFormat::TarGz => tar::extract(file, destination)?,
        ArchiveFormat::Zip => zip::extract(file, destination)?,
        ArchiveFormat::Raw => return Err(Error::NotAnArchive(archive.display().to_string())),
    };

    tracing::debug!(
        archive = %archive.display(),
        files = report.files,
        directories = report.directories,
        skipped = report.skipped,
        "extracted archive"
    );
    Ok(report)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write one regular file, creating its parents and restoring its mode.
fn write_file(reader: &mut dyn Read, target: &Path, mode: Option<u32>) -> Result<u64> {
    if let Some(parent) = target.parent() {
        create_dir(parent)?;
    }

    let failed = |source| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source,
    };
    let mut out = File::create(target).map_err(failed)?;
    let written = io::copy(reader, &mut out).map_err(failed)?;
    drop(out);

    apply_mode(target, mode).map_err(failed)?;
    Ok(written)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        let mode = mode & 0o777;
        // Entries stored without any permission bits would be unreadable.
        let mode = if mode == 0 { 0o644 } else { mode };
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> io::Result<()> { Ok(()) }
