use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use super::{ExtractReport, create_dir, write_file};
use crate::error::{Error, Result};
use crate::sanitize::resolve_entry;

const S_IFMT: u32 = 0o170000;
const S_IFREG: u32 = 0o100000;

pub(super) fn extract(file: File, destination: &Path) -> Result<ExtractReport> {
    let mut archive = ZipArchive::new(file)?;
    let mut report = ExtractReport::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        let Some(target) = resolve_entry(Path::new(&name), destination)? else {
            continue;
        };
        if entry.enclosed_name().is_none() {
            return Err(Error::PathEscape { entry: name.into() });
        }

        let mode = entry.unix_mode();
        if entry.is_dir() {
            create_dir(&target)?;
            report.directories += 1;
            continue;
        }

        // Entries written on Unix carry a file type; anything but a regular file is skipped.
        if let Some(mode) = mode
            && mode & S_IFMT != 0
            && mode & S_IFMT != S_IFREG
        {
            tracing::debug!(path = %name, mode = %format!("{mode:o}"), "skipping zip entry");
            report.skipped += 1;
            continue;
        }

        report.bytes += write_file(&mut entry, &target, mode)?;
        report.files += 1;
    }

    Ok(report)
}
