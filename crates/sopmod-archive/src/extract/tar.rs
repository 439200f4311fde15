use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use super::{ExtractReport, create_dir, write_file};
use crate::error::{Error, Result};
use crate::sanitize::resolve_entry;

pub(super) fn extract(file: File, destination: &Path) -> Result<ExtractReport> {
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut report = ExtractReport::default();

    for entry in archive.entries().map_err(|e| Error::Corrupted(e.to_string()))? {
        let mut entry = entry.map_err(|e| Error::Corrupted(e.to_string()))?;
        let raw_path = entry
            .path()
            .map_err(|e| Error::Corrupted(e.to_string()))?
            .into_owned();

        let Some(target) = resolve_entry(&raw_path, destination)? else {
            continue;
        };

        match entry.header().entry_type() {
            EntryType::Directory => {
                create_dir(&target)?;
                report.directories += 1;
            }
            EntryType::Regular | EntryType::Continuous => {
                let mode = entry.header().mode().ok();
                report.bytes += write_file(&mut entry, &target, mode)?;
                report.files += 1;
            }
            other => {
                tracing::debug!(path = %raw_path.display(), kind = ?other, "skipping tar entry");
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}
