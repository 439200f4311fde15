use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use sopmod_core::ui::tracker::{ProgressTrackerBuilder, Tracker, TrackerBuilder};
use tempfile::NamedTempFile;

use crate::client::Response;
use crate::error::{Error, Result};

/// Stream `response` into a fresh temporary file.
///
/// The file lives in the system temp directory, outside any install
/// destination, and is deleted when the returned handle is dropped.
pub fn download_to_temp(response: Response, label: &str, show_progress: bool) -> Result<NamedTempFile> {
    let mut tmp = tempfile::Builder::new().prefix("sopmod-download-").tempfile()?;
    let tracker = ProgressTrackerBuilder::default()
        .with_len(response.content_length)
        .with_prefix(label)
        .hidden(!show_progress)
        .build();

    let mut body = response.body;
    let mut buffer = [0u8; 64 * 1024];
    let mut total = 0u64;
    loop {
        let read = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::Network {
                    url:    response.url,
                    source: Box::new(e),
                });
            }
        };
        tmp.write_all(&buffer[..read]).map_err(|source| Error::Write {
            path: tmp.path().to_path_buf(),
            source,
        })?;
        tracker.step(read as u64);
        total += read as u64;
    }
    tmp.flush()?;
    tracker.finish();

    tracing::debug!(url = %response.url, bytes = total, path = %tmp.path().display(), "downloaded");
    Ok(tmp)
}

/// Lowercase hex SHA-256 of the file at `path`.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    let mut file = File::open(path.as_ref())?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

pub fn verify_sha256(path: impl AsRef<Path>, expected: &str) -> Result<()> {
    let path = path.as_ref();
    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(Error::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
