//! Archive extraction with path sanitization.
//!
//! # Architecture
//!
//! - `format.rs` - format detection from the published file name
//! - `sanitize.rs` - path sanitization (zip-slip prevention)
//! - `extract/` - per-format implementations
//!
//! Extraction writes every entry below the destination, recreates
//! directories, restores Unix mode bits and skips entry types it does not
//! understand (symlinks, devices, fifos) instead of failing.

pub use error::{Error, Result};
pub use extract::{ExtractReport, extract_file};
pub use format::ArchiveFormat;

mod error;
mod extract;
mod format;
mod sanitize;
