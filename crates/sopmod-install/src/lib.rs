//! Installation pipeline.
//!
//! An install resolves the specifier, downloads the artifact to a temporary
//! file, extracts it into a hidden staging directory beside the destination,
//! checks that the expected binary is present and publishes the directory
//! with a single rename. The version directory existing is the only record
//! of a completed install.

pub use error::{Error, Result};
pub use installer::{Installed, Installer};

mod error;
mod installer;
