use std::path::PathBuf;

use crate::error::{Error, Result};

pub fn user_home() -> Option<PathBuf> { home::home_dir() }

/// Home directory, or [`Error::NoHome`] when it cannot be determined.
pub fn require_home() -> Result<PathBuf> { user_home().ok_or(Error::NoHome) }
