//! `PATH` inspection and modification.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

fn paths_equal(p1: &Path, p2: &Path) -> bool {
    fn normalize(p: &Path) -> String {
        let s = p.to_string_lossy();
        let s = s.trim_end_matches(['/', '\\']);
        if cfg!(windows) { s.to_lowercase() } else { s.to_string() }
    }
    normalize(p1) == normalize(p2)
}

#[derive(Debug, Clone, Default)]
pub struct PathModifier {
    paths: Vec<PathBuf>,
}

impl PathModifier {
    pub fn from_value(value: impl Into<OsString>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return Self::default();
        }
        Self {
            paths: env::split_paths(&value).collect(),
        }
    }

    /// Put `path` first. An existing equal entry is moved rather than duplicated.
    pub fn prepend(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.paths.retain(|p| !paths_equal(p, &path));
        self.paths.insert(0, path);
        self
    }

    pub fn contains(&self, path: &Path) -> bool { self.paths.iter().any(|p| paths_equal(p, path)) }

    pub fn paths(&self) -> &[PathBuf] { &self.paths }

    pub fn build(self) -> Result<OsString> {
        env::join_paths(&self.paths).map_err(|e| Error::InvalidPathEntry(e.to_string()))
    }
}

pub fn path_env() -> Option<Vec<PathBuf>> {
    env::var_os("PATH").map(|val| env::split_paths(&val).collect())
}

pub fn is_in_path(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let Some(paths) = path_env() else {
        return false;
    };
    paths.iter().any(|p| paths_equal(p, path))
}
