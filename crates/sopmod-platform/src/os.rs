//! Operating system detection.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Operating systems a toolchain can be installed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OS {
    Linux,
    Darwin,
    Windows,
}

impl OS {
    /// Name used in runtime download file names (`linux`, `darwin`, `windows`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OS::Linux => "linux",
            OS::Darwin => "darwin",
            OS::Windows => "windows",
        }
    }

    /// Archive extension the runtime is published with on this OS.
    pub fn archive_ext(&self) -> &'static str {
        match self {
            OS::Windows => "zip",
            OS::Linux | OS::Darwin => "tar.gz",
        }
    }

    pub fn exe_suffix(&self) -> &'static str {
        match self {
            OS::Windows => ".exe",
            OS::Linux | OS::Darwin => "",
        }
    }
}

impl FromStr for OS {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linux" => Ok(OS::Linux),
            "macos" | "darwin" => Ok(OS::Darwin),
            "windows" => Ok(OS::Windows),
            other => Err(Error::UnknownOS(other.to_string())),
        }
    }
}

impl fmt::Display for OS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Detect the operating system this binary was built for.
pub fn detect() -> Result<OS> { std::env::consts::OS.parse() }
