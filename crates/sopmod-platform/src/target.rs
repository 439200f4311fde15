//! The `{os, arch}` pair toolchains are published for.

use std::fmt;

use once_cell::sync::Lazy;

use crate::arch::{self, Arch};
use crate::error::{Error, Result};
use crate::os::{self, OS};

static CURRENT: Lazy<Result<Platform>> = Lazy::new(Platform::detect);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os:   OS,
    pub arch: Arch,
}

impl Platform {
    pub fn new(os: OS, arch: Arch) -> Self { Self { os, arch } }

    /// The platform of the running process, detected once.
    ///
    /// Any OS or architecture outside the supported set is an
    /// [`Error::UnsupportedPlatform`].
    pub fn current() -> Result<Platform> { CURRENT.clone() }

    fn detect() -> Result<Platform> {
        let unsupported = |_| Error::UnsupportedPlatform {
            os:   std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        };
        let os = os::detect().map_err(unsupported)?;
        let arch = arch::detect().map_err(unsupported)?;
        Ok(Platform { os, arch })
    }

    /// Rust target triple used to name tool release assets.
    pub fn target_triple(&self) -> String {
        let rest = match self.os {
            OS::Linux => "unknown-linux-gnu",
            OS::Darwin => "apple-darwin",
            OS::Windows => "pc-windows-msvc",
        };
        format!("{}-{}", self.arch.triple_prefix(), rest)
    }

    pub fn archive_ext(&self) -> &'static str { self.os.archive_ext() }

    pub fn exe_suffix(&self) -> &'static str { self.os.exe_suffix() }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-{}", self.os, self.arch) }
}
