use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The two toolchains sopmod manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    /// The Go runtime.
    Runtime,
    /// The sop tool.
    Tool,
}

impl Toolchain {
    pub const ALL: [Toolchain; 2] = [Toolchain::Tool, Toolchain::Runtime];

    /// Command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Toolchain::Runtime => "go",
            Toolchain::Tool => "sop",
        }
    }

    /// Directory below the root holding one subdirectory per installed version.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Toolchain::Runtime => "runtime",
            Toolchain::Tool => "tool",
        }
    }
}

impl FromStr for Toolchain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "go" | "runtime" => Ok(Toolchain::Runtime),
            "sop" | "tool" => Ok(Toolchain::Tool),
            other => Err(Error::UnknownToolchain(other.to_string())),
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Entry points installed into `<root>/bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shim {
    /// `sop`, dispatching to the tool binary.
    Tool,
    /// `sopls`, dispatching to the language server shipped with the tool.
    Companion,
}

impl Shim {
    pub const ALL: [Shim; 2] = [Shim::Tool, Shim::Companion];

    /// Command name without any executable suffix.
    pub fn command(&self) -> &'static str {
        match self {
            Shim::Tool => "sop",
            Shim::Companion => "sopls",
        }
    }

    /// Recognise a shim from the file stem the process was started as.
    pub fn from_command(stem: &str) -> Option<Shim> {
        Shim::ALL.into_iter().find(|s| s.command() == stem)
    }
}

impl fmt::Display for Shim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.command()) }
}
