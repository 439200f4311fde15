//! Where a requested version comes from.
//!
//! A [`VersionResolver`] answers "which version of this toolchain was asked
//! for" without looking at what is installed. Resolvers chain with
//! [`PairResolver`]: the first one that answers wins.

use std::fmt;
use std::path::PathBuf;

use sopmod_core::Toolchain;
use sopmod_core::config::{GlobalConfig, find_pin};

use crate::error::Result;

/// Source of a [`Requested`] version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Manifest(PathBuf),
    GlobalDefault,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Manifest(path) => write!(f, "{}", path.display()),
            Origin::GlobalDefault => f.write_str("global default"),
        }
    }
}

/// A version specifier as written by the user, before mapping to the installed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requested {
    pub specifier: String,
    pub origin:    Origin,
}

pub trait VersionResolver {
    fn resolve(&self, toolchain: Toolchain) -> Result<Option<Requested>>;
}

impl<R: VersionResolver + ?Sized> VersionResolver for &R {
    fn resolve(&self, toolchain: Toolchain) -> Result<Option<Requested>> { (**self).resolve(toolchain) }
}

/// Nearest `sop.mod` pin from a starting directory upwards.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    start: PathBuf,
}

impl ManifestResolver {
    pub fn new(start: impl Into<PathBuf>) -> Self { Self { start: start.into() } }
}

impl VersionResolver for ManifestResolver {
    fn resolve(&self, toolchain: Toolchain) -> Result<Option<Requested>> {
        let pin = find_pin(&self.start, toolchain)?;
        Ok(pin.map(|pin| Requested {
            specifier: pin.version,
            origin:    Origin::Manifest(pin.manifest),
        }))
    }
}

/// Defaults from `config.toml`.
#[derive(Debug, Clone)]
pub struct GlobalResolver<'a> {
    config: &'a GlobalConfig,
}

impl<'a> GlobalResolver<'a> {
    pub fn new(config: &'a GlobalConfig) -> Self { Self { config } }
}

impl VersionResolver for GlobalResolver<'_> {
    fn resolve(&self, toolchain: Toolchain) -> Result<Option<Requested>> {
        Ok(self.config.default_for(toolchain).map(|v| Requested {
            specifier: v.to_string(),
            origin:    Origin::GlobalDefault,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct PairResolver<R1, R2> {
    primary:  R1,
    fallback: R2,
}

impl<R1, R2> PairResolver<R1, R2>
where
    R1: VersionResolver,
    R2: VersionResolver,
{
    pub fn new(primary: R1, fallback: R2) -> Self { Self { primary, fallback } }
}

impl<R1, R2> VersionResolver for PairResolver<R1, R2>
where
    R1: VersionResolver,
    R2: VersionResolver,
{
    fn resolve(&self, toolchain: Toolchain) -> Result<Option<Requested>> {
        match self.primary.resolve(toolchain)? {
            Some(found) => Ok(Some(found)),
            None => self.fallback.resolve(toolchain),
        }
    }
}
