//! Version types and operations.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use semver::{Prerelease, Version as SemVer};
use thiserror::Error;

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?<major>[0-9]+)(?:\.(?<minor>[0-9]+))?(?:\.(?<patch>[0-9]+))?(?:-?(?<pre>(?:rc|beta|alpha)[0-9]*))?$")
        .expect("version regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version: {0:?}")]
pub struct VersionError(pub String);

/// A dotted numeric version such as `1.22` or `v0.5.0`.
///
/// Ordering, equality and hashing use the numeric value with missing
/// components read as zero, so `1.21 == 1.21.0`. [`Version::as_str`] and
/// `Display` keep the text as written (minus any `v`/`go` prefix), which is
/// what directory names and download URLs are built from.
#[derive(Debug, Clone)]
pub struct Version {
    raw:        String,
    components: usize,
    semver:     SemVer,
}

impl Version {
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let trimmed = s.trim();
        let stripped = trimmed
            .strip_prefix("go")
            .or_else(|| trimmed.strip_prefix('v'))
            .unwrap_or(trimmed);

        let caps = VERSION_REGEX
            .captures(stripped)
            .ok_or_else(|| VersionError(s.to_string()))?;

        let number = |name: &str| -> Result<Option<u64>, VersionError> {
            caps.name(name)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| VersionError(s.to_string())))
                .transpose()
        };

        let major = number("major")?.unwrap_or(0);
        let minor = number("minor")?;
        let patch = number("patch")?;
        let components = 1 + minor.is_some() as usize + patch.is_some() as usize;

        let mut semver = SemVer::new(major, minor.unwrap_or(0), patch.unwrap_or(0));
        if let Some(pre) = caps.name("pre") {
            semver.pre = Prerelease::new(pre.as_str()).map_err(|_| VersionError(s.to_string()))?;
        }

        Ok(Self {
            raw: stripped.to_string(),
            components,
            semver,
        })
    }

    pub fn as_str(&self) -> &str { &self.raw }

    /// Number of dotted components that were written out (1 to 3).
    pub fn components(&self) -> usize { self.components }

    pub fn is_prerelease(&self) -> bool { !self.semver.pre.is_empty() }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool { self.semver == other.semver }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) { self.semver.hash(state) }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering { self.semver.cmp(&other.semver) }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Version::parse(s) }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.raw) }
}

/// Compare two version strings numerically.
///
/// Strings that do not parse sort before every valid version and compare
/// to each other as text, so sorting a directory listing never fails.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
