//! Version parsing, ordering and resolution for toolchain versions.
//!
//! Toolchain versions are dotted numeric identifiers (`1.22`, `1.22.5`,
//! `0.5.0`) where missing components count as zero. Two resolution
//! strategies are provided:
//!
//! - [`resolve_installed`] maps a specifier onto the set of version
//!   directories present on disk, exact match first.
//! - [`resolve_symbolic`] expands `latest` and `major.minor` partials
//!   against a remote [`ReleaseIndex`].

pub use resolve::{LATEST, ReleaseIndex, ResolveError, resolve_installed, resolve_symbolic};
pub use version::{Version, VersionError, compare_versions};

mod resolve;
mod version;
