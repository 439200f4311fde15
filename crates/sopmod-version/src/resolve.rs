use std::cmp::Ordering;

use thiserror::Error;

use crate::version::{Version, compare_versions};

/// Specifier meaning "newest stable release".
pub const LATEST: &str = "latest";

/// A remote listing of published releases.
pub trait ReleaseIndex {
    type Error;

    /// Stable release versions, newest first.
    fn stable_versions(&self) -> Result<Vec<String>, Self::Error>;
}

#[derive(Debug, Error)]
pub enum ResolveError<E> {
    #[error(transparent)]
    Index(E),

    #[error("no stable release is published")]
    NoStableRelease,
}

fn strip_v(specifier: &str) -> &str {
    specifier
        .strip_prefix('v')
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(specifier)
}

fn is_minor_partial(specifier: &str) -> bool {
    Version::parse(specifier).is_ok_and(|v| v.components() == 2 && !v.is_prerelease())
}

fn matches_partial(candidate: &str, partial: &str) -> bool {
    candidate == partial
        || candidate
            .strip_prefix(partial)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Expand a symbolic specifier against a remote index.
///
/// - `latest` becomes the first stable entry.
/// - A `major.minor` partial becomes the newest stable entry equal to it or
///   prefixed by `partial.`; with no such entry the partial is returned as is.
/// - Anything else is returned unchanged without consulting the index.
pub fn resolve_symbolic<I>(specifier: &str, index: &I) -> Result<String, ResolveError<I::Error>>
where
    I: ReleaseIndex + ?Sized,
{
    let specifier = specifier.trim();

    if specifier == LATEST {
        let versions = index.stable_versions().map_err(ResolveError::Index)?;
        let latest = versions.into_iter().next().ok_or(ResolveError::NoStableRelease)?;
        tracing::debug!(%latest, "resolved latest");
        return Ok(latest);
    }

    let partial = strip_v(specifier);
    if is_minor_partial(partial) {
        let versions = index.stable_versions().map_err(ResolveError::Index)?;
        if let Some(found) = versions.into_iter().find(|v| matches_partial(v, partial)) {
            tracing::debug!(%partial, %found, "resolved partial version");
            return Ok(found);
        }
        return Ok(partial.to_string());
    }

    Ok(partial.to_string())
}

/// Map a specifier onto the installed version set.
///
/// An exact string match always wins. Otherwise the numerically highest
/// entry starting with `specifier.` is returned; equal values prefer the
/// entry with more written components, then the earlier one. `None` means
/// "not installed" and is not an error by itself.
pub fn resolve_installed<S: AsRef<str>>(specifier: &str, installed: &[S]) -> Option<String> {
    let specifier = specifier.trim();
    if let Some(exact) = installed.iter().find(|v| v.as_ref() == specifier) {
        return Some(exact.as_ref().to_string());
    }

    let wanted = strip_v(specifier);
    if wanted != specifier
        && let Some(exact) = installed.iter().find(|v| v.as_ref() == wanted)
    {
        return Some(exact.as_ref().to_string());
    }

    let prefix = format!("{wanted}.");
    let components = |s: &str| Version::parse(s).map(|v| v.components()).unwrap_or(0);

    let mut best: Option<&str> = None;
    for candidate in installed.iter().map(AsRef::as_ref) {
        if !candidate.starts_with(&prefix) {
            continue;
        }
        best = match best {
            None => Some(candidate),
            Some(current) => match compare_versions(candidate, current) {
                Ordering::Greater => Some(candidate),
                Ordering::Equal if components(candidate) > components(current) => Some(candidate),
                _ => Some(current),
            },
        };
    }
    best.map(str::to_string)
}
