use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry path below `base`.
///
/// Returns `Ok(None)` for entries naming the archive root itself (`./`).
/// Absolute paths, drive prefixes and `..` components that climb above the
/// archive root are rejected.
pub(crate) fn resolve_entry(entry: &Path, base: &Path) -> Result<Option<PathBuf>> {
    let mut relative = PathBuf::new();

    for component in entry.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(Error::PathEscape {
                        entry: entry.to_path_buf(),
                    });
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::PathEscape {
                    entry: entry.to_path_buf(),
                });
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Ok(None);
    }
    Ok(Some(base.join(relative)))
}
