//! Ownership of the single active-version symlink.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::error::{Result, VgoError};
use crate::registry::list_versions;
use crate::store::Store;

/// Reads the active link and returns the bare version it points at.
///
/// # Errors
///
/// Returns `NoActiveVersion` if the link is missing or unreadable. Callers
/// that only need "is something active" can treat it as `None`, see
/// [`active_version`].
pub fn current_active(store: &Store) -> Result<String> {
    let target = fs::read_link(&store.active_link).map_err(|e| VgoError::NoActiveVersion {
        link: store.active_link.clone(),
        source: e,
    })?;
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    Ok(store
        .version_from_dir_name(name)
        .unwrap_or(name)
        .to_string())
}

/// Like [`current_active`] but maps "no active version" to `None`.
pub fn active_version(store: &Store) -> Result<Option<String>> {
    match current_active(store) {
        Ok(version) => Ok(Some(version)),
        Err(e) if e.is_no_active_version() => Ok(None),
        Err(e) => Err(e),
    }
}

/// True when the active link exists but its target does not.
pub fn is_dangling(store: &Store) -> bool {
    let is_link = fs::symlink_metadata(&store.active_link)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    is_link && !store.active_link.exists()
}

/// Points the active link at an installed version.
///
/// Steps, in order: registry membership, install directory presence, removal
/// of the previous link, creation of the new one. The previous link is not
/// restored if the last step fails.
///
/// Returns the install directory now behind the link.
///
/// # Errors
///
/// - `Registry` if the install root can't be listed
/// - `UnknownVersion` if the version is not installed (nothing is touched)
/// - `MissingInstall` if the registry and the filesystem disagree
/// - `Activation` if the old link can't be removed or the new one created
pub fn activate(store: &Store, version: &str) -> Result<PathBuf> {
    let installed = list_versions(store)?;
    if !installed.iter().any(|v| v == version) {
        return Err(VgoError::UnknownVersion {
            version: version.to_string(),
            installed,
        });
    }

    let target = store.version_dir(version);
    if !target.is_dir() {
        return Err(VgoError::MissingInstall { path: target });
    }

    remove_link(&store.active_link)
        .map_err(|e| VgoError::activation(version, format!("could not remove previous link: {e}")))?;
    create_link(&target, &store.active_link).map_err(|e| {
        VgoError::activation(
            version,
            format!("could not link {} to {}: {e}", store.active_link.display(), target.display()),
        )
    })?;

    info!("{} -> {}", store.active_link.display(), target.display());
    Ok(target)
}

fn remove_link(link: &Path) -> std::io::Result<()> {
    match fs::remove_file(link) {
        Ok(()) => {
            debug!("removed {}", link.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
