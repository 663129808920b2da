use std::fs;
use tracing::debug;
use crate::error::{Result, VgoError};
use crate::store::Store;

/// Lists the installed versions by scanning the install root.
///
/// Versions come back in the filesystem's directory order; nothing is sorted.
/// The active link is skipped (it is a symlink, and its name is reserved), as
/// are hidden entries such as the default scratch directory and anything that
/// is not a directory carrying the store's prefix.
///
/// # Errors
///
/// Returns `Registry` if the install root can't be read. An unreadable root
/// means "versions unknown", never "no versions", so callers must propagate it.
pub fn list_versions(store: &Store) -> Result<Vec<String>> {
    let registry_error = |e| VgoError::Registry {
        root: store.root.clone(),
        source: e,
    };
    let reserved = store.active_entry_name();
    let mut versions = Vec::new();

    for entry in fs::read_dir(&store.root).map_err(registry_error)? {
        let entry = entry.map_err(registry_error)?;
        // `file_type` does not follow symlinks, so the active link never counts.
        let file_type = entry.file_type().map_err(registry_error)?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!("skipping non UTF-8 entry {:?}", name);
            continue;
        };
        if Some(name) == reserved || name.starts_with('.') {
            continue;
        }
        match store.version_from_dir_name(name) {
            Some(version) if !version.is_empty() => versions.push(version.to_string()),
            _ => debug!("skipping {} without the {} prefix", name, store.prefix),
        }
    }
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, Store) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(&root).unwrap();
        let store = Store::new(root, dir.path().join("scratch"));
        (dir, store)
    }

    #[test]
    fn test_empty_root_lists_nothing() {
        let (_dir, store) = setup();
        assert!(list_versions(&store).unwrap().is_empty());
    }

    #[test]
    fn test_lists_prefixed_directories() {
        let (_dir, store) = setup();
        fs::create_dir(store.version_dir("1.21.0")).unwrap();
        fs::create_dir(store.version_dir("1.22.0")).unwrap();
        fs::write(store.root.join("go1.23.0.tar.gz"), "").unwrap();
        fs::create_dir(store.root.join("misc")).unwrap();
        fs::create_dir(store.root.join(".vgo-tmp")).unwrap();

        let mut versions = list_versions(&store).unwrap();
        versions.sort();
        assert_eq!(versions, vec!["1.21.0", "1.22.0"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_active_link_excluded() {
        let (_dir, store) = setup();
        fs::create_dir(store.version_dir("1.21.0")).unwrap();
        std::os::unix::fs::symlink(store.version_dir("1.21.0"), &store.active_link).unwrap();

        assert_eq!(list_versions(&store).unwrap(), vec!["1.21.0"]);
    }

    #[test]
    fn test_missing_root_is_error_not_empty() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("absent"), dir.path().to_path_buf());

        let err = list_versions(&store).unwrap_err();
        assert!(matches!(err, VgoError::Registry { .. }));
    }
}
