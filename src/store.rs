use std::path::{Path, PathBuf};

/// On-disk layout shared by every vgo component.
///
/// The filesystem is the only shared state between invocations; this value
/// just says where it lives, so tests can point it at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Directory holding one `<prefix><version>` subdirectory per installed version.
    pub root: PathBuf,
    /// Symlink pointing at the active version directory.
    pub active_link: PathBuf,
    /// Prefix of every version directory name, e.g. `go` in `go1.21.0`.
    pub prefix: String,
    /// Directory in which staging directories are created during installs.
    pub scratch_dir: PathBuf,
}

impl Store {
    /// Store with the active link at `<root>/active` and the `go` prefix.
    pub fn new<P: AsRef<Path>>(root: P, scratch_dir: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            active_link: root.join("active"),
            root,
            prefix: String::from("go"),
            scratch_dir: scratch_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory name of a version inside the install root.
    pub fn dir_name(&self, version: &str) -> String {
        format!("{}{}", self.prefix, version)
    }

    /// Full path of a version's install directory.
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.root.join(self.dir_name(version))
    }

    /// Recovers the version from a version directory name, if it has the prefix.
    pub fn version_from_dir_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_prefix(self.prefix.as_str())
    }

    /// Name of the active link's entry when it lives inside the install root.
    pub fn active_entry_name(&self) -> Option<&str> {
        if self.active_link.parent() != Some(self.root.as_path()) {
            return None;
        }
        self.active_link.file_name().and_then(|n| n.to_str())
    }

    /// `bin` directory reached through the active link.
    pub fn active_bin_dir(&self) -> PathBuf {
        self.active_link.join("bin")
    }
}
