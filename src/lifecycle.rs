//! The version lifecycle: Absent -> Installed -> Active, and back.
//!
//! [`Lifecycle`] composes the fetcher, installer, registry and activation
//! manager into the four public operations and enforces the transition
//! guards:
//!
//! - a version is downloaded only if it is not installed yet,
//! - a version is activated only if it is installed,
//! - the active version is never deleted.
//!
//! There is no locking. Concurrent invocations stay individually safe thanks
//! to random staging names and the atomic rename in the installer, and the
//! registry checks catch (but do not prevent) races.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info, warn};
use crate::activation;
use crate::error::{Result, VgoError};
use crate::fetcher::Fetcher;
use crate::installer::{Installer, RandomNamer, StagingNamer};
use crate::platform::Target;
use crate::registry;
use crate::store::Store;

/// Snapshot of the install root for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Installed versions in directory order.
    pub versions: Vec<String>,
    /// Version the active link points at, if any.
    pub active: Option<String>,
    /// The active link exists but its target is gone.
    pub dangling: bool,
}

/// Outcome of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activated {
    pub version: String,
    /// Install directory behind the active link.
    pub path: PathBuf,
    /// What the toolchain printed when asked for its version.
    pub report: String,
}

/// Orchestrates the lifecycle operations over one [`Store`].
pub struct Lifecycle<F: Fetcher, N: StagingNamer = RandomNamer> {
    store: Store,
    fetcher: F,
    installer: Installer<N>,
    binary: String,
}

impl<F: Fetcher> Lifecycle<F, RandomNamer> {
    pub fn new(store: Store, fetcher: F) -> Self {
        Self::with_installer(store, fetcher, Installer::new())
    }
}

impl<F: Fetcher, N: StagingNamer> Lifecycle<F, N> {
    pub fn with_installer(store: Store, fetcher: F, installer: Installer<N>) -> Self {
        Self {
            store,
            fetcher,
            installer,
            binary: crate::config::DEFAULT_BINARY.to_string(),
        }
    }

    /// Sets the toolchain binary used to confirm an activation (`go` by default).
    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Absent -> Installed.
    ///
    /// The target is validated before anything else, so an unsupported
    /// platform never reaches the registry or the network.
    ///
    /// # Errors
    ///
    /// `UnsupportedTarget`, `UnknownVersion` (malformed version string),
    /// `Registry`, `AlreadyExists`, `Fetch`, `Extract`, `Install`, `Io`.
    pub fn download(&mut self, version: &str, platform: &str, arch: &str) -> Result<PathBuf> {
        let target = Target::parse(platform, arch)?;
        validate_version(version)?;

        let installed = registry::list_versions(&self.store)?;
        if installed.iter().any(|v| v == version) {
            return Err(VgoError::AlreadyExists {
                version: version.to_string(),
                installed,
            });
        }

        info!("downloading go {} for {}", version, target);
        let stream = self.fetcher.fetch(version, target)?;
        self.installer.install(&self.store, stream, version)
    }

    /// Installed versions in directory order.
    pub fn list(&self) -> Result<Vec<String>> {
        registry::list_versions(&self.store)
    }

    /// Installed versions plus the active one, for display.
    pub fn listing(&self) -> Result<Listing> {
        let versions = registry::list_versions(&self.store)?;
        let active = activation::active_version(&self.store)?;
        let dangling = activation::is_dangling(&self.store);
        if dangling {
            warn!(
                "active link {} points to a missing directory",
                self.store.active_link.display()
            );
        }
        Ok(Listing {
            versions,
            active,
            dangling,
        })
    }

    pub fn current_active(&self) -> Result<String> {
        activation::current_active(&self.store)
    }

    /// Installed -> Active. The previously active version, if any, goes back
    /// to Installed and stays on disk.
    ///
    /// After the link is in place the toolchain is asked for its version; a
    /// toolchain that can't answer fails the activation but the link stays.
    pub fn activate(&mut self, version: &str) -> Result<Activated> {
        let path = activation::activate(&self.store, version)?;
        let report = self.version_report(version)?;
        Ok(Activated {
            version: version.to_string(),
            path,
            report,
        })
    }

    /// Installed -> Absent.
    ///
    /// # Errors
    ///
    /// - `ActiveVersionDeletion` if `version` is the active version
    /// - `Registry` / `UnknownVersion` if it is not installed
    /// - `Io` if the directory can't be removed
    pub fn delete(&mut self, version: &str) -> Result<()> {
        if activation::active_version(&self.store)?.as_deref() == Some(version) {
            return Err(VgoError::ActiveVersionDeletion {
                version: version.to_string(),
            });
        }

        let installed = registry::list_versions(&self.store)?;
        if !installed.iter().any(|v| v == version) {
            return Err(VgoError::UnknownVersion {
                version: version.to_string(),
                installed,
            });
        }

        let dir = self.store.version_dir(version);
        fs::remove_dir_all(&dir)
            .map_err(|e| VgoError::io(format!("delete directory {}", dir.display()), e))?;
        info!("deleted {}", dir.display());
        Ok(())
    }

    /// Runs `<active link>/bin/<binary> version` through the link itself.
    fn version_report(&self, version: &str) -> Result<String> {
        let program = self.store.active_bin_dir().join(&self.binary);
        debug!("running {} version", program.display());
        let output = Command::new(&program)
            .arg("version")
            .output()
            .map_err(|e| {
                VgoError::activation(version, format!("failed to execute {}: {e}", program.display()))
            })?;
        if !output.status.success() {
            return Err(VgoError::activation(
                version,
                format!(
                    "{} version exited with {}: {}",
                    program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// A version is a single path component; anything else can't name a directory.
fn validate_version(version: &str) -> Result<()> {
    let malformed = version.is_empty()
        || version == "."
        || version == ".."
        || version.contains(['/', '\\']);
    if malformed {
        return Err(VgoError::UnknownVersion {
            version: version.to_string(),
            installed: Vec::new(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Read;
    use crate::installer::tests::tar_gz;
    use tempfile::{tempdir, TempDir};

    struct StubFetcher {
        calls: RefCell<Vec<(String, Target)>>,
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, version: &str, target: Target) -> Result<Box<dyn Read + Send>> {
            self.calls.borrow_mut().push((version.to_string(), target));
            let script = format!("#!/bin/sh\necho go version go{version} {target}\n");
            Ok(Box::new(std::io::Cursor::new(tar_gz(&[("go/bin/go", script.as_str())]))))
        }
    }

    fn setup() -> (TempDir, Lifecycle<StubFetcher>) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(&root).unwrap();
        let store = Store::new(root, dir.path().join("scratch"));
        let fetcher = StubFetcher {
            calls: RefCell::new(Vec::new()),
        };
        (dir, Lifecycle::new(store, fetcher))
    }

    #[test]
    fn test_windows_rejected_before_fetch() {
        let (_dir, mut lifecycle) = setup();
        let err = lifecycle.download("1.21.0", "windows", "amd64").unwrap_err();

        assert!(matches!(err, VgoError::UnsupportedTarget { .. }));
        assert!(lifecycle.fetcher().calls.borrow().is_empty());
    }

    #[test]
    fn test_malformed_version_rejected_before_fetch() {
        let (_dir, mut lifecycle) = setup();
        for version in ["", "..", "1.21/../../etc"] {
            let err = lifecycle.download(version, "linux", "amd64").unwrap_err();
            assert!(matches!(err, VgoError::UnknownVersion { .. }));
        }
        assert!(lifecycle.fetcher().calls.borrow().is_empty());
    }

    #[test]
    fn test_download_passes_target_to_fetcher() {
        let (_dir, mut lifecycle) = setup();
        lifecycle.download("1.21.0", "linux", "amd64").unwrap();

        let calls = lifecycle.fetcher().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "1.21.0");
        assert_eq!(calls[0].1.to_string(), "linux-amd64");
    }

    #[test]
    fn test_duplicate_download_does_not_fetch() {
        let (_dir, mut lifecycle) = setup();
        lifecycle.download("1.21.0", "darwin", "arm64").unwrap();
        let err = lifecycle.download("1.21.0", "darwin", "arm64").unwrap_err();

        assert!(matches!(err, VgoError::AlreadyExists { .. }));
        assert_eq!(lifecycle.fetcher().calls.borrow().len(), 1);
    }

    #[test]
    fn test_delete_unknown_version() {
        let (_dir, mut lifecycle) = setup();
        let err = lifecycle.delete("1.21.0").unwrap_err();
        assert!(matches!(err, VgoError::UnknownVersion { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_activate_reports_toolchain_version() {
        let (_dir, mut lifecycle) = setup();
        lifecycle.download("1.21.0", "darwin", "arm64").unwrap();

        let activated = lifecycle.activate("1.21.0").unwrap();
        assert_eq!(activated.report, "go version go1.21.0 darwin-arm64");
        assert_eq!(activated.path, lifecycle.store().version_dir("1.21.0"));
    }

    #[cfg(unix)]
    #[test]
    fn test_activate_broken_toolchain_keeps_link() {
        let (_dir, mut lifecycle) = setup();
        fs::create_dir_all(lifecycle.store().version_dir("1.20.0")).unwrap();

        let err = lifecycle.activate("1.20.0").unwrap_err();
        assert!(matches!(err, VgoError::Activation { .. }));
        assert_eq!(lifecycle.current_active().unwrap(), "1.20.0");
    }

    #[cfg(unix)]
    #[test]
    fn test_listing_marks_active_and_dangling() {
        let (_dir, mut lifecycle) = setup();
        lifecycle.download("1.21.0", "darwin", "arm64").unwrap();
        lifecycle.activate("1.21.0").unwrap();

        let listing = lifecycle.listing().unwrap();
        assert_eq!(listing.versions, vec!["1.21.0"]);
        assert_eq!(listing.active.as_deref(), Some("1.21.0"));
        assert!(!listing.dangling);

        fs::remove_dir_all(lifecycle.store().version_dir("1.21.0")).unwrap();
        let listing = lifecycle.listing().unwrap();
        assert!(listing.versions.is_empty());
        assert!(listing.dangling);
    }
}
