use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::error::{Result, VgoError};
use crate::store::Store;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "VGO_CONFIG";

pub const DEFAULT_INSTALL_ROOT: &str = "/usr/local/go";
pub const DEFAULT_PREFIX: &str = "go";
pub const DEFAULT_DOWNLOAD_URL: &str = "https://go.dev/dl/go{version}.{platform}-{arch}.tar.gz";
pub const DEFAULT_BINARY: &str = "go";
/// Default scratch directory name inside the install root.
pub const STAGING_DIR: &str = ".vgo-tmp";

/// Represents the contents of a `vgo.toml` file.
///
/// Every key is optional; missing keys fall back to the layout used by the
/// official Go installer (`/usr/local/go`).
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the version directories.
    pub install_root: Option<PathBuf>,
    /// Path of the active symlink. Defaults to `<install_root>/active`.
    pub active_link: Option<PathBuf>,
    /// Prefix of each version directory name.
    pub dir_prefix: Option<String>,
    /// Where staging directories are created. Defaults to `<install_root>/.vgo-tmp`,
    /// which keeps the final rename on one filesystem.
    pub scratch_dir: Option<PathBuf>,
    /// Download URL with `{version}`, `{platform}` and `{arch}` placeholders.
    pub download_url: Option<String>,
    /// Toolchain binary run after activation to confirm it works.
    pub binary: Option<String>,
}

impl Config {
    /// Loads the configuration.
    ///
    /// Uses the file named by `VGO_CONFIG` if set (it must exist), otherwise
    /// `vgo.toml` in the user's config directory if present, otherwise defaults.
    ///
    /// # Errors
    /// Returns an error if the chosen file can't be read or deserialized.
    pub fn load() -> Result<Config> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(PathBuf::from(path));
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(path),
            _ => {
                debug!("no configuration file, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Loads a `Config` from a file path.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or deserialized.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        debug!("loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| VgoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| VgoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Saves the `Config` to the given file path in pretty TOML format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| VgoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)
            .map_err(|e| VgoError::io(format!("write {}", path.display()), e))
    }

    /// Builds the [`Store`] described by this configuration.
    pub fn store(&self) -> Store {
        let root = self
            .install_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INSTALL_ROOT));
        let scratch_dir = self
            .scratch_dir
            .clone()
            .unwrap_or_else(|| root.join(STAGING_DIR));
        let mut store = Store::new(root, scratch_dir);
        if let Some(link) = &self.active_link {
            store.active_link = link.clone();
        }
        store.prefix = self
            .dir_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        store
    }

    pub fn download_url(&self) -> &str {
        self.download_url.as_deref().unwrap_or(DEFAULT_DOWNLOAD_URL)
    }

    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(DEFAULT_BINARY)
    }
}

/// `vgo.toml` inside the platform config directory, e.g. `~/.config/vgo/vgo.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "vgo", "vgo").map(|dirs| dirs.config_dir().join("vgo.toml"))
}
