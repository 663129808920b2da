//! Error types for vgo.
//!
//! Every lifecycle operation returns [`Result`]. The binary turns an error into
//! a message on stderr and a non-zero exit code; nothing in the library exits
//! the process or retries.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`VgoError`].
pub type Result<T> = std::result::Result<T, VgoError>;

/// Everything that can go wrong while managing toolchain versions.
#[derive(Debug, Error)]
pub enum VgoError {
    /// The archive could not be retrieved (transport error, timeout, HTTP status).
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The fetched stream is not a usable toolchain archive.
    #[error("failed to extract archive: {reason}")]
    Extract { reason: String },

    /// Platform or architecture outside the supported enumerations.
    #[error("{message}")]
    UnsupportedTarget { message: String },

    /// The version is already present in the install root.
    #[error("version already exists: {version} (installed: {})", .installed.join(", "))]
    AlreadyExists {
        version: String,
        installed: Vec<String>,
    },

    /// The version is not in the registry.
    #[error("unknown go version: {version}. Installed versions are: {}", .installed.join("/"))]
    UnknownVersion {
        version: String,
        installed: Vec<String>,
    },

    /// The registry lists the version but its directory is gone.
    #[error("go path not found: {}", .path.display())]
    MissingInstall { path: PathBuf },

    /// Refused to delete the version the active link points at.
    #[error("cannot delete active version {version}")]
    ActiveVersionDeletion { version: String },

    /// The active link is absent or unreadable.
    #[error("no active go version: {}", .link.display())]
    NoActiveVersion {
        link: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The active link could not be (re)created or does not resolve to a working toolchain.
    #[error("failed to activate {version}: {message}")]
    Activation { version: String, message: String },

    /// The install root could not be enumerated.
    #[error("unable to list versions in {}", .root.display())]
    Registry {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extracted toolchain could not be moved into the install root.
    #[error("failed to install {version} into {}", .dest.display())]
    Install {
        version: String,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure.
    #[error("failed to {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unreadable configuration file.
    #[error("configuration error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl VgoError {
    /// Creates an `Io` error describing the failed operation.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Creates an `Extract` error.
    pub fn extract(reason: impl Into<String>) -> Self {
        Self::Extract {
            reason: reason.into(),
        }
    }

    /// Creates an `UnsupportedTarget` error.
    pub fn unsupported_target(message: impl Into<String>) -> Self {
        Self::UnsupportedTarget {
            message: message.into(),
        }
    }

    /// Creates an `Activation` error.
    pub fn activation(version: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Activation {
            version: version.into(),
            message: message.into(),
        }
    }

    /// True when the error only means "nothing is active".
    pub fn is_no_active_version(&self) -> bool {
        matches!(self, Self::NoActiveVersion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_version_lists_installed() {
        let err = VgoError::UnknownVersion {
            version: "1.9".to_string(),
            installed: vec!["1.21.0".to_string(), "1.22.0".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown go version: 1.9. Installed versions are: 1.21.0/1.22.0"
        );
    }

    #[test]
    fn already_exists_displays_version() {
        let err = VgoError::AlreadyExists {
            version: "1.21.0".to_string(),
            installed: vec!["1.21.0".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "version already exists: 1.21.0 (installed: 1.21.0)"
        );
    }

    #[test]
    fn missing_install_displays_path() {
        let err = VgoError::MissingInstall {
            path: PathBuf::from("/usr/local/go/go1.21.0"),
        };
        assert_eq!(err.to_string(), "go path not found: /usr/local/go/go1.21.0");
    }

    #[test]
    fn active_version_deletion_is_short() {
        let err = VgoError::ActiveVersionDeletion {
            version: "1.21.0".to_string(),
        };
        assert_eq!(err.to_string(), "cannot delete active version 1.21.0");
    }

    #[test]
    fn no_active_version_is_recoverable() {
        let err = VgoError::NoActiveVersion {
            link: PathBuf::from("/usr/local/go/active"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_no_active_version());
        assert!(!VgoError::extract("bad gzip header").is_no_active_version());
    }
}
