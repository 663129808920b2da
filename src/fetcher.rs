//! Retrieval of toolchain archives.
//!
//! A [`Fetcher`] turns a (version, target) pair into a byte stream. The HTTP
//! implementation never touches the disk. It reads the whole body into memory
//! before handing it to the installer, so a connection that drops mid-body is
//! a fetch failure and never an extraction failure.

use std::io::{Cursor, Read};
use std::time::Duration;
use reqwest::blocking::Client;
use tracing::debug;
use crate::error::{Result, VgoError};
use crate::platform::Target;

/// Fixed timeout for a whole archive download.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Source of compressed toolchain distributions.
pub trait Fetcher {
    /// Returns the archive for `version` built for `target` as a byte stream.
    fn fetch(&self, version: &str, target: Target) -> Result<Box<dyn Read + Send>>;
}

/// Fills a URL template: `{version}`, `{platform}` and `{arch}` are replaced verbatim.
pub fn download_url(template: &str, version: &str, target: Target) -> String {
    template
        .replace("{version}", version)
        .replace("{platform}", target.platform.as_str())
        .replace("{arch}", target.arch.as_str())
}

/// Downloads archives over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url_template: String,
}

impl HttpFetcher {
    /// Creates a fetcher for the given URL template.
    ///
    /// # Errors
    /// Returns `Fetch` if the HTTP client can't be built (e.g. no TLS backend).
    pub fn new(url_template: impl Into<String>) -> Result<Self> {
        let url_template = url_template.into();
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("vgo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VgoError::Fetch {
                url: url_template.clone(),
                message: "could not create HTTP client".to_string(),
                source: Some(e),
            })?;
        Ok(Self {
            client,
            url_template,
        })
    }

    pub fn url_for(&self, version: &str, target: Target) -> String {
        download_url(&self.url_template, version, target)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, version: &str, target: Target) -> Result<Box<dyn Read + Send>> {
        let url = self.url_for(version, target);
        debug!("downloading {}", url);
        let response = self.client.get(&url).send().map_err(|e| VgoError::Fetch {
            url: url.clone(),
            message: if e.is_timeout() {
                "request timed out".to_string()
            } else {
                "request failed".to_string()
            },
            source: Some(e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(VgoError::Fetch {
                url,
                message: format!("server responded with HTTP {status}"),
                source: None,
            });
        }
        let body = response.bytes().map_err(|e| VgoError::Fetch {
            url: url.clone(),
            message: if e.is_timeout() {
                "download timed out".to_string()
            } else {
                "download interrupted".to_string()
            },
            source: Some(e),
        })?;
        debug!("downloaded {} bytes", body.len());
        Ok(Box::new(Cursor::new(body)))
    }
}
