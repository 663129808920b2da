//! Extraction of fetched archives into the install root.
//!
//! An archive is unpacked into a freshly created staging directory under the
//! scratch dir, then its single top-level directory is renamed to
//! `<root>/<prefix><version>`. The rename is the only step visible in the
//! install root, so a version directory is either complete or absent.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use flate2::read::GzDecoder;
use rand::Rng;
use tar::Archive;
use tracing::{debug, info, warn};
use crate::error::{Result, VgoError};
use crate::store::Store;

const STAGING_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const STAGING_NAME_LEN: usize = 8;

/// Produces names for staging directories.
pub trait StagingNamer {
    fn staging_name(&mut self) -> String;
}

/// `vgo-` followed by eight random ASCII letters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNamer;

impl StagingNamer for RandomNamer {
    fn staging_name(&mut self) -> String {
        let mut rng = rand::rng();
        let suffix: String = (0..STAGING_NAME_LEN)
            .map(|_| STAGING_LETTERS[rng.random_range(0..STAGING_LETTERS.len())] as char)
            .collect();
        format!("vgo-{suffix}")
    }
}

/// Installs toolchain archives into a [`Store`].
#[derive(Debug)]
pub struct Installer<N: StagingNamer = RandomNamer> {
    namer: N,
}

impl Installer<RandomNamer> {
    pub fn new() -> Self {
        Self { namer: RandomNamer }
    }
}

impl Default for Installer<RandomNamer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: StagingNamer> Installer<N> {
    pub fn with_namer(namer: N) -> Self {
        Self { namer }
    }

    /// Extracts a gzip-compressed tarball and moves its toolchain directory
    /// to `<root>/<prefix><version>`.
    ///
    /// Returns the path of the new version directory.
    ///
    /// # Errors
    ///
    /// - `Extract` if the stream is not a tar.gz with a single top-level directory
    /// - `Install` if the rename into the install root fails
    /// - `Io` if the staging directory can't be created
    pub fn install<R: Read>(&mut self, store: &Store, stream: R, version: &str) -> Result<PathBuf> {
        let staging = self.create_staging(store)?;
        debug!("extracting {} into {}", version, staging.display());

        let result = unpack(stream, &staging)
            .and_then(|()| toolchain_dir(&staging))
            .and_then(|extracted| {
                let dest = store.version_dir(version);
                fs::rename(&extracted, &dest).map_err(|e| VgoError::Install {
                    version: version.to_string(),
                    dest: dest.clone(),
                    source: e,
                })?;
                Ok(dest)
            });

        if let Err(e) = fs::remove_dir_all(&staging) {
            warn!("could not remove staging directory {}: {}", staging.display(), e);
        }

        let dest = result?;
        info!("installed {} at {}", version, dest.display());
        Ok(dest)
    }

    fn create_staging(&mut self, store: &Store) -> Result<PathBuf> {
        fs::create_dir_all(&store.scratch_dir).map_err(|e| {
            VgoError::io(format!("create scratch directory {}", store.scratch_dir.display()), e)
        })?;
        let staging = store.scratch_dir.join(self.namer.staging_name());
        // `create_dir` fails on an existing path, so two installs never share a staging dir.
        fs::create_dir(&staging).map_err(|e| {
            VgoError::io(format!("create staging directory {}", staging.display()), e)
        })?;
        Ok(staging)
    }
}

/// Unpacks every entry of a tar.gz stream below `dest`.
fn unpack<R: Read>(stream: R, dest: &Path) -> Result<()> {
    let mut archive = Archive::new(GzDecoder::new(stream));
    let entries = archive
        .entries()
        .map_err(|e| VgoError::extract(e.to_string()))?;
    let mut count = 0usize;
    for entry in entries {
        let mut entry = entry.map_err(|e| VgoError::extract(e.to_string()))?;
        // `unpack_in` refuses entries that would land outside `dest`.
        entry
            .unpack_in(dest)
            .map_err(|e| VgoError::extract(e.to_string()))?;
        count += 1;
    }
    if count == 0 {
        return Err(VgoError::extract("archive is empty"));
    }
    debug!("unpacked {} entries", count);
    Ok(())
}

/// Finds the archive's single top-level directory inside the staging path.
fn toolchain_dir(staging: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(staging)
        .map_err(|e| VgoError::io(format!("read staging directory {}", staging.display()), e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| VgoError::io(format!("read staging directory {}", staging.display()), e))?;

    match entries.as_slice() {
        [entry] if entry.path().is_dir() => Ok(entry.path()),
        [entry] => Err(VgoError::extract(format!(
            "top-level entry {} is not a directory",
            entry.file_name().to_string_lossy()
        ))),
        _ => Err(VgoError::extract(format!(
            "expected a single top-level directory, found {} entries",
            entries.len()
        ))),
    }
}
