//! Bundle layout: the packages directory shipped next to the installer
//!
//! ```text
//! packages/
//!   virtualenv-<version>.tar.gz   environment builder, exactly one
//!   awscli-<version>.tar.gz       application, exactly one
//!   <dependency archives>         resolved through --find-links
//!   setup/                        setup-time prerequisites, zero or more
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BundleError, Result, io_context};

/// File name prefix of the environment-builder archive
pub const ENV_BUILDER_PREFIX: &str = "virtualenv";

/// File name prefix of the application archive
pub const APP_PREFIX: &str = "awscli";

/// Subdirectory holding setup-time prerequisite archives
pub const SETUP_DIR: &str = "setup";

/// A validated packages directory
#[derive(Debug, Clone)]
pub struct PackagesDir {
    root: PathBuf,
}

impl PackagesDir {
    /// Open the packages directory at `root`, which must exist
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(BundleError::PackagesDirNotFound {
                path: root.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn setup_dir(&self) -> PathBuf {
        self.root.join(SETUP_DIR)
    }

    /// The single environment-builder archive
    pub fn env_builder_archive(&self) -> Result<PathBuf> {
        let mut found = archive_names(&self.root, ENV_BUILDER_PREFIX)?;
        match found.len() {
            0 => Err(self.not_found(ENV_BUILDER_PREFIX)),
            1 => Ok(self.root.join(found.remove(0))),
            _ => Err(BundleError::AmbiguousArchive {
                prefix: ENV_BUILDER_PREFIX.to_string(),
                dir: self.root.display().to_string(),
                candidates: found.join(", "),
            }),
        }
    }

    /// The single application archive
    pub fn app_archive(&self) -> Result<PathBuf> {
        let mut found = archive_names(&self.root, APP_PREFIX)?;
        match found.len() {
            0 => Err(self.not_found(APP_PREFIX)),
            1 => Ok(self.root.join(found.remove(0))),
            _ => Err(BundleError::MultipleBundles {
                dir: self.root.display().to_string(),
            }),
        }
    }

    /// Setup-time prerequisite archives in install order.
    ///
    /// A missing `setup/` directory means there are none.
    pub fn setup_archives(&self) -> Result<Vec<PathBuf>> {
        let dir = self.setup_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        Ok(archive_names(&dir, "")?
            .into_iter()
            .map(|name| dir.join(name))
            .collect())
    }

    fn not_found(&self, prefix: &str) -> BundleError {
        BundleError::BundleNotFound {
            prefix: prefix.to_string(),
            dir: self.root.display().to_string(),
        }
    }
}

/// Sorted names of regular files in `dir` starting with `prefix`
fn archive_names(dir: &Path, prefix: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| io_context("read", dir, &e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_context("read", dir, &e))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
