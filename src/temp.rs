//! Scoped working directory for transient extraction work.
//!
//! The directory lives under an absolute temp base, so it is never created
//! under the current working directory (e.g. when TMPDIR=tmp or TMPDIR=./tmp).

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, io_context};

const WORKING_DIR_PREFIX: &str = "awscli-bundle-";

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// A private temporary directory removed when the value is dropped.
///
/// Removal happens on every exit path that unwinds through the owner:
/// normal return, early `?` return, or panic. A forcibly killed process
/// leaves it behind.
#[derive(Debug)]
pub struct WorkingDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl WorkingDir {
    /// Create a fresh, uniquely named working directory under `base`
    pub fn create_in(base: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKING_DIR_PREFIX)
            .tempdir_in(base)
            .map_err(|e| io_context("create working directory in", base, &e))?;
        let path = dir.path().to_path_buf();
        tracing::debug!(path = %path.display(), "created working directory");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    /// Absolute path of the working directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and hand back `outcome` unchanged.
    ///
    /// A removal failure is logged at `warn`; it never replaces the result
    /// of the work done inside the directory.
    pub fn finish<T>(self, outcome: Result<T>) -> Result<T> {
        let path = self.path.clone();
        keep_outcome(outcome, self.close(), &path)
    }

    /// Remove the directory now, reporting any failure
    pub fn close(mut self) -> Result<()> {
        if let Some(dir) = self.dir.take() {
            dir.close()
                .map_err(|e| io_context("remove working directory", &self.path, &e))?;
            tracing::debug!(path = %self.path.display(), "removed working directory");
        }
        Ok(())
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove working directory"
                );
            }
        }
    }
}

fn keep_outcome<T>(outcome: Result<T>, cleanup: Result<()>, path: &Path) -> Result<T> {
    if let Err(e) = cleanup {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "failed to remove working directory"
        );
    }
    outcome
}
