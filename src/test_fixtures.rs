//! Test fixtures for building throwaway bundles.
//!
//! ```ignore
//! let fixture = BundleFixture::new()
//!     .with_env_builder("virtualenv-16.7.9")
//!     .with_app("awscli-1.18.0.tar.gz")
//!     .with_setup("setuptools_scm-1.15.7.tar.gz");
//! let config = fixture.config();
//! ```

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use crate::bundle::{PackagesDir, SETUP_DIR};
use crate::config::InstallConfig;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Write a gzip'd tar holding `files` (path, content) to `path`.
///
/// # Panics
///
/// Panics on any IO failure.
pub fn write_tar_gz(path: &Path, files: &[(&str, &str)]) {
    let file = File::create(path).expect("Failed to create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .expect("Failed to append archive entry");
    }
    builder
        .into_inner()
        .expect("Failed to finish tar stream")
        .finish()
        .expect("Failed to finish gzip stream");
}

/// A bundle laid out in a temp directory: `packages/`, `work/`, `install/`
pub struct BundleFixture {
    pub temp: TempDir,
}

impl BundleFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp = create_temp_dir();
        fs::create_dir_all(temp.path().join("packages")).expect("Failed to create packages");
        fs::create_dir_all(temp.path().join("work")).expect("Failed to create work dir");
        Self { temp }
    }

    pub fn packages_path(&self) -> PathBuf {
        self.temp.path().join("packages")
    }

    pub fn packages(&self) -> PackagesDir {
        PackagesDir::open(self.packages_path()).expect("Failed to open packages dir")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    pub fn install_dir(&self) -> PathBuf {
        self.temp.path().join("install")
    }

    /// Add `<stem>.tar.gz` wrapping a `<stem>/virtualenv.py`
    #[must_use]
    pub fn with_env_builder(self, stem: &str) -> Self {
        let archive = self.packages_path().join(format!("{stem}.tar.gz"));
        let script = format!("{stem}/virtualenv.py");
        write_tar_gz(&archive, &[(script.as_str(), "# environment builder\n")]);
        self
    }

    /// Add an (empty) application archive
    #[must_use]
    pub fn with_app(self, name: &str) -> Self {
        fs::write(self.packages_path().join(name), b"").expect("Failed to write app archive");
        self
    }

    /// Add an (empty) setup prerequisite archive
    #[must_use]
    pub fn with_setup(self, name: &str) -> Self {
        let dir = self.packages_path().join(SETUP_DIR);
        fs::create_dir_all(&dir).expect("Failed to create setup dir");
        fs::write(dir.join(name), b"").expect("Failed to write setup archive");
        self
    }

    /// Config pointing every path into the fixture
    pub fn config(&self) -> InstallConfig {
        InstallConfig {
            packages_dir: self.packages_path(),
            install_dir: self.install_dir(),
            bin_location: None,
            python: PathBuf::from("/usr/bin/python3"),
        }
    }
}

impl Default for BundleFixture {
    fn default() -> Self {
        Self::new()
    }
}
