//! Common test utilities for installer integration tests
//!
//! A [`TestBundle`] lays out an unpacked bundle in a temp directory:
//!
//! ```text
//! <temp>/packages/             bundled archives
//! <temp>/tmp/                  TMPDIR for the installer process
//! <temp>/home/                 HOME for the installer process
//! ```
//!
//! The environment builder archive carries a `virtualenv.py` that is really a
//! POSIX shell script; running the installer with `--python /bin/sh` makes it
//! create `bin/pip`, a fake package manager that logs every archive it is
//! asked to install to `<install_dir>/pip.log` and writes `bin/aws` when it
//! installs the application archive. Archives whose name contains `broken`
//! fail to install.

#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

pub const SHELL: &str = "/bin/sh";

const FAKE_VIRTUALENV: &str = r#"# virtualenv stand-in, run by /bin/sh
for target; do :; done
mkdir -p "$target/bin"
cat > "$target/bin/pip" <<'PIP'
#!/bin/sh
for last; do :; done
bin_dir=$(dirname "$0")
echo "$(basename "$last")" >> "$bin_dir/../pip.log"
case "$last" in
  *broken*)
    echo "error: cannot build $last" >&2
    exit 1
    ;;
  */awscli-*)
    printf '#!/bin/sh\necho aws-cli/1.18.0\n' > "$bin_dir/aws"
    chmod +x "$bin_dir/aws"
    ;;
esac
PIP
chmod +x "$target/bin/pip"
"#;

/// An unpacked bundle for integration tests
pub struct TestBundle {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to the temp root
    pub path: PathBuf,
}

impl TestBundle {
    /// Create an empty bundle with `packages/`, `tmp/` and `home/`
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        for dir in ["packages", "tmp", "home"] {
            fs::create_dir_all(path.join(dir)).expect("Failed to create directory");
        }
        Self { temp, path }
    }

    /// A bundle with the environment builder, one app archive and one setup archive
    pub fn complete() -> Self {
        let bundle = Self::new();
        bundle.add_env_builder("virtualenv-16.7.9");
        bundle.add_package("awscli-1.18.0.tar.gz");
        bundle.add_package("botocore-1.15.0.tar.gz");
        bundle.add_setup("setuptools_scm-1.15.7.tar.gz");
        bundle
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.path.join("packages")
    }

    pub fn tmp_dir(&self) -> PathBuf {
        self.path.join("tmp")
    }

    pub fn home_dir(&self) -> PathBuf {
        self.path.join("home")
    }

    pub fn install_dir(&self) -> PathBuf {
        self.path.join("install")
    }

    /// Add `<stem>.tar.gz` containing `<stem>/virtualenv.py`
    pub fn add_env_builder(&self, stem: &str) {
        let archive = self.packages_dir().join(format!("{stem}.tar.gz"));
        let file = File::create(&archive).expect("Failed to create archive");
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

        let mut header = tar::Header::new_gnu();
        header.set_size(FAKE_VIRTUALENV.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(
                &mut header,
                format!("{stem}/virtualenv.py"),
                FAKE_VIRTUALENV.as_bytes(),
            )
            .expect("Failed to append entry");

        builder
            .into_inner()
            .expect("Failed to finish tar")
            .finish()
            .expect("Failed to finish gzip");
    }

    /// Add an archive to the packages directory
    pub fn add_package(&self, name: &str) {
        fs::write(self.packages_dir().join(name), b"").expect("Failed to write package");
    }

    /// Add an archive to `packages/setup/`
    pub fn add_setup(&self, name: &str) {
        let setup = self.packages_dir().join("setup");
        fs::create_dir_all(&setup).expect("Failed to create setup dir");
        fs::write(setup.join(name), b"").expect("Failed to write setup package");
    }

    /// Archives the fake pip was asked to install, in order
    pub fn pip_log(&self, install_dir: &Path) -> Vec<String> {
        fs::read_to_string(install_dir.join("pip.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Entries left in the installer's TMPDIR
    pub fn tmp_leftovers(&self) -> usize {
        fs::read_dir(self.tmp_dir())
            .expect("Failed to read tmp dir")
            .count()
    }

    /// Installer command wired to this bundle, with no install dir chosen
    pub fn installer(&self) -> Command {
        self.installer_with_python(SHELL)
    }

    /// Like [`TestBundle::installer`], running the builder with `python`
    pub fn installer_with_python(&self, python: &str) -> Command {
        let mut cmd = installer_cmd();
        cmd.env("TMPDIR", self.tmp_dir())
            .env("HOME", self.home_dir())
            .env_remove("AWSCLI_BUNDLE_INSTALL_DIR")
            .env_remove("RUST_LOG")
            .arg("--packages-dir")
            .arg(self.packages_dir())
            .arg("--python")
            .arg(python);
        cmd
    }
}

impl Default for TestBundle {
    fn default() -> Self {
        Self::new()
    }
}

/// The installer binary with no extra configuration
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn installer_cmd() -> Command {
    Command::cargo_bin("awscli-bundle").expect("Failed to find awscli-bundle binary")
}
