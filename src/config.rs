//! Resolved installation settings
//!
//! Every component receives an [`InstallConfig`] instead of reading fixed
//! paths, so tests can point the pipeline at throwaway directories.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{BundleError, Result, io_context};

/// Directory name of the bundled archives, next to the installer executable
pub const PACKAGES_DIR_NAME: &str = "packages";

/// Interpreters tried, in order, when `--python` is not given
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Everything the pipeline needs to know, as absolute paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Bundled archives
    pub packages_dir: PathBuf,
    /// Root of the isolated environment
    pub install_dir: PathBuf,
    /// Optional symlink to the installed executable
    pub bin_location: Option<PathBuf>,
    /// Interpreter that runs the environment builder
    pub python: PathBuf,
}

impl InstallConfig {
    /// Resolve command-line options against defaults
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let install_dir = match &cli.install_dir {
            Some(dir) => absolute(dir)?,
            None => default_install_dir()?,
        };

        let packages_dir = match &cli.packages_dir {
            Some(dir) => canonical_or_absolute(dir)?,
            None => default_packages_dir()?,
        };

        let bin_location = cli.bin_location.as_deref().map(absolute).transpose()?;

        let python = match &cli.python {
            Some(python) => resolve_python(python)?,
            None => find_python()?,
        };

        Ok(Self {
            packages_dir,
            install_dir,
            bin_location,
            python,
        })
    }
}

/// `~/.local/lib/aws`
pub fn default_install_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| install_dir_under(&home))
        .ok_or(BundleError::HomeDirNotFound)
}

fn install_dir_under(home: &Path) -> PathBuf {
    home.join(".local").join("lib").join("aws")
}

/// `packages/` beside the running executable
pub fn default_packages_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = dunce::canonicalize(&exe).unwrap_or(exe);
    let dir = exe.parent().ok_or_else(|| BundleError::IoError {
        message: format!("executable has no parent directory: {}", exe.display()),
    })?;
    Ok(dir.join(PACKAGES_DIR_NAME))
}

/// First Python interpreter found on `PATH`
pub fn find_python() -> Result<PathBuf> {
    PYTHON_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or(BundleError::InterpreterNotFound)
}

/// A bare name such as `python3.11` is looked up on `PATH`; anything with a
/// directory part is resolved against the current directory
fn resolve_python(python: &Path) -> Result<PathBuf> {
    if python.is_absolute() || python.components().count() > 1 {
        return absolute(python);
    }
    which::which(python).map_err(|_| BundleError::InterpreterNotOnPath {
        name: python.display().to_string(),
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| io_context("resolve", path, &e))
}

fn canonical_or_absolute(path: &Path) -> Result<PathBuf> {
    match dunce::canonicalize(path) {
        Ok(p) => Ok(p),
        Err(_) => absolute(path),
    }
}
