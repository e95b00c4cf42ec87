//! Host conventions for the isolated environment layout

use std::path::{Path, PathBuf};

/// Name of the installed application's executable
pub const APP_EXECUTABLE: &str = "aws";

/// Name of the environment's package manager executable
pub const PIP_EXECUTABLE: &str = "pip";

/// Directory inside an isolated environment that holds its executables.
///
/// `Scripts` on Windows, `bin` everywhere else.
pub fn bin_dir_name() -> &'static str {
    if cfg!(windows) { "Scripts" } else { "bin" }
}

/// `<env_root>/<bin_dir>`
pub fn bin_dir(env_root: &Path) -> PathBuf {
    env_root.join(bin_dir_name())
}

/// Path to the package manager inside an environment
pub fn pip_path(env_root: &Path) -> PathBuf {
    bin_dir(env_root).join(PIP_EXECUTABLE)
}

/// Path to the installed application executable inside an environment
pub fn app_executable_path(env_root: &Path) -> PathBuf {
    bin_dir(env_root).join(APP_EXECUTABLE)
}
