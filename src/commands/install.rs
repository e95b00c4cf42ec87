//! Install command implementation
//!
//! The installation process:
//! 1. Resolve configuration and open the packages directory
//! 2. Check the application archive is unambiguous
//! 3. Create a scoped working directory
//! 4. Build the isolated environment
//! 5. Install setup prerequisites, then the application
//! 6. Optionally symlink the executable
//! 7. Remove the working directory (on every path)

use std::path::{Path, PathBuf};

use crate::bundle::PackagesDir;
use crate::cli::Cli;
use crate::config::InstallConfig;
use crate::error::Result;
use crate::installer::{create_install_structure, create_symlink, pip_install_packages};
use crate::platform;
use crate::process::{CommandRunner, SystemRunner};
use crate::temp::{WorkingDir, temp_dir_base};

/// Run the install command
pub fn run(cli: &Cli) -> Result<()> {
    let config = InstallConfig::from_cli(cli)?;
    tracing::debug!(?config, "resolved configuration");

    let runner = SystemRunner::new(!cli.verbose);
    let runnable = install(&runner, &config, &temp_dir_base())?;
    crate::ui::print_success(&runnable);
    Ok(())
}

/// Provision the environment described by `config`.
///
/// Returns the path the user should run: the symlink when one was requested,
/// the real executable otherwise. The working directory is created under
/// `working_base` and is gone when this returns, whatever the outcome.
pub fn install(
    runner: &dyn CommandRunner,
    config: &InstallConfig,
    working_base: &Path,
) -> Result<PathBuf> {
    let packages = PackagesDir::open(&config.packages_dir)?;
    packages.app_archive()?;

    let working_dir = WorkingDir::create_in(working_base)?;
    let outcome = provision(runner, config, &packages, working_dir.path());
    working_dir.finish(outcome)
}

fn provision(
    runner: &dyn CommandRunner,
    config: &InstallConfig,
    packages: &PackagesDir,
    working_dir: &Path,
) -> Result<PathBuf> {
    create_install_structure(runner, config, packages, working_dir)?;
    pip_install_packages(runner, config, packages)?;

    let real_location = platform::app_executable_path(&config.install_dir);
    match &config.bin_location {
        Some(link) => {
            create_symlink(&real_location, link)?;
            Ok(link.clone())
        }
        None => Ok(real_location),
    }
}
