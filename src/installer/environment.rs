//! Isolated environment creation

use std::fs;
use std::path::Path;

use crate::archive;
use crate::bundle::PackagesDir;
use crate::config::InstallConfig;
use crate::error::{Result, io_context};
use crate::process::{CommandRunner, ExternalCommand};

/// Entry point script inside the extracted builder archive
pub const ENV_BUILDER_SCRIPT: &str = "virtualenv.py";

/// Create the install directory and build a fresh environment in it.
///
/// The builder archive is unpacked into `working_dir` and run from there
/// with the configured interpreter. Existing contents of the install
/// directory are left alone.
pub fn create_install_structure(
    runner: &dyn CommandRunner,
    config: &InstallConfig,
    packages: &PackagesDir,
    working_dir: &Path,
) -> Result<()> {
    if !config.install_dir.is_dir() {
        fs::create_dir_all(&config.install_dir)
            .map_err(|e| io_context("create", &config.install_dir, &e))?;
        tracing::debug!(path = %config.install_dir.display(), "created install directory");
    }

    let builder_archive = packages.env_builder_archive()?;
    tracing::info!(archive = %builder_archive.display(), "creating virtualenv");

    archive::extract(&builder_archive, working_dir)?;
    let builder_dir = archive::top_level_dir(working_dir, &builder_archive)?;

    runner.run(&env_builder_command(config, &builder_dir))?;
    Ok(())
}

fn env_builder_command(config: &InstallConfig, builder_dir: &Path) -> ExternalCommand {
    ExternalCommand::new(&config.python)
        .arg(ENV_BUILDER_SCRIPT)
        .arg("--no-download")
        .arg("--python")
        .arg(config.python.as_os_str())
        .arg(config.install_dir.as_os_str())
        .current_dir(builder_dir)
}
