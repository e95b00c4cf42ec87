//! Offline package installation into the environment

use std::ffi::OsString;
use std::path::Path;

use crate::bundle::PackagesDir;
use crate::config::InstallConfig;
use crate::error::Result;
use crate::platform;
use crate::process::{CommandRunner, ExternalCommand, file_url};

/// Flags shared by every install: never touch the network or a cache
const OFFLINE_ARGS: &[&str] = &["--no-cache-dir", "--no-index"];

/// Extra flags for the application install, so source archives build
/// against the prerequisites already in the environment
const APP_BUILD_ARGS: &[&str] = &["--no-binary", ":all:", "--no-build-isolation"];

/// Install every setup prerequisite, then the application archive.
///
/// Prerequisites run one at a time in name order; the first failure stops
/// everything, and the application is only attempted once all succeeded.
pub fn pip_install_packages(
    runner: &dyn CommandRunner,
    config: &InstallConfig,
    packages: &PackagesDir,
) -> Result<()> {
    // Validate the application archive before touching the environment
    let app_archive = packages.app_archive()?;
    let pip = platform::pip_path(&config.install_dir);

    let setup_dir = packages.setup_dir();
    let setup_archives = packages.setup_archives()?;
    tracing::info!(count = setup_archives.len(), "installing setup requirements");
    for archive in &setup_archives {
        runner.run(&pip_install(&pip, &[], &setup_dir, archive)?)?;
    }

    tracing::info!(archive = %app_archive.display(), "installing application");
    runner.run(&pip_install(
        &pip,
        APP_BUILD_ARGS,
        packages.path(),
        &app_archive,
    )?)?;
    Ok(())
}

fn pip_install(
    pip: &Path,
    extra: &[&str],
    find_links: &Path,
    archive: &Path,
) -> Result<ExternalCommand> {
    Ok(ExternalCommand::new(pip)
        .arg("install")
        .args(extra.iter().copied())
        .args(OFFLINE_ARGS.iter().copied())
        .arg("--find-links")
        .arg(file_url(find_links)?)
        .arg(OsString::from(archive))
        .current_dir(find_links))
}
