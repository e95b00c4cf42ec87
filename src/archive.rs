//! Gzip'd tar extraction

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{BundleError, Result, io_context};

const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tgz"];

/// File name of `archive` without its archive suffix
pub fn archive_stem(archive: &Path) -> Option<String> {
    let name = archive.file_name()?.to_string_lossy().into_owned();
    ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix).map(str::to_string))
}

/// Extract every entry of `archive` into `dest`.
///
/// Entries that would land outside `dest` are rejected by `tar`.
pub fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let extract_err = |reason: String| BundleError::ArchiveExtractFailed {
        path: archive.display().to_string(),
        reason,
    };

    let file = File::open(archive).map_err(|e| extract_err(e.to_string()))?;
    let mut tar = Archive::new(GzDecoder::new(file));
    tar.unpack(dest).map_err(|e| extract_err(e.to_string()))?;

    tracing::debug!(
        archive = %archive.display(),
        dest = %dest.display(),
        "extracted archive"
    );
    Ok(())
}

/// The directory an archive unpacked into.
///
/// A lone directory is taken as is; with several, the one named after the
/// archive stem wins.
pub fn top_level_dir(dest: &Path, archive: &Path) -> Result<PathBuf> {
    let layout_err = |reason: String| BundleError::ArchiveLayout {
        path: archive.display().to_string(),
        reason,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(dest).map_err(|e| io_context("read", dest, &e))? {
        let entry = entry.map_err(|e| io_context("read", dest, &e))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }

    match dirs.len() {
        0 => Err(layout_err("no top-level directory".to_string())),
        1 => Ok(dirs.remove(0)),
        n => archive_stem(archive)
            .map(|stem| dest.join(stem))
            .filter(|candidate| dirs.contains(candidate))
            .ok_or_else(|| layout_err(format!("{n} top-level directories"))),
    }
}
