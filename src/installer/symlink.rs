//! Symlink to the installed executable

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{BundleError, Result};

/// Point `link` at `target`, replacing whatever file or link is there.
///
/// Missing parent directories of `link` are created. A directory at `link`
/// is never removed.
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    let fail = |reason: String| BundleError::Symlink {
        link: link.display().to_string(),
        target: target.display().to_string(),
        reason,
    };

    if let Ok(meta) = fs::symlink_metadata(link) {
        if !meta.is_dir() {
            crate::ui::print_symlink_replaced(link);
            fs::remove_file(link).map_err(|e| fail(format!("remove existing: {e}")))?;
        }
    }

    if let Some(parent) = link.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            fs::create_dir_all(parent)
                .map_err(|e| fail(format!("create {}: {e}", parent.display())))?;
        }
    }

    symlink_file(target, link).map_err(|e| fail(e.to_string()))?;
    tracing::info!(link = %link.display(), target = %target.display(), "created symlink");
    Ok(())
}

#[cfg(unix)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
