//! Whole-file replacement writes.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` so readers see either the old or the new file.
///
/// The content is staged in a temp file next to the target and renamed over it.
/// The target keeps its permissions; a new file gets `0644` on Unix.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("{} has no parent directory", path.display()))?;

    let mut staging = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create staging file in {}", parent.display()))?;
    staging
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write staging file for {}", path.display()))?;
    staging
        .as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync staging file for {}", path.display()))?;
    match fs::metadata(path) {
        Ok(existing) => fs::set_permissions(staging.path(), existing.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?,
        Err(_) => set_default_permissions(staging.path())?,
    }
    staging
        .persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
        .context("Failed to set permissions on staging file")
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
