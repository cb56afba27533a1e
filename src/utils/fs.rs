//! File system helpers with atomic writes
//!
//! Scripts are written with a write-then-rename strategy: content goes to a
//! temporary file in the target directory, is synced to disk, and only then
//! replaces the target. Readers never see a partially written script.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Ensures a directory exists, creating it and its parents if needed.
///
/// # Examples
///
/// ```rust,no_run
/// use corelayer::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("modules/output"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            format!(
                "Failed to create directory: {}\n\nCheck directory permissions and path validity",
                path.display()
            )
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Writes several files, replacing none of them unless all were staged.
///
/// Every file is first written and synced to its own temporary file. Only once
/// all temporary files exist are they renamed over their targets, in order.
/// A failure while staging leaves every target untouched.
pub fn atomic_write_all(files: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut staged = Vec::with_capacity(files.len());

    for (path, content) in files {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
        temp.write_all(content)
            .with_context(|| format!("Failed to write to temp file for: {}", path.display()))?;
        temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

        staged.push((temp, path));
    }

    for (temp, path) in staged {
        temp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
    }

    Ok(())
}
