//! File system utilities for staging and feed output.
//!
//! All listings are top-level only and sorted by path so that "first match"
//! is stable across platforms.

use crate::error::{ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Regular files directly inside `dir` whose names match a glob `pattern`.
///
/// Hidden files are skipped, as with shell globbing.
pub fn glob_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::new()
    };
    let mut files = glob::glob_with(&full_pattern, options)?
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|path| path.is_file())
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

/// Every entry directly inside `dir`, files and directories alike.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).fs_context("listing", dir)? {
        entries.push(entry.fs_context("listing", dir)?.path());
    }
    entries.sort();
    Ok(entries)
}

/// Removes a file or a whole directory tree.
pub fn remove_entry(path: &Path) -> Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path).fs_context("removing directory", path)
    } else {
        std::fs::remove_file(path).fs_context("removing", path)
    }
}

/// Renames `from` to `to`, failing loudly when the source is absent.
pub fn rename(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(crate::error::ArtifactError::MissingArtifact {
            path: from.to_path_buf(),
        }
        .into());
    }
    std::fs::rename(from, to).fs_context("renaming", from)
}

/// Writes `contents` as the whole file, creating parent directories as needed.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
    }
    std::fs::write(path, contents).fs_context("writing", path)
}
