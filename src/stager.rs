//! Archive staging.
//!
//! Resets the staging directory, extracts every downloaded archive into it
//! and discards build-telemetry sidecars. Re-running over fresh archives
//! leaves only the newest artifacts behind.

use crate::artifact::{SIDECAR_SUFFIX, StagedArtifact, file_name};
use crate::cli::RuntimeConfig;
use crate::error::{ErrorExt, ReleaseError, Result};
use crate::utils::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Staging directory contents after extraction
#[derive(Debug, Clone)]
pub struct StagingArea {
    /// Staging directory
    pub dir: PathBuf,
    /// Top-level entries left after sidecar removal, sorted
    pub entries: Vec<PathBuf>,
}

impl StagingArea {
    /// Entries that classify as release artifacts.
    pub fn artifacts(&self) -> Vec<StagedArtifact> {
        self.entries
            .iter()
            .filter_map(|path| StagedArtifact::classify(path))
            .collect()
    }
}

/// Extract all `*.zip` archives in `scratch_dir` into a clean `staging_dir`.
pub fn stage(scratch_dir: &Path, staging_dir: &Path, runtime: &RuntimeConfig) -> Result<StagingArea> {
    let output = runtime.output();
    output.section("Unzipping artifacts");

    std::fs::create_dir_all(staging_dir).fs_context("creating staging directory", staging_dir)?;
    for entry in fs::list_entries(staging_dir)? {
        output.indent(&format!("Removing {}...", entry.display()));
        fs::remove_entry(&entry)?;
    }

    let archives = fs::glob_files(scratch_dir, "*.zip")?;
    if archives.is_empty() {
        output.warn(&format!("No archives found in {}", scratch_dir.display()));
    }
    for archive in &archives {
        output.indent(&format!("Extracting {}...", archive.display()));
        extract(archive, staging_dir)?;
    }

    output.println(&format!("{}", staging_dir.display()));
    let mut entries = Vec::new();
    for entry in fs::list_entries(staging_dir)? {
        let name = file_name(&entry);
        if name.ends_with(SIDECAR_SUFFIX) {
            log::debug!("Discarding sidecar {}", entry.display());
            fs::remove_entry(&entry)?;
            continue;
        }
        output.indent(name);
        entries.push(entry);
    }

    let area = StagingArea {
        dir: staging_dir.to_path_buf(),
        entries,
    };
    for artifact in area.artifacts() {
        log::debug!(
            "Staged {} {} {}",
            artifact.platform,
            artifact.kind,
            artifact.file_name()
        );
    }
    Ok(area)
}

fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).fs_context("opening archive", archive)?;
    let archive_error = |source| ReleaseError::Archive {
        path: archive.to_path_buf(),
        source,
    };
    let mut zip = zip::ZipArchive::new(file).map_err(archive_error)?;
    log::debug!("{} contains {} entries", archive.display(), zip.len());
    zip.extract(dest).map_err(archive_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, files: &[(&str, &[u8])]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, content) in files {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_stage_merges_archives_and_drops_sidecars() {
        let scratch = tempfile::tempdir().unwrap();
        let staging = scratch.path().join("release");
        write_zip(
            &scratch.path().join("win.zip"),
            &[("a.nupkg", b"a"), ("win-bundle-size.json", b"{}")],
        );
        write_zip(
            &scratch.path().join("mac.zip"),
            &[("b.zip", b"b"), ("mac-bundle-size.json", b"{}")],
        );

        let area = stage(scratch.path(), &staging, &RuntimeConfig::new(true)).unwrap();
        assert_eq!(area.entries, vec![staging.join("a.nupkg"), staging.join("b.zip")]);
        assert_eq!(area.artifacts().len(), 2);
        assert!(!staging.join("win-bundle-size.json").exists());
    }

    #[test]
    fn test_colliding_names_overwrite_silently() {
        let scratch = tempfile::tempdir().unwrap();
        let staging = scratch.path().join("release");
        write_zip(&scratch.path().join("a.zip"), &[("same.txt", b"from a")]);
        write_zip(&scratch.path().join("b.zip"), &[("same.txt", b"from b")]);

        let area = stage(scratch.path(), &staging, &RuntimeConfig::new(true)).unwrap();
        assert_eq!(area.entries, vec![staging.join("same.txt")]);
        let content = std::fs::read(staging.join("same.txt")).unwrap();
        assert!(content == b"from a" || content == b"from b", "{content:?}");
    }

    #[test]
    fn test_stage_creates_missing_directory_without_archives() {
        let scratch = tempfile::tempdir().unwrap();
        let staging = scratch.path().join("release");

        let area = stage(scratch.path(), &staging, &RuntimeConfig::new(true)).unwrap();
        assert!(staging.is_dir());
        assert!(area.entries.is_empty());
    }

    #[test]
    fn test_corrupt_archive_is_fatal() {
        let scratch = tempfile::tempdir().unwrap();
        std::fs::write(scratch.path().join("broken.zip"), b"not a zip").unwrap();

        let err = stage(
            scratch.path(),
            &scratch.path().join("release"),
            &RuntimeConfig::new(true),
        )
        .unwrap_err();
        assert!(matches!(err, ReleaseError::Archive { .. }));
    }
}
