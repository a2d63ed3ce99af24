//! Renames staged artifacts to the distribution naming scheme.
//!
//! Runs once per staging directory: the source names no longer exist
//! afterwards, so a second pass fails on the update packages.

use crate::artifact::{
    Arch, ArtifactKind, BUNDLE_DIST_NAME, BUNDLE_SOURCE_NAME, INSTALLER_DIST_PREFIX,
    INSTALLER_SOURCE_PREFIX, StagedArtifact, file_name,
};
use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::resolver::ResolvedRelease;
use crate::stager::StagingArea;
use crate::utils::fs;
use std::path::PathBuf;

/// One performed rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Original path
    pub from: PathBuf,
    /// New path
    pub to: PathBuf,
}

/// Renames performed by [`normalize`], in execution order
#[derive(Debug, Clone, Default)]
pub struct NormalizedArtifacts {
    /// All renames
    pub renames: Vec<Rename>,
}

/// Rename update packages, installers and macOS bundles in place.
///
/// The x64 update package is renamed from the exact path the resolver
/// parsed; the arm64 package name is derived from the same parsed name.
pub fn normalize(
    staging: &StagingArea,
    release: &ResolvedRelease,
    runtime: &RuntimeConfig,
) -> Result<NormalizedArtifacts> {
    let output = runtime.output();
    output.section("Fixing filenames");
    output.println(&format!("{}", staging.dir.display()));

    let mut normalized = NormalizedArtifacts::default();
    let mut apply = |from: PathBuf, to: PathBuf| -> Result<()> {
        fs::rename(&from, &to)?;
        output.indent(&format!("{} --> {}", file_name(&from), file_name(&to)));
        normalized.renames.push(Rename { from, to });
        Ok(())
    };

    // Windows update packages
    let x64 = &release.package;
    apply(
        release.package_path.clone(),
        staging.dir.join(x64.distribution_file_name()),
    )?;
    let arm64 = x64.with_arch(Arch::Arm64);
    apply(
        staging.dir.join(arm64.source_file_name()),
        staging.dir.join(arm64.distribution_file_name()),
    )?;

    // Windows installers and macOS bundles
    let mut artifacts = Vec::new();
    for pattern in ["*.exe", "*.msi", "*.zip"] {
        artifacts.extend(
            fs::glob_files(&staging.dir, pattern)?
                .iter()
                .filter_map(|path| StagedArtifact::classify(path)),
        );
    }
    for artifact in artifacts {
        let Some(new_name) = distribution_name(&artifact) else {
            log::debug!("Leaving {} untouched", artifact.path.display());
            continue;
        };
        apply(artifact.path.clone(), staging.dir.join(new_name))?;
    }

    Ok(normalized)
}

/// Distribution name for an installer or bundle, `None` when it keeps its name.
fn distribution_name(artifact: &StagedArtifact) -> Option<String> {
    let name = artifact.file_name();
    let (source, dist) = match artifact.kind {
        ArtifactKind::InstallerPackage => (INSTALLER_SOURCE_PREFIX, INSTALLER_DIST_PREFIX),
        ArtifactKind::CompressedBundle => (BUNDLE_SOURCE_NAME, BUNDLE_DIST_NAME),
        ArtifactKind::UpdatePackage => return None,
    };
    name.contains(source).then(|| name.replace(source, dist))
}
