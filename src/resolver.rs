//! Version and channel resolution.
//!
//! The release version is read from the x64 update package name, the one
//! artifact every build is guaranteed to produce with a full version string.

use crate::artifact::{Arch, PACKAGE_TEMPLATE, PackageName, UPDATE_PACKAGE_EXTENSION, file_name};
use crate::cli::RuntimeConfig;
use crate::error::{ArtifactError, Result, VersionError};
use crate::stager::StagingArea;
use crate::utils::fs;
use std::fmt;
use std::path::PathBuf;

/// Release track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Stable releases
    Production,
    /// Pre-releases
    Beta,
}

impl Channel {
    /// Name used in feed directories and release notes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Production => "production",
            Channel::Beta => "beta",
        }
    }

    /// Whether releases on this channel are published as pre-releases.
    pub fn is_prerelease(&self) -> bool {
        matches!(self, Channel::Beta)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version string and the channel it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    version: String,
    channel: Channel,
}

impl ReleaseVersion {
    /// Classify a raw version string.
    ///
    /// No hyphen means production; a hyphen plus `beta` anywhere means beta;
    /// any other pre-release suffix is rejected.
    pub fn parse(version: &str) -> std::result::Result<Self, VersionError> {
        let channel = if !version.contains('-') {
            Channel::Production
        } else if version.contains("beta") {
            Channel::Beta
        } else {
            return Err(VersionError::UnrecognizedChannel {
                version: version.to_string(),
            });
        };

        Ok(Self {
            version: version.to_string(),
            channel,
        })
    }

    /// Raw version string, also used as the release tag suffix.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resolved channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.channel)
    }
}

/// Result of version resolution
#[derive(Debug, Clone)]
pub struct ResolvedRelease {
    /// Version and channel
    pub version: ReleaseVersion,
    /// Parsed name of the x64 update package
    pub package: PackageName,
    /// Path of the x64 update package that was parsed
    pub package_path: PathBuf,
}

/// Find the x64 update package in the staging area and derive the release version.
pub fn resolve(staging: &StagingArea, runtime: &RuntimeConfig) -> Result<ResolvedRelease> {
    let output = runtime.output();
    output.section("Reading version number from x64 .nupkg file");

    let pattern = format!("*{}*.{}", Arch::X64, UPDATE_PACKAGE_EXTENSION);
    let candidates = fs::glob_files(&staging.dir, &pattern)?;
    let first = candidates.first().ok_or_else(|| ArtifactError::NoCandidate {
        dir: staging.dir.clone(),
        pattern: format!("x64 .{UPDATE_PACKAGE_EXTENSION}"),
    })?;

    // Prefer the first candidate that follows the x64 full-package template;
    // report the first candidate when none do.
    let (package_path, package) = candidates
        .iter()
        .find_map(|path| {
            let package = file_name(path).parse::<PackageName>().ok()?;
            (package.arch == Arch::X64).then(|| (path.clone(), package))
        })
        .ok_or_else(|| ArtifactError::UnrecognizedNamingConvention {
            name: file_name(first).to_string(),
            expected: PACKAGE_TEMPLATE,
        })?;
    if candidates.len() > 1 {
        output.warn(&format!(
            "{} x64 packages found, using {}",
            candidates.len(),
            file_name(&package_path)
        ));
    }

    let version = ReleaseVersion::parse(&package.version)?;
    output.indent(&format!("Version: {}", version.version()));
    output.indent(&format!("Type: {}", version.channel()));

    Ok(ResolvedRelease {
        version,
        package,
        package_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;
    use std::path::Path;

    fn staging_with(files: &[&str]) -> (tempfile::TempDir, StagingArea) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), b"pkg").unwrap();
        }
        let area = StagingArea {
            dir: dir.path().to_path_buf(),
            entries: files.iter().map(|f| dir.path().join(f)).collect(),
        };
        (dir, area)
    }

    #[test]
    fn test_production_versions() {
        for raw in ["3.4.1", "10.0.0", "1"] {
            let version = ReleaseVersion::parse(raw).unwrap();
            assert_eq!(version.channel(), Channel::Production);
            assert!(!version.channel().is_prerelease());
        }
    }

    #[test]
    fn test_beta_versions() {
        for raw in ["3.4.2-beta1", "3.4.2-beta", "3.4.2-pre-beta.3"] {
            let version = ReleaseVersion::parse(raw).unwrap();
            assert_eq!(version.channel(), Channel::Beta);
            assert!(version.channel().is_prerelease());
        }
    }

    #[test]
    fn test_other_prerelease_rejected() {
        let err = ReleaseVersion::parse("1.2.3-rc1").unwrap_err();
        assert!(matches!(err, VersionError::UnrecognizedChannel { version } if version == "1.2.3-rc1"));
    }

    #[test]
    fn test_resolve_from_staging() {
        let (_dir, area) = staging_with(&[
            "GitHubDesktop-3.4.1-x64-full.nupkg",
            "GitHubDesktop-3.4.1-arm64-full.nupkg",
            "GitHubDesktopSetup-x64.exe",
        ]);
        let resolved = resolve(&area, &RuntimeConfig::new(true)).unwrap();
        assert_eq!(resolved.version.version(), "3.4.1");
        assert_eq!(resolved.version.channel(), Channel::Production);
        assert_eq!(
            resolved.package_path.file_name().unwrap(),
            Path::new("GitHubDesktop-3.4.1-x64-full.nupkg")
        );
    }

    #[test]
    fn test_resolve_without_candidate() {
        let (_dir, area) = staging_with(&["GitHubDesktop-3.4.1-arm64-full.nupkg"]);
        let err = resolve(&area, &RuntimeConfig::new(true)).unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Artifact(ArtifactError::NoCandidate { .. })
        ));
    }

    #[test]
    fn test_resolve_unsupported_filename() {
        let (_dir, area) = staging_with(&["Desktop-x64-3.4.1.nupkg"]);
        let err = resolve(&area, &RuntimeConfig::new(true)).unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Artifact(ArtifactError::UnrecognizedNamingConvention { .. })
        ));
    }

    #[test]
    fn test_resolve_skips_non_full_packages() {
        let (_dir, area) = staging_with(&[
            "GitHubDesktop-3.4.1-x64-delta.nupkg",
            "GitHubDesktop-3.4.1-x64-full.nupkg",
        ]);
        let resolved = resolve(&area, &RuntimeConfig::new(true)).unwrap();
        assert_eq!(resolved.version.version(), "3.4.1");
        assert_eq!(
            resolved.package_path.file_name().unwrap(),
            Path::new("GitHubDesktop-3.4.1-x64-full.nupkg")
        );
    }

    #[test]
    fn test_resolve_unrecognized_channel() {
        let (_dir, area) = staging_with(&["GitHubDesktop-1.2.3-rc1-x64-full.nupkg"]);
        let err = resolve(&area, &RuntimeConfig::new(true)).unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Version(VersionError::UnrecognizedChannel { .. })
        ));
    }
}
