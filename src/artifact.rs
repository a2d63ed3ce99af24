//! Staged artifact model and the producer's filename grammar.
//!
//! The packaging step names Windows update packages
//! `GitHubDesktop-<version>-<arch>-full.nupkg`. [`PackageName`] parses that
//! template once into structured fields; everything downstream works from
//! the parsed value rather than re-matching substrings.

use crate::error::ArtifactError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Product prefix shared by all Windows update packages.
pub const PACKAGE_PREFIX: &str = "GitHubDesktop";

/// Extension of Windows update packages.
pub const UPDATE_PACKAGE_EXTENSION: &str = "nupkg";

/// Template the resolver expects, used in error messages.
pub const PACKAGE_TEMPLATE: &str = "GitHubDesktop-<version>-<x64|arm64>-full.nupkg";

/// Installer setup-name prefix written by the producer.
pub const INSTALLER_SOURCE_PREFIX: &str = "GitHubDesktopSetup";

/// Installer prefix used on the distribution server.
pub const INSTALLER_DIST_PREFIX: &str = "GitHubDesktop-Windows";

/// Human-readable product name the producer puts in macOS bundle names.
pub const BUNDLE_SOURCE_NAME: &str = "GitHub Desktop";

/// Architecture-free product marker for macOS bundles on the distribution server.
pub const BUNDLE_DIST_NAME: &str = "GitHubDesktop-macOS";

/// Build-telemetry sidecar suffix; such files are never artifacts.
pub const SIDECAR_SUFFIX: &str = "bundle-size.json";

const FULL_SUFFIX: &str = "-full.nupkg";

/// Target operating system of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Windows (Squirrel RELEASES feed)
    Windows,
    /// macOS (JSON releases feed)
    MacOs,
}

impl Platform {
    /// Platform segment of feed directory names.
    pub fn feed_name(&self) -> &'static str {
        match self {
            Platform::Windows => "win32",
            Platform::MacOs => "darwin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::MacOs => write!(f, "macOS"),
        }
    }
}

/// CPU architecture of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit x86
    X64,
    /// 64-bit ARM
    Arm64,
}

impl Arch {
    /// Both supported architectures, x64 first.
    pub const ALL: [Arch; 2] = [Arch::X64, Arch::Arm64];

    /// Marker used in file and directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "x64" => Ok(Arch::X64),
            "arm64" => Ok(Arch::Arm64),
            other => Err(format!("unknown architecture '{other}'")),
        }
    }
}

/// What a staged file is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `.exe` / `.msi` installer binary
    InstallerPackage,
    /// `.nupkg` update payload
    UpdatePackage,
    /// `.zip` application bundle
    CompressedBundle,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::InstallerPackage => write!(f, "installer"),
            ArtifactKind::UpdatePackage => write!(f, "update package"),
            ArtifactKind::CompressedBundle => write!(f, "bundle"),
        }
    }
}

/// A file in the staging directory, classified by extension and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    /// Location on disk
    pub path: PathBuf,
    /// Target operating system
    pub platform: Platform,
    /// Architecture, when the file name carries a marker
    pub arch: Option<Arch>,
    /// Artifact kind
    pub kind: ArtifactKind,
}

impl StagedArtifact {
    /// Classify a staged file. Returns `None` for files that are not artifacts.
    pub fn classify(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let (platform, kind) = match extension.as_str() {
            UPDATE_PACKAGE_EXTENSION => (Platform::Windows, ArtifactKind::UpdatePackage),
            "exe" | "msi" => (Platform::Windows, ArtifactKind::InstallerPackage),
            "zip" => (Platform::MacOs, ArtifactKind::CompressedBundle),
            _ => return None,
        };

        let name = file_name(path);
        let arch = if name.contains(Arch::Arm64.as_str()) {
            Some(Arch::Arm64)
        } else if name.contains(Arch::X64.as_str()) {
            Some(Arch::X64)
        } else {
            None
        };

        Some(Self {
            path: path.to_path_buf(),
            platform,
            arch,
            kind,
        })
    }

    /// Base file name of the artifact.
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }
}

/// Parsed `GitHubDesktop-<version>-<arch>-full.nupkg` file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    /// Producer-defined version, possibly with a pre-release suffix
    pub version: String,
    /// Architecture the package was built for
    pub arch: Arch,
}

impl PackageName {
    /// Build a name for the given version and architecture.
    pub fn new(version: impl Into<String>, arch: Arch) -> Self {
        Self {
            version: version.into(),
            arch,
        }
    }

    /// Same version, different architecture.
    pub fn with_arch(&self, arch: Arch) -> Self {
        Self::new(self.version.clone(), arch)
    }

    /// File name as written by the producer.
    pub fn source_file_name(&self) -> String {
        format!("{PACKAGE_PREFIX}-{}-{}{FULL_SUFFIX}", self.version, self.arch)
    }

    /// File name expected by the update server.
    ///
    /// The x64 package becomes the full payload at the channel-neutral name;
    /// the arm64 package drops both the marker and the `-full` infix.
    pub fn distribution_file_name(&self) -> String {
        match self.arch {
            Arch::X64 => format!("{PACKAGE_PREFIX}-{}{FULL_SUFFIX}", self.version),
            Arch::Arm64 => format!("{PACKAGE_PREFIX}-{}.{UPDATE_PACKAGE_EXTENSION}", self.version),
        }
    }
}

impl FromStr for PackageName {
    type Err = ArtifactError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        let unrecognized = || ArtifactError::UnrecognizedNamingConvention {
            name: name.to_string(),
            expected: PACKAGE_TEMPLATE,
        };

        let rest = name
            .strip_prefix(PACKAGE_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.strip_suffix(FULL_SUFFIX))
            .ok_or_else(unrecognized)?;
        let (version, arch) = rest.rsplit_once('-').ok_or_else(unrecognized)?;
        let arch = arch.parse::<Arch>().map_err(|_| unrecognized())?;
        if version.is_empty() {
            return Err(unrecognized());
        }

        Ok(Self::new(version, arch))
    }
}

/// Base file name of a path as UTF-8, empty when unavailable.
pub(crate) fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}
