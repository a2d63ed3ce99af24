//! Error types for release post-processing.
//!
//! Every failure is fatal for the run. Errors carry enough context (paths,
//! file names, version strings) for an operator to see which artifact caused it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release post-processing
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all pipeline stages
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Staged artifact errors
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Version resolution errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Filesystem error with path context
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// Operation being performed, e.g. "renaming"
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Archive could not be read or extracted
    #[error("Failed to extract {}: {source}", path.display())]
    Archive {
        /// Archive being extracted
        path: PathBuf,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// Invalid glob pattern built from a directory path
    #[error("Invalid file pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Error while iterating glob matches
    #[error("Failed to list files: {0}")]
    Glob(#[from] glob::GlobError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors about the presence and naming of staged artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// No staged file matched the expected pattern
    #[error("No {pattern} files found in {}", dir.display())]
    NoCandidate {
        /// Directory that was searched
        dir: PathBuf,
        /// Human-readable description of the pattern
        pattern: String,
    },

    /// An expected artifact is absent
    #[error("Expected artifact is missing: {}", path.display())]
    MissingArtifact {
        /// Path where the artifact was expected
        path: PathBuf,
    },

    /// File name does not follow the producer's naming template
    #[error("Unsupported filename: \"{name}\" (expected {expected})")]
    UnrecognizedNamingConvention {
        /// Offending file name
        name: String,
        /// Template the name was checked against
        expected: &'static str,
    },
}

/// Version classification errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Hyphenated version without a recognized channel marker
    #[error("Unsupported version type: '{version}' has a pre-release suffix without a beta marker")]
    UnrecognizedChannel {
        /// Raw version string
        version: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Artifact(ArtifactError::NoCandidate { dir, .. }) => vec![
                format!("Check that the build archives were downloaded next to {}", dir.display()),
                "Make sure the Windows x64 build produced a -x64-full.nupkg package".to_string(),
            ],
            ReleaseError::Artifact(ArtifactError::MissingArtifact { .. }) => vec![
                "Make sure all four platform builds (win32/darwin, x64/arm64) succeeded".to_string(),
                "Renaming runs once per staging directory; re-run from the archives".to_string(),
            ],
            ReleaseError::Artifact(ArtifactError::UnrecognizedNamingConvention { expected, .. }) => {
                vec![format!("Packages must be named {expected}")]
            }
            ReleaseError::Version(VersionError::UnrecognizedChannel { .. }) => vec![
                "Only stable versions (no hyphen) and beta versions (containing 'beta') are published"
                    .to_string(),
            ],
            ReleaseError::Archive { .. } => {
                vec!["Re-download the build archives; one of them is corrupt".to_string()]
            }
            _ => vec![],
        }
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase, e.g. "reading", "renaming".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| ReleaseError::Fs {
            context,
            path: path.into(),
            source,
        })
    }
}
