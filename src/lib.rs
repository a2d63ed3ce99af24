//! # Desktop Update Metadata
//!
//! Post-processing for desktop release artifacts built for Windows and macOS
//! on x64 and arm64.
//!
//! A run unzips the build archives, reads the release version and channel
//! from the x64 update package name, renames artifacts to the distribution
//! naming scheme, writes the release note body, exports version facts to the
//! CI environment and emits the update feeds read by the auto-update clients.
//!
//! ## Usage
//!
//! ```bash
//! desktop_update_metadata                      # ./tmp/*.zip -> ./metadata
//! desktop_update_metadata --scratch-dir build  # archives in ./build
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifact;
pub mod cli;
pub mod env_sink;
pub mod error;
pub mod feed;
pub mod normalizer;
pub mod notes;
pub mod pipeline;
pub mod resolver;
pub mod stager;
pub mod utils;

pub use artifact::{Arch, ArtifactKind, PackageName, Platform, StagedArtifact};
pub use cli::{Args, RuntimeConfig};
pub use env_sink::EnvSink;
pub use error::{ArtifactError, ReleaseError, Result, VersionError};
pub use pipeline::RunSummary;
pub use resolver::{Channel, ReleaseVersion};

use std::path::PathBuf;

/// Directories and URLs used by a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding the downloaded `*.zip` build archives
    pub scratch_dir: PathBuf,
    /// Staging directory, reset at the start of every run
    pub staging_dir: PathBuf,
    /// Root of the per-platform feed directories
    pub metadata_dir: PathBuf,
    /// Release note output file
    pub release_body_path: PathBuf,
    /// Base URL of release downloads, without trailing slash
    pub download_base: String,
}

impl PipelineConfig {
    /// Conventional layout: staging in `<scratch>/release`, release note in
    /// `<scratch>/release_body.txt`, default download base.
    pub fn new(scratch_dir: impl Into<PathBuf>, metadata_dir: impl Into<PathBuf>) -> Self {
        let scratch_dir = scratch_dir.into();
        Self {
            staging_dir: scratch_dir.join("release"),
            release_body_path: scratch_dir.join("release_body.txt"),
            metadata_dir: metadata_dir.into(),
            scratch_dir,
            download_base: feed::DEFAULT_DOWNLOAD_BASE.to_string(),
        }
    }
}
