//! The release post-processing pipeline.
//!
//! Stages run strictly in order, each taking the previous stage's output.
//! The first error aborts the run; nothing is retried or rolled back. Staging
//! is reset on every run, so re-running after fixing the cause is safe.

use crate::PipelineConfig;
use crate::cli::RuntimeConfig;
use crate::env_sink::{self, EnvSink};
use crate::error::Result;
use crate::feed::{self, FeedFile};
use crate::normalizer::{self, NormalizedArtifacts};
use crate::notes;
use crate::resolver::{self, ReleaseVersion};
use crate::stager::{self, StagingArea};
use chrono::Utc;

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Resolved version and channel
    pub version: ReleaseVersion,
    /// Staging directory contents before renaming
    pub staging: StagingArea,
    /// Renames performed
    pub normalized: NormalizedArtifacts,
    /// Release note body that was written
    pub release_body: String,
    /// Feed files that were written
    pub feeds: Vec<FeedFile>,
}

/// Run every stage once against the configured directories.
pub fn run(config: &PipelineConfig, sink: Option<&EnvSink>, runtime: &RuntimeConfig) -> Result<RunSummary> {
    log::info!(
        "Processing archives from {} into {}",
        config.scratch_dir.display(),
        config.staging_dir.display()
    );

    let staging = stager::stage(&config.scratch_dir, &config.staging_dir, runtime)?;
    let resolved = resolver::resolve(&staging, runtime)?;
    let normalized = normalizer::normalize(&staging, &resolved, runtime)?;
    let release_body = notes::write_release_body(&resolved.version, &config.release_body_path, runtime)?;
    env_sink::publish(&resolved.version, sink, runtime)?;
    let feeds = feed::emit(
        &staging.dir,
        &config.metadata_dir,
        &config.download_base,
        &resolved.version,
        Utc::now(),
        runtime,
    )?;

    log::info!("Wrote {} feed files for {}", feeds.len(), resolved.version);
    Ok(RunSummary {
        version: resolved.version,
        staging,
        normalized,
        release_body,
        feeds,
    })
}
