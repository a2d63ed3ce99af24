//! Command line argument parsing and validation.
//!
//! Every path has a default matching the release workflow layout, so the
//! tool runs with no arguments from the repository root.

use crate::PipelineConfig;
use crate::env_sink::EnvSink;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Post-process desktop release artifacts into update-feed metadata
#[derive(Parser, Debug)]
#[command(
    name = "desktop_update_metadata",
    version,
    about = "Post-process desktop release artifacts into update-feed metadata",
    long_about = "Unzip build archives, normalize artifact names, and write the RELEASES and
releases.json feeds consumed by the Windows and macOS auto-update clients.

Usage:
  desktop_update_metadata
  desktop_update_metadata --scratch-dir ./tmp --metadata-dir ./metadata"
)]
pub struct Args {
    /// Directory the build archives are downloaded into
    #[arg(long, value_name = "DIR", default_value = "./tmp")]
    pub scratch_dir: PathBuf,

    /// Staging directory for extracted artifacts [default: <SCRATCH_DIR>/release]
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Root of the per-platform update-feed directories
    #[arg(long, value_name = "DIR", default_value = "./metadata")]
    pub metadata_dir: PathBuf,

    /// Release note output file [default: <SCRATCH_DIR>/release_body.txt]
    #[arg(long, value_name = "FILE")]
    pub release_body: Option<PathBuf>,

    /// Base URL of release downloads; the tag and file name are appended
    #[arg(long, value_name = "URL", default_value = crate::feed::DEFAULT_DOWNLOAD_BASE)]
    pub download_base: String,

    /// CI environment file that receives exported variables; empty means none
    #[arg(
        long,
        value_name = "FILE",
        env = "GITHUB_ENV",
        value_parser = clap::value_parser!(OsString)
    )]
    pub github_env: Option<OsString>,

    /// Suppress progress output (errors are still shown)
    #[arg(long, short)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.download_base.trim().is_empty() {
            return Err("--download-base must not be empty".to_string());
        }
        Ok(())
    }

    /// Resolve defaults into a pipeline configuration
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(&self.scratch_dir, &self.metadata_dir);
        if let Some(staging_dir) = &self.staging_dir {
            config.staging_dir = staging_dir.clone();
        }
        if let Some(release_body) = &self.release_body {
            config.release_body_path = release_body.clone();
        }
        config.download_base = self.download_base.trim_end_matches('/').to_string();
        config
    }

    /// Environment sink, if the CI context provided one
    pub fn env_sink(&self) -> Option<EnvSink> {
        self.github_env
            .as_ref()
            .filter(|path| !path.is_empty())
            .map(|path| EnvSink::new(PathBuf::from(path)))
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_scratch_dir() {
        let args = Args::try_parse_from(["desktop_update_metadata", "--scratch-dir", "work"]).unwrap();
        let config = args.pipeline_config();
        assert_eq!(config.staging_dir, PathBuf::from("work/release"));
        assert_eq!(config.release_body_path, PathBuf::from("work/release_body.txt"));
        assert_eq!(config.metadata_dir, PathBuf::from("./metadata"));
    }

    #[test]
    fn test_download_base_trailing_slash_trimmed() {
        let args = Args::try_parse_from([
            "desktop_update_metadata",
            "--download-base",
            "https://example.com/releases/download/",
        ])
        .unwrap();
        assert!(args.validate().is_ok());
        assert_eq!(
            args.pipeline_config().download_base,
            "https://example.com/releases/download"
        );
    }

    #[test]
    fn test_empty_github_env_means_no_sink() {
        let args =
            Args::try_parse_from(["desktop_update_metadata", "--github-env", ""]).unwrap();
        assert!(args.validate().is_ok());
        assert!(args.env_sink().is_none());

        let args =
            Args::try_parse_from(["desktop_update_metadata", "--github-env", "env.txt"]).unwrap();
        assert_eq!(args.env_sink(), Some(EnvSink::new("env.txt")));
    }

    #[test]
    fn test_blank_download_base_rejected() {
        let args =
            Args::try_parse_from(["desktop_update_metadata", "--download-base", " "]).unwrap();
        assert!(args.validate().is_err());
    }
}
