//! Export of resolved release facts to the CI environment.
//!
//! The sink is handed in explicitly; nothing here reads the process
//! environment, so the publisher works the same in tests and in CI.

use crate::cli::RuntimeConfig;
use crate::error::{ErrorExt, Result};
use crate::resolver::ReleaseVersion;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Variable holding the release version.
pub const VERSION_KEY: &str = "DESKTOP_VERSION";

/// Variable holding `true`/`false` for pre-releases.
pub const PRERELEASE_KEY: &str = "IS_PRERELEASE";

/// Append-only `KEY=VALUE` environment file, such as the one named by `GITHUB_ENV`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSink {
    path: PathBuf,
}

impl EnvSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the environment file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append variables, one `KEY=VALUE` line each. Existing content is kept.
    pub fn append(&self, vars: &[(&str, &str)]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .fs_context("opening environment file", &self.path)?;
        let mut lines = String::new();
        for (key, value) in vars {
            lines.push_str(&format!("{key}={value}\n"));
        }
        file.write_all(lines.as_bytes())
            .fs_context("appending to environment file", &self.path)
    }
}

/// Variables exported for a release.
pub fn release_vars(version: &ReleaseVersion) -> [(&'static str, String); 2] {
    [
        (VERSION_KEY, version.version().to_string()),
        (PRERELEASE_KEY, version.channel().is_prerelease().to_string()),
    ]
}

/// Publish version facts to `sink`, or report that there is nowhere to publish.
pub fn publish(version: &ReleaseVersion, sink: Option<&EnvSink>, runtime: &RuntimeConfig) -> Result<()> {
    let output = runtime.output();
    output.section("Exporting environment variables");

    let Some(sink) = sink else {
        output.info("\"GITHUB_ENV\" not found. Skipping exporting environment variables.");
        return Ok(());
    };

    let vars = release_vars(version);
    let pairs: Vec<(&str, &str)> = vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
    sink.append(&pairs)?;
    for (key, value) in &pairs {
        output.indent(&format!("{key}={value}"));
    }
    log::debug!("Exported {} variables to {}", pairs.len(), sink.path().display());
    Ok(())
}
