//! Update-feed metadata for the auto-update clients.
//!
//! One feed file is written per (platform, architecture, channel):
//!
//! - `win32-<arch>-<channel>/RELEASES`: `<SHA1> <url> <size>` on one line
//! - `darwin-<arch>-<channel>/releases.json`: compact JSON descriptor
//!
//! All four source artifacts are checked and every feed is rendered before
//! anything is written, so a missing artifact never leaves a partial set.
//! Existing feed files are overwritten whole; feeds for other channels are
//! left alone.

mod checksum;
pub mod macos;
pub mod windows;

pub use checksum::sha1_file;
pub use macos::{MacReleaseFeed, RELEASES_JSON_FILE};
pub use windows::{RELEASES_FILE, ReleasesEntry};

use crate::artifact::{Arch, BUNDLE_DIST_NAME, PackageName, Platform, file_name};
use crate::cli::RuntimeConfig;
use crate::error::{ArtifactError, Result};
use crate::resolver::{Channel, ReleaseVersion};
use crate::utils::fs;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Release download location; `release-<version>/<file>` is appended.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com/zetaloop/desktop/releases/download";

/// Download URL of a release asset.
pub fn download_url(base: &str, version: &str, file_name: &str) -> String {
    format!("{base}/release-{version}/{file_name}")
}

/// Directory holding the feed for one platform, architecture and channel.
pub fn feed_dir(metadata_dir: &Path, platform: Platform, arch: Arch, channel: Channel) -> PathBuf {
    metadata_dir.join(format!("{}-{}-{}", platform.feed_name(), arch, channel))
}

/// Normalized artifact a feed describes.
pub fn source_file_name(platform: Platform, arch: Arch, version: &str) -> String {
    match platform {
        Platform::Windows => PackageName::new(version, arch).distribution_file_name(),
        Platform::MacOs => format!("{BUNDLE_DIST_NAME}-{arch}.zip"),
    }
}

/// Inputs for one feed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTarget {
    /// Client platform
    pub platform: Platform,
    /// Client architecture
    pub arch: Arch,
    /// Staged artifact the feed points at
    pub source: PathBuf,
    /// Feed file to write
    pub output: PathBuf,
}

/// A rendered feed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFile {
    /// Client platform
    pub platform: Platform,
    /// Client architecture
    pub arch: Arch,
    /// Written path
    pub path: PathBuf,
    /// Entire file content
    pub contents: String,
}

/// Feed targets for every supported platform and architecture.
pub fn plan(staging_dir: &Path, metadata_dir: &Path, version: &ReleaseVersion) -> Vec<FeedTarget> {
    let mut targets = Vec::new();
    for platform in [Platform::Windows, Platform::MacOs] {
        let feed_file = match platform {
            Platform::Windows => RELEASES_FILE,
            Platform::MacOs => RELEASES_JSON_FILE,
        };
        for arch in Arch::ALL {
            targets.push(FeedTarget {
                platform,
                arch,
                source: staging_dir.join(source_file_name(platform, arch, version.version())),
                output: feed_dir(metadata_dir, platform, arch, version.channel()).join(feed_file),
            });
        }
    }
    targets
}

/// Render the contents of one feed file.
pub fn render(
    target: &FeedTarget,
    download_base: &str,
    version: &ReleaseVersion,
    now: DateTime<Utc>,
) -> Result<String> {
    let url = download_url(download_base, version.version(), file_name(&target.source));
    match target.platform {
        Platform::Windows => Ok(ReleasesEntry::for_package(&target.source, url)?.to_string()),
        Platform::MacOs => Ok(serde_json::to_string(&MacReleaseFeed::new(
            url,
            version.version(),
            now,
        ))?),
    }
}

/// Write all feed files for `version`, timestamping macOS feeds with `now`.
pub fn emit(
    staging_dir: &Path,
    metadata_dir: &Path,
    download_base: &str,
    version: &ReleaseVersion,
    now: DateTime<Utc>,
    runtime: &RuntimeConfig,
) -> Result<Vec<FeedFile>> {
    let output = runtime.output();
    output.section("Writing metadata files");

    let targets = plan(staging_dir, metadata_dir, version);
    if let Some(missing) = targets.iter().find(|target| !target.source.is_file()) {
        return Err(ArtifactError::MissingArtifact {
            path: missing.source.clone(),
        }
        .into());
    }

    let mut feeds = Vec::with_capacity(targets.len());
    for target in targets {
        log::debug!(
            "Rendering {} {} feed from {}",
            target.platform,
            target.arch,
            target.source.display()
        );
        let contents = render(&target, download_base, version, now)?;
        feeds.push(FeedFile {
            platform: target.platform,
            arch: target.arch,
            path: target.output,
            contents,
        });
    }

    for feed in &feeds {
        fs::write_file(&feed.path, &feed.contents)?;
        output.println(&format!("{}", feed.path.display()));
        output.indent(&feed.contents);
    }

    Ok(feeds)
}
