//! Squirrel `RELEASES` feed for the Windows client.

use super::checksum::sha1_file;
use crate::error::Result;
use std::fmt;
use std::path::Path;

/// File name of the Windows feed.
pub const RELEASES_FILE: &str = "RELEASES";

/// One `RELEASES` line: `<SHA1> <url> <size>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasesEntry {
    /// Uppercase hex SHA-1 of the package
    pub sha1: String,
    /// Download URL of the package
    pub url: String,
    /// Package size in bytes
    pub size: u64,
}

impl ReleasesEntry {
    /// Hash `package` and pair it with its download URL.
    pub fn for_package(package: &Path, url: String) -> Result<Self> {
        let (sha1, size) = sha1_file(package)?;
        Ok(Self { sha1, url, size })
    }
}

impl fmt::Display for ReleasesEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.sha1, self.url, self.size)
    }
}
