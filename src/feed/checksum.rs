//! Content digests for update packages.

use crate::error::{ErrorExt, Result};
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io;
use std::path::Path;

/// SHA-1 of a file as uppercase hex, together with its size in bytes.
///
/// The file is streamed, so package size does not affect memory use.
pub fn sha1_file(path: &Path) -> Result<(String, u64)> {
    let mut file = File::open(path).fs_context("opening", path)?;
    let mut hasher = Sha1::new();
    let size = io::copy(&mut file, &mut hasher).fs_context("hashing", path)?;
    Ok((hex::encode_upper(hasher.finalize()), size))
}
