//! Release note body for the published release.

use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::resolver::ReleaseVersion;
use crate::utils::fs;
use std::path::Path;

/// Render the release description for a version.
pub fn compose(version: &ReleaseVersion) -> String {
    format!(
        "## GitHub Desktop 汉化版
版本：{version}
渠道：{channel}

由 GitHub Action 自动发布
该汉化版支持自动更新，服务器为 [zetaloop/desktop-metadata](https://github.com/zetaloop/desktop-metadata)",
        version = version.version(),
        channel = version.channel(),
    )
}

/// Compose the release note and write it to `path`, replacing any previous body.
pub fn write_release_body(version: &ReleaseVersion, path: &Path, runtime: &RuntimeConfig) -> Result<String> {
    let output = runtime.output();
    output.section("Writing release info");

    let body = compose(version);
    output.println(&format!("'''\n{body}\n'''"));
    fs::write_file(path, &body)?;
    output.indent(&format!("<Release Info> --> {}", path.display()));
    Ok(body)
}
