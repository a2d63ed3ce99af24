//! Shared fixtures for integration tests

#![allow(dead_code)]

use desktop_update_metadata::{PipelineConfig, RuntimeConfig};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// A throwaway release workspace with `tmp/` and `metadata/` under one root
pub struct ReleaseWorkspace {
    root: TempDir,
    pub config: PipelineConfig,
}

impl ReleaseWorkspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let config = PipelineConfig::new(root.path().join("tmp"), root.path().join("metadata"));
        std::fs::create_dir_all(&config.scratch_dir).expect("create scratch dir");
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write a zip archive into the scratch directory
    pub fn add_archive(&self, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
        let path = self.config.scratch_dir.join(name);
        write_zip(&path, files);
        path
    }

    /// Archives for a complete build of `version`
    pub fn add_release_archives(&self, version: &str) {
        let x64 = format!("GitHubDesktop-{version}-x64-full.nupkg");
        let arm64 = format!("GitHubDesktop-{version}-arm64-full.nupkg");
        self.add_archive(
            "windows.zip",
            &[
                (x64.as_str(), b"x64 full package".as_slice()),
                (arm64.as_str(), b"arm64 package".as_slice()),
                ("GitHubDesktopSetup-x64.exe", b"setup x64".as_slice()),
                ("GitHubDesktopSetup-x64.msi", b"msi x64".as_slice()),
                ("windows-bundle-size.json", b"{}".as_slice()),
            ],
        );
        self.add_archive(
            "macos.zip",
            &[
                ("GitHub Desktop-x64.zip", b"mac x64".as_slice()),
                ("GitHub Desktop-arm64.zip", b"mac arm64".as_slice()),
                ("macos-bundle-size.json", b"{}".as_slice()),
            ],
        );
    }

    /// Remove every archive from the scratch directory
    pub fn clear_archives(&self) {
        for entry in std::fs::read_dir(&self.config.scratch_dir).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|ext| ext == "zip") {
                std::fs::remove_file(path).unwrap();
            }
        }
    }

    pub fn staged_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.config.staging_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn read_metadata(&self, dir: &str, file: &str) -> String {
        std::fs::read_to_string(self.config.metadata_dir.join(dir).join(file))
            .unwrap_or_else(|e| panic!("reading {dir}/{file}: {e}"))
    }
}

pub fn write_zip(path: &Path, files: &[(&str, &[u8])]) {
    let mut zip = zip::ZipWriter::new(File::create(path).expect("create zip"));
    for (name, content) in files {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        zip.write_all(content).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
}

pub fn quiet() -> RuntimeConfig {
    RuntimeConfig::new(true)
}
