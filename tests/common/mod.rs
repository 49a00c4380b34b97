//! Common test utilities for bundlesync integration tests

pub mod mock_server;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Build system variables the binary reads; cleared so the host never leaks in
const BUILD_VARS: &[&str] = &[
    "CONFIGURATION",
    "CONFIGURATION_BUILD_DIR",
    "TARGET_BUILD_DIR",
    "EXECUTABLE_FOLDER_PATH",
    "INFOPLIST_PATH",
    "BUNDLESYNC_API_BASE",
    "RUST_LOG",
];

/// Token every test passes to the binary
pub const TOKEN: &str = "test-token";

/// A scratch build tree for one test
#[allow(dead_code)]
pub struct TestWorkspace {
    pub temp: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.path.join("cache")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path.join("App.app/LaunchKitRemoteResources")
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &[u8]) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Arguments pointing cache and output into this workspace
    pub fn dir_args(&self) -> Vec<String> {
        vec![
            "--cache-dir".to_string(),
            self.cache_dir().display().to_string(),
            "--output-dir".to_string(),
            self.output_dir().display().to_string(),
        ]
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The real binary, with no build variables inherited from the host
#[allow(deprecated)]
pub fn bundlesync_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bundlesync").expect("binary is built");
    for var in BUILD_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving.
#[allow(dead_code)]
pub async fn run_blocking(args: Vec<String>, envs: Vec<(String, String)>) -> Output {
    tokio::task::spawn_blocking(move || {
        let mut cmd = bundlesync_cmd();
        cmd.args(&args).envs(envs);
        cmd.output().expect("Failed to run bundlesync")
    })
    .await
    .expect("bundlesync task panicked")
}

/// Zip archive holding `entries` as (path, contents)
#[allow(dead_code)]
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        zip.write_all(contents).expect("Failed to write zip entry");
    }
    zip.finish().expect("Failed to finish zip").into_inner()
}

/// Names of the directories directly below `dir`, sorted
#[allow(dead_code)]
pub fn child_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| {
            e.expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .to_string()
        })
        .collect();
    names.sort();
    names
}
