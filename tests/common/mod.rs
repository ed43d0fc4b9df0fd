//! Shared testing utilities for launchpad CLI tests.

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Isolated base directory plus a local HTTP server hosting the package.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    server: mockito::ServerGuard,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let server = mockito::Server::new();
        Self { root, server }
    }

    /// Base directory handed to the launcher.
    pub fn base_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn package_url(&self) -> String {
        format!("{}/archive/main.zip", self.server.url())
    }

    /// Serve `archive` at the package URL.
    pub fn serve_archive(&mut self, archive: Vec<u8>) -> mockito::Mock {
        self.server
            .mock("GET", "/archive/main.zip")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .with_body(archive)
            .create()
    }

    pub fn serve_status(&mut self, status: usize) -> mockito::Mock {
        self.server.mock("GET", "/archive/main.zip").with_status(status).create()
    }

    /// Write `launchpad.toml` pointing at the test server and running entries with `sh`.
    pub fn write_config(&self, extra: &str) {
        let content = format!(
            "[package]\nurl = \"{}\"\n\n[launch]\ninterpreter = \"sh\"\n{}",
            self.package_url(),
            extra
        );
        fs::write(self.base_dir().join("launchpad.toml"), content)
            .expect("Failed to write launchpad.toml");
    }

    pub fn write_local_settings(&self, content: &str) {
        fs::write(self.base_dir().join("settings.js"), content)
            .expect("Failed to write settings.js");
    }

    pub fn cache_dir(&self) -> PathBuf {
        launchpad::cache_location(self.base_dir()).path().to_path_buf()
    }

    /// Build a command for invoking the compiled `launchpad` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("launchpad").expect("Failed to locate launchpad binary");
        cmd.arg("--base-dir")
            .arg(self.base_dir())
            .env_remove("LAUNCHPAD_PACKAGE_URL")
            .env("LAUNCHPAD_LOG", "info");
        cmd
    }
}

/// Zip archive from `(path, content)` pairs.
#[allow(dead_code)]
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in entries {
        writer.start_file(*path, SimpleFileOptions::default()).expect("Failed to start entry");
        writer.write_all(content.as_bytes()).expect("Failed to write entry");
    }
    writer.finish().expect("Failed to finish archive").into_inner()
}

/// Forget any package URL inherited from the environment running the tests.
///
/// Callers must be `#[serial]`; the process environment is shared.
#[allow(dead_code)]
pub fn clear_package_url_env() {
    unsafe { std::env::remove_var("LAUNCHPAD_PACKAGE_URL") };
}

/// Gzip-compressed tarball from `(path, content)` pairs.
#[allow(dead_code)]
pub fn tar_gz(entries: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, path, content.as_bytes()).expect("Failed to append entry");
    }
    builder.into_inner().and_then(|encoder| encoder.finish()).expect("Failed to finish archive")
}
