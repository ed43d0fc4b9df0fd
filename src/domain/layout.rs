use std::path::{Path, PathBuf};

/// Directory tree produced by unpacking the package archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLayout {
    package_dir: PathBuf,
    entry_point: PathBuf,
}

impl ExtractedLayout {
    pub fn new(package_dir: PathBuf, entry: &str) -> Self {
        let entry_point = package_dir.join(entry);
        Self { package_dir, entry_point }
    }

    /// Top-level package folder inside the cache directory.
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    pub fn entry_point_present(&self) -> bool {
        self.entry_point.is_file()
    }

    /// Resolve a path relative to the package folder.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.package_dir.join(relative)
    }
}
