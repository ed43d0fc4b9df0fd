//! Private cache directory derivation.

use std::fmt;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Directory under the base directory reserved for launchpad state.
pub const LAUNCHPAD_DIR: &str = ".launchpad";

/// Segment grouping cache entries inside [`LAUNCHPAD_DIR`].
pub const CACHE_DIR: &str = "cache";

/// Label hashed into the opaque cache key. Changing it moves every cache.
const CACHE_NAMESPACE: &str = "launchpad/package-cache/v1";

/// Number of hex digits kept from the namespace digest.
const CACHE_KEY_LEN: usize = 16;

/// Absolute location of the run-owned package cache.
///
/// A pure function of the base directory: `<base>/.launchpad/cache/<key>`,
/// where `<key>` is a fixed opaque identifier derived from [`CACHE_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLocation {
    path: PathBuf,
}

impl CacheLocation {
    /// Derive the cache location for a base directory.
    pub fn for_base(base_dir: &Path) -> Self {
        let path = base_dir.join(LAUNCHPAD_DIR).join(CACHE_DIR).join(cache_key());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Destination file for the downloaded archive.
    pub fn archive_path(&self, archive_name: &str) -> PathBuf {
        self.path.join(archive_name)
    }
}

impl fmt::Display for CacheLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

fn cache_key() -> String {
    let digest = Sha256::digest(CACHE_NAMESPACE.as_bytes());
    let mut key: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
    key.truncate(CACHE_KEY_LEN);
    key
}
