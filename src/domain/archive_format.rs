use std::fmt;

use serde::Deserialize;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Container format of the downloaded package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ArchiveFormat {
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "tar.gz")]
    TarGz,
}

impl ArchiveFormat {
    /// Pick the format from the leading bytes of an archive.
    ///
    /// Gzip streams are read as tarballs; anything else is treated as zip.
    pub fn detect(header: &[u8]) -> Self {
        if header.starts_with(&GZIP_MAGIC) { ArchiveFormat::TarGz } else { ArchiveFormat::Zip }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
