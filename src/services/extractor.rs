//! Package archive extraction.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;
use zip::ZipArchive;

use crate::domain::{AppError, ArchiveFormat, ExtractedLayout};

/// Bytes inspected when the format is not configured.
const SNIFF_LEN: u64 = 4;

/// Unpack the archive at `archive_path` into `target_dir`.
///
/// `format` selects zip or gzip tarball; when `None` it is detected from the
/// leading bytes. Every entry is written relative to `target_dir`, replacing
/// files already there, and entries whose path would leave `target_dir` are
/// never written. Afterwards `target_dir/<package_dir>` must exist, and the
/// archive file is removed.
pub fn extract(
    archive_path: &Path,
    format: Option<ArchiveFormat>,
    target_dir: &Path,
    package_dir: &str,
    entry: &str,
) -> Result<ExtractedLayout, AppError> {
    let mut file = File::open(archive_path).map_err(|e| extraction_error(archive_path, e))?;
    let format = match format {
        Some(format) => format,
        None => sniff_format(&mut file).map_err(|e| extraction_error(archive_path, e))?,
    };
    debug!(%format, archive = %archive_path.display(), "Unpacking package");

    match format {
        ArchiveFormat::Zip => unpack_zip(file, target_dir),
        ArchiveFormat::TarGz => unpack_tar_gz(file, target_dir),
    }
    .map_err(|e| extraction_error(archive_path, e))?;

    let package_path = target_dir.join(package_dir);
    if !package_path.is_dir() {
        return Err(AppError::Layout { expected: package_path });
    }

    fs::remove_file(archive_path).map_err(|e| extraction_error(archive_path, e))?;

    Ok(ExtractedLayout::new(package_path, entry))
}

fn sniff_format(file: &mut File) -> io::Result<ArchiveFormat> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    file.by_ref().take(SNIFF_LEN).read_to_end(&mut header)?;
    file.rewind()?;
    Ok(ArchiveFormat::detect(&header))
}

fn unpack_zip(file: File, target_dir: &Path) -> io::Result<()> {
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(io::Error::other)?;
    archive.extract(target_dir).map_err(io::Error::other)
}

fn unpack_tar_gz(file: File, target_dir: &Path) -> io::Result<()> {
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_overwrite(true);
    archive.set_preserve_permissions(true);
    archive.unpack(target_dir)
}

fn extraction_error(archive_path: &Path, err: io::Error) -> AppError {
    AppError::Extraction { archive: archive_path.to_path_buf(), details: err.to_string() }
}
