//! Streaming package download into the cache directory.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;
use url::Url;

use crate::domain::AppError;
use crate::ports::PackageSource;

const WRITE_BUFFER_BYTES: usize = 64 * 1024;

/// Stream the package at `url` into `destination`, returning the byte count.
///
/// The destination is created or truncated. Bytes are copied through a bounded
/// buffer and the file is flushed and synced before returning, so a returned
/// `Ok` means the archive on disk is complete. On error a partial file may be
/// left behind.
pub fn fetch<S: PackageSource + ?Sized>(
    source: &S,
    url: &Url,
    destination: &Path,
) -> Result<u64, AppError> {
    let mut stream = source.open(url)?;

    let file = File::create(destination).map_err(|e| write_error(url, destination, e))?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);

    let bytes = io::copy(&mut stream, &mut writer).map_err(|e| {
        AppError::download(url.as_str(), format!("stream interrupted: {}", e), None)
    })?;

    writer.flush().map_err(|e| write_error(url, destination, e))?;
    let file = writer.into_inner().map_err(|e| write_error(url, destination, e.into_error()))?;
    file.sync_all().map_err(|e| write_error(url, destination, e))?;

    debug!(bytes, path = %destination.display(), "Archive written");
    Ok(bytes)
}

fn write_error(url: &Url, destination: &Path, err: io::Error) -> AppError {
    AppError::download(
        url.as_str(),
        format!("cannot write {}: {}", destination.display(), err),
        None,
    )
}
