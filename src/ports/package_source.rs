//! Package retrieval port definition.

use std::io::Read;

use url::Url;

use crate::domain::AppError;

/// Byte stream of a remote package archive.
pub type PackageStream = Box<dyn Read + Send>;

/// Port for opening a streaming read of the remote package.
pub trait PackageSource {
    /// Open the resource at `url`.
    ///
    /// Fails with `AppError::Download` when the endpoint is unreachable or
    /// answers with a non-success status. Errors surfacing later while reading
    /// the stream are reported by the reader as `io::Error`.
    fn open(&self, url: &Url) -> Result<PackageStream, AppError>;
}
