use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for launchpad operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Package retrieval failed (unreachable endpoint, bad status, broken stream).
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String, status: Option<u16> },

    /// Archive is malformed or unreadable.
    #[error("Failed to extract {}: {details}", archive.display())]
    Extraction { archive: PathBuf, details: String },

    /// Archive unpacked but the expected package folder is missing.
    #[error("Expected package directory not found after extraction: {}", expected.display())]
    Layout { expected: PathBuf },

    /// Local settings could not be copied into the package.
    #[error("Failed to apply settings {} -> {}: {source}", from.display(), to.display())]
    Settings {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Entry point missing or the interpreter could not be executed.
    #[error("Failed to start '{program}': {details}")]
    ProcessStart { program: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn download<U: Into<String>, M: Into<String>>(
        url: U,
        message: M,
        status: Option<u16>,
    ) -> Self {
        AppError::Download { url: url.into(), message: message.into(), status }
    }

    /// Whether this failure aborts the run.
    ///
    /// Only a settings overlay failure lets the pipeline continue.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::Settings { .. })
    }
}
