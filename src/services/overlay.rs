//! Local settings overlay.

use std::fs;
use std::path::Path;

use crate::domain::AppError;

/// Result of a successful overlay attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// No local settings file; the package keeps its own.
    NoLocalSettings,
    Applied { bytes: u64 },
}

/// Copy `source` over `target`, creating missing parent directories.
///
/// A missing `source` is not an error. Copy failures come back as
/// `AppError::Settings`, which callers treat as non-fatal.
pub fn apply_overlay(source: &Path, target: &Path) -> Result<OverlayOutcome, AppError> {
    if !source.exists() {
        return Ok(OverlayOutcome::NoLocalSettings);
    }

    let settings_error = |err| AppError::Settings {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: err,
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(settings_error)?;
    }
    let bytes = fs::copy(source, target).map_err(settings_error)?;

    Ok(OverlayOutcome::Applied { bytes })
}
