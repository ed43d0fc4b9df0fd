//! Run-owned cache directory lifecycle.

use std::fs;
use std::io;

use crate::domain::{AppError, CacheLocation};

/// What `prepare` found at the cache location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Fresh,
    /// A previous run's cache was removed.
    ClearedStale,
}

/// Remove any previous cache at `location` and recreate it empty.
pub fn prepare(location: &CacheLocation) -> Result<CacheState, AppError> {
    let state = if location.path().exists() {
        fs::remove_dir_all(location.path())?;
        CacheState::ClearedStale
    } else {
        CacheState::Fresh
    };
    fs::create_dir_all(location.path())?;
    Ok(state)
}

/// Delete the cache directory and everything in it. Missing is fine.
pub fn discard(location: &CacheLocation) -> Result<(), AppError> {
    match fs::remove_dir_all(location.path()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
