//! launchpad: fetch a package archive, unpack it into a private cache, overlay
//! local settings, and supervise the package entry point.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod logging;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use adapters::{CommandLauncher, HttpPackageSource};
use app::{AppContext, Orchestrator};

pub use domain::{AppError, ArchiveFormat, CacheLocation, ExitOutcome, LauncherConfig, RunStage};

/// Inputs for a launcher run.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Directory the cache and local settings are resolved against.
    /// Defaults to the directory containing the running executable.
    pub base_dir: Option<PathBuf>,
    /// Configuration file; defaults to `<base_dir>/launchpad.toml` when present.
    pub config_path: Option<PathBuf>,
}

/// Run the whole pipeline and wait for the package process to exit.
///
/// Returns the child's exit outcome. Any fatal stage failure is returned as an
/// error; the child's own exit code never is.
pub fn run(options: LaunchOptions) -> Result<ExitOutcome, AppError> {
    let base_dir = match options.base_dir {
        Some(dir) => dir,
        None => executable_dir()?,
    };
    let config = app::config::load_config(&base_dir, options.config_path.as_deref())?;

    let ctx = AppContext::new(HttpPackageSource::new()?, CommandLauncher::new());
    Orchestrator::new(&ctx, &config, &base_dir).run()
}

/// Cache directory used for a base directory.
pub fn cache_location(base_dir: &Path) -> CacheLocation {
    CacheLocation::for_base(base_dir)
}

/// Directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf, AppError> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        AppError::config_error(format!(
            "Cannot determine install directory of {}",
            exe.display()
        ))
    })
}
