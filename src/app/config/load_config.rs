//! Launcher configuration loading.

use std::fs;
use std::path::Path;

use url::Url;

use super::dto::LauncherConfigDto;
use crate::domain::{AppError, LauncherConfig};
use crate::domain::config::{CONFIG_FILE, PACKAGE_URL_ENV};

/// Load the launcher configuration.
///
/// Reads `explicit` when given (it must exist), otherwise `<base_dir>/launchpad.toml`
/// if present. `LAUNCHPAD_PACKAGE_URL` overrides the configured package URL.
pub fn load_config(base_dir: &Path, explicit: Option<&Path>) -> Result<LauncherConfig, AppError> {
    let dto = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            parse_config_content(&fs::read_to_string(path)?)?
        }
        None => {
            let path = base_dir.join(CONFIG_FILE);
            if path.is_file() {
                parse_config_content(&fs::read_to_string(&path)?)?
            } else {
                LauncherConfigDto::default()
            }
        }
    };

    let config = dto.into_config(url_from_env()?)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration file content without applying defaults.
pub fn parse_config_content(content: &str) -> Result<LauncherConfigDto, AppError> {
    Ok(toml::from_str(content)?)
}

fn url_from_env() -> Result<Option<Url>, AppError> {
    match std::env::var(PACKAGE_URL_ENV) {
        Ok(raw) if !raw.trim().is_empty() => Url::parse(raw.trim()).map(Some).map_err(|e| {
            AppError::config_error(format!("Invalid {} '{}': {}", PACKAGE_URL_ENV, raw, e))
        }),
        _ => Ok(None),
    }
}
