use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::config::{PACKAGE_URL_ENV, default_env};
use crate::domain::{
    AppError, ArchiveFormat, LaunchConfig, LauncherConfig, PackageConfig, SettingsConfig,
};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherConfigDto {
    pub package: Option<PackageConfigDto>,
    pub settings: Option<SettingsConfigDto>,
    pub launch: Option<LaunchConfigDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfigDto {
    pub url: Option<Url>,
    pub dir: Option<String>,
    pub entry: Option<String>,
    pub archive_name: Option<String>,
    pub format: Option<ArchiveFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfigDto {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchConfigDto {
    pub interpreter: Option<String>,
    pub args: Option<Vec<String>>,
    pub env: Option<BTreeMap<String, String>>,
}

impl LauncherConfigDto {
    /// Fold the file contents onto defaults.
    ///
    /// `url_override` wins over `package.url`; one of them must be present.
    pub fn into_config(self, url_override: Option<Url>) -> Result<LauncherConfig, AppError> {
        let package_dto = self.package.unwrap_or_default();
        let url = url_override.or(package_dto.url).ok_or_else(|| {
            AppError::config_error(format!(
                "No package URL configured: set package.url in the config file or {}",
                PACKAGE_URL_ENV
            ))
        })?;

        let default_package = PackageConfig::new(url);
        let package = PackageConfig {
            dir: package_dto.dir.unwrap_or(default_package.dir),
            entry: package_dto.entry.unwrap_or(default_package.entry),
            archive_name: package_dto.archive_name.unwrap_or(default_package.archive_name),
            format: package_dto.format,
            url: default_package.url,
        };

        let default_settings = SettingsConfig::default();
        let settings = match self.settings {
            Some(d) => SettingsConfig {
                source: d.source.unwrap_or(default_settings.source),
                target: d.target.unwrap_or(default_settings.target),
            },
            None => default_settings,
        };

        let default_launch = LaunchConfig::default();
        let launch = match self.launch {
            Some(d) => {
                let mut env = default_env();
                env.extend(d.env.unwrap_or_default());
                LaunchConfig {
                    interpreter: d.interpreter.unwrap_or(default_launch.interpreter),
                    args: d.args.unwrap_or(default_launch.args),
                    env,
                }
            }
            None => default_launch,
        };

        Ok(LauncherConfig { package, settings, launch })
    }
}
