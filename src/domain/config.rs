//! Launcher configuration domain models.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::domain::{AppError, ArchiveFormat};

/// Default configuration file name, looked up in the base directory.
pub const CONFIG_FILE: &str = "launchpad.toml";

/// Environment variable that replaces `package.url`.
pub const PACKAGE_URL_ENV: &str = "LAUNCHPAD_PACKAGE_URL";

/// Environment variable injected into the child to mark production execution.
pub const MODE_ENV_VAR: &str = "NODE_ENV";
pub const MODE_ENV_VALUE: &str = "production";

/// Complete launcher configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LauncherConfig {
    pub package: PackageConfig,
    pub settings: SettingsConfig,
    pub launch: LaunchConfig,
}

/// Where the package comes from and what it must contain.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageConfig {
    /// Archive download URL.
    pub url: Url,
    /// Top-level folder the archive must produce.
    pub dir: String,
    /// Entry point file inside `dir`.
    pub entry: String,
    /// File name used for the archive inside the cache directory.
    pub archive_name: String,
    /// Container format; detected from the downloaded bytes when unset.
    pub format: Option<ArchiveFormat>,
}

/// Local settings overlay paths.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsConfig {
    /// Source file, relative to the base directory.
    pub source: PathBuf,
    /// Target file, relative to the extracted package directory.
    pub target: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self { source: PathBuf::from("settings.js"), target: PathBuf::from("settings.js") }
    }
}

/// How the entry point is executed.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    pub interpreter: String,
    /// Arguments placed between the interpreter and the entry file.
    pub args: Vec<String>,
    /// Variables added on top of the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self { interpreter: "node".to_string(), args: Vec::new(), env: default_env() }
    }
}

pub(crate) fn default_env() -> BTreeMap<String, String> {
    BTreeMap::from([(MODE_ENV_VAR.to_string(), MODE_ENV_VALUE.to_string())])
}

pub(crate) const DEFAULT_PACKAGE_DIR: &str = "main";
pub(crate) const DEFAULT_ENTRY: &str = "index.js";
pub(crate) const DEFAULT_ARCHIVE_NAME: &str = "package.zip";

impl PackageConfig {
    /// Package configuration with default layout for the given URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            dir: DEFAULT_PACKAGE_DIR.to_string(),
            entry: DEFAULT_ENTRY.to_string(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            format: None,
        }
    }
}

impl LauncherConfig {
    /// Configuration with defaults for everything except the package URL.
    pub fn with_url(url: Url) -> Self {
        Self {
            package: PackageConfig::new(url),
            settings: SettingsConfig::default(),
            launch: LaunchConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match self.package.url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AppError::config_error(format!(
                    "package.url must use http or https, got '{}'",
                    other
                )));
            }
        }

        ensure_plain_name("package.dir", &self.package.dir)?;
        ensure_plain_name("package.archive_name", &self.package.archive_name)?;
        if self.package.archive_name == self.package.dir {
            return Err(AppError::config_error(
                "package.archive_name must differ from package.dir",
            ));
        }
        ensure_relative("package.entry", Path::new(&self.package.entry))?;
        ensure_relative("settings.source", &self.settings.source)?;
        ensure_relative("settings.target", &self.settings.target)?;

        if self.launch.interpreter.trim().is_empty() {
            return Err(AppError::config_error("launch.interpreter must not be empty"));
        }
        if self.launch.env.keys().any(|key| key.is_empty() || key.contains('=')) {
            return Err(AppError::config_error(
                "launch.env keys must be non-empty and contain no '='",
            ));
        }

        Ok(())
    }
}

fn ensure_plain_name(field: &str, value: &str) -> Result<(), AppError> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(AppError::config_error(format!(
            "{} must be a single path segment, got '{}'",
            field, value
        ))),
    }
}

fn ensure_relative(field: &str, path: &Path) -> Result<(), AppError> {
    let valid = path.components().next().is_some()
        && path.components().all(|component| matches!(component, Component::Normal(_)));
    if valid {
        Ok(())
    } else {
        Err(AppError::config_error(format!(
            "{} must be a relative path without '..', got '{}'",
            field,
            path.display()
        )))
    }
}
