mod dto;
mod load_config;

pub use dto::LauncherConfigDto;
pub use load_config::{load_config, parse_config_content};
