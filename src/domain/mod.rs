pub mod archive_format;
pub mod cache_location;
pub mod config;
pub mod error;
pub mod layout;
pub mod process;
pub mod stage;

pub use archive_format::ArchiveFormat;
pub use cache_location::CacheLocation;
pub use config::{LaunchConfig, LauncherConfig, PackageConfig, SettingsConfig};
pub use error::AppError;
pub use layout::ExtractedLayout;
pub use process::{
    ExitOutcome, LaunchRequest, ProcessEvent, ProcessState, SupervisedProcess, TerminationNotifier,
};
pub use stage::RunStage;
