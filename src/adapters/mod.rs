pub mod command_launcher;
pub mod http_package_source;

pub use command_launcher::CommandLauncher;
pub use http_package_source::HttpPackageSource;
