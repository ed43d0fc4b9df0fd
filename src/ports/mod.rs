mod package_source;
mod process_launcher;

pub use package_source::{PackageSource, PackageStream};
pub use process_launcher::ProcessLauncher;
