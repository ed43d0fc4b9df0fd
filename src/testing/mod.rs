mod archive_builder;
mod fake_launcher;
mod fake_package_source;

pub use archive_builder::ArchiveBuilder;
pub use fake_launcher::FakeLauncher;
pub use fake_package_source::{FakePackageSource, pseudo_random_bytes};
