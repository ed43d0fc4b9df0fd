pub mod cache_directory;
pub mod extractor;
pub mod fetcher;
pub mod overlay;

pub use cache_directory::CacheState;
pub use extractor::extract;
pub use fetcher::fetch;
pub use overlay::{OverlayOutcome, apply_overlay};
