pub mod config;
mod context;
mod pipeline;

pub use context::AppContext;
pub use pipeline::Orchestrator;
