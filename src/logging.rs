//! Logging setup for the launcher binary.
//!
//! Status lines go to stderr so the supervised child owns stdout. The filter
//! comes from `LAUNCHPAD_LOG` (same syntax as `RUST_LOG`) and defaults to `info`.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "LAUNCHPAD_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .try_init();
}
