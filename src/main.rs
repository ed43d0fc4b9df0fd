use std::path::PathBuf;

use clap::Parser;
use launchpad::{AppError, LaunchOptions};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(version)]
#[command(
    about = "Fetch the latest package, apply local settings, and run its entry point",
    long_about = None
)]
struct Cli {
    /// Directory holding the cache and local settings (default: executable directory)
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
    /// Configuration file (default: <base-dir>/launchpad.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    launchpad::logging::init_logging();

    let options = LaunchOptions { base_dir: cli.base_dir, config_path: cli.config };
    let result: Result<i32, AppError> =
        launchpad::run(options).map(|outcome| outcome.mirrored_status());

    match result {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
