//! # `argtree`
//!
//! Demo binary for the `argtree` command tree parser. It registers a small
//! git-like tree and prints the options each command receives.
//!
//! ```sh
//! argtree list -l
//! argtree push origin --url=https://example.org
//! argtree --config settings.yaml
//! ```
//!
//! Set `RUST_LOG` (or `ARGTREE_VERBOSE`) to see how tokens are resolved.

use anyhow::Result;
use argtree::app::build_cli;
use argtree::cli::program_name;
use argtree::error::CliError;
use argtree::system::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    // Standard output carries the command output, so logs go to stderr
    let log_level = if std::env::var_os("ARGTREE_VERBOSE").is_some() {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = build_cli(&program_name(), RealSystem::new())?;

    match cli.run() {
        Ok(_) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(err.downcast_ref::<CliError>().map_or(1, CliError::exit_code));
        }
    }
}
