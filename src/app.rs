//! The `argtree` demo command tree
//!
//! ```text
//! argtree [--help|-h] [--version|-v] [--config|-c] [list|push]
//! argtree list [--local|-l]
//! argtree push origin [--url|-u]
//! ```

use crate::cli::{Cli, Command, OptionSpec, ParsedOptions};
use crate::config::Config;
use crate::error::CliError;
use crate::system::System;
use anyhow::{Context as _, Result};
use tracing::info;

pub const VERSION: &str = "1.0.0";
pub const DEFAULT_ORIGIN_URL: &str = "https://example.com";

/// Build the demo tree; config files are read through `system`
///
/// # Errors
///
/// Returns an error if:
/// - The tree has a registration conflict
#[inline]
pub fn build_cli<S>(name: &str, system: S) -> Result<Cli, CliError>
where
    S: System + Clone + 'static,
{
    let list = Command::new("list")
        .with_usage("List the configuration.")
        .with_option(
            OptionSpec::flag("local")
                .alias("l")
                .description("Only list the local configuration."),
        )?
        .with_action(|options| {
            println!("Started list func.");
            print_options(&options)
        });

    let origin = Command::new("origin")
        .with_usage("Push the source code to the origin.")
        .with_option(
            OptionSpec::value("url")
                .alias("u")
                .description("Remote URL to push to.")
                .default_value(DEFAULT_ORIGIN_URL),
        )?
        .with_action(|options| {
            println!("Started push origin func.");
            print_options(&options)
        });

    let push = Command::new("push")
        .with_usage("Push the source code.")
        .with_command(origin)?;

    Cli::new(name)
        .with_version(VERSION)
        .with_default_config_option()?
        .with_action(move |options| run_root(&system, &options))
        .with_command(list)?
        .with_command(push)
}

fn run_root(system: &dyn System, options: &ParsedOptions) -> Result<()> {
    if let Some(config) = Config::from_options(system, options)? {
        let keys: Vec<&str> = config.keys().collect();
        info!("Configuration has {} top-level keys", keys.len());
        println!("Configuration keys: {}", keys.join(", "));
    }
    print_options(options)
}

fn print_options(options: &ParsedOptions) -> Result<()> {
    let json = serde_json::to_string_pretty(options).context("Failed to serialize options")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Outcome;
    use crate::system::MockSystem;

    #[test]
    fn test_demo_usage() {
        let cli = build_cli("argtree", MockSystem::new()).unwrap();
        let mut out = Vec::new();
        let outcome = cli.run_from(&["-h"], &mut out).unwrap();

        assert_eq!(outcome, Outcome::HelpShown);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Usage: argtree [--help|-h] [--version|-v] [--config|-c] [list|push]\n"
        );
    }

    #[test]
    fn test_root_reads_config_file() {
        let system = MockSystem::new()
            .with_file("/etc/argtree.yaml", b"key1: value1\n")
            .unwrap();
        let cli = build_cli("argtree", system).unwrap();
        let mut out = Vec::new();

        let outcome = cli.run_from(&["-c", "/etc/argtree.yaml"], &mut out).unwrap();
        assert_eq!(
            outcome,
            Outcome::Dispatched {
                command: "argtree".to_owned()
            }
        );
    }

    #[test]
    fn test_root_reports_missing_config_file() {
        let cli = build_cli("argtree", MockSystem::new()).unwrap();
        let mut out = Vec::new();

        let err = cli
            .run_from(&["--config=/missing.yaml"], &mut out)
            .unwrap_err();
        let cause = err.root_cause().downcast_ref::<CliError>();
        assert!(matches!(cause, Some(CliError::Configuration { .. })));
    }

    #[test]
    fn test_push_without_target_shows_usage() {
        let cli = build_cli("argtree", MockSystem::new()).unwrap();
        let mut out = Vec::new();

        let outcome = cli.run_from(&["push"], &mut out).unwrap();
        assert_eq!(
            outcome,
            Outcome::UsageShown {
                command: "push".to_owned()
            }
        );
        assert_eq!(String::from_utf8(out).unwrap(), "Usage: push [origin]\n");
    }
}
