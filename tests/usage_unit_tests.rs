//! Unit tests for usage rendering

use argtree::cli::{Cli, Command, OptionSpec, render_usage};

#[test]
fn test_usage_of_leaf_without_options() {
    assert_eq!(render_usage(&Command::new("status")), "Usage: status");
}

#[test]
fn test_usage_option_forms() {
    let command = Command::new("tool")
        .with_option(OptionSpec::value("url").alias("u"))
        .unwrap()
        .with_option(OptionSpec::flag("force"))
        .unwrap()
        .with_option(OptionSpec::flag("").alias("q"))
        .unwrap();

    assert_eq!(render_usage(&command), "Usage: tool [--url|-u] [--force] [-q]");
}

#[test]
fn test_usage_skips_anonymous_option() {
    let command = Command::new("tool")
        .with_option(OptionSpec::flag(""))
        .unwrap();
    assert_eq!(render_usage(&command), "Usage: tool");
}

#[test]
fn test_usage_lists_children_in_order() {
    let command = Command::new("remote")
        .with_command(Command::new("show"))
        .unwrap()
        .with_command(Command::new("add"))
        .unwrap();

    assert_eq!(render_usage(&command), "Usage: remote [show|add]");
}

#[test]
fn test_root_usage_is_deterministic() {
    let cli = Cli::new("app")
        .with_default_config_option()
        .unwrap()
        .with_command(Command::new("list"))
        .unwrap()
        .with_command(Command::new("push"))
        .unwrap();

    let first = render_usage(cli.root());
    let second = render_usage(cli.root());
    assert_eq!(first, "Usage: app [--help|-h] [--version|-v] [--config|-c] [list|push]");
    assert_eq!(first, second);
}
