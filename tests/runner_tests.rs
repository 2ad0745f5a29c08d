//! Tests for the top-level runner and its reserved options

use argtree::cli::{Cli, Command, OptionSpec, Outcome};
use argtree::error::CliError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

fn run(cli: &Cli, args: &[&str]) -> (anyhow::Result<Outcome>, String) {
    let mut out = Vec::new();
    let result = cli.run_from(args, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_version_output_is_exact() {
    let cli = Cli::new("app").with_version("1.0.0").with_action(|_| Ok(()));

    let (result, output) = run(&cli, &["--version"]);
    result.unwrap();
    assert_eq!(output, "Version: 1.0.0\n");
}

#[test]
fn test_version_does_not_stop_dispatch() {
    let seen = Arc::new(Mutex::new(None));
    let recorded = Arc::clone(&seen);
    let cli = Cli::new("app")
        .with_version("2.3.4")
        .with_action(move |options| {
            *recorded.lock().unwrap() = Some(options.is_set("version"));
            Ok(())
        });

    let (result, output) = run(&cli, &["-v"]);
    assert_eq!(
        result.unwrap(),
        Outcome::Dispatched {
            command: "app".to_owned()
        }
    );
    assert_eq!(output, "Version: 2.3.4\n");
    assert_eq!(*seen.lock().unwrap(), Some(true));
}

#[test]
fn test_version_below_root_is_still_printed_then_rejected() {
    let cli = Cli::new("app")
        .with_version("1.0.0")
        .with_command(Command::new("list").with_action(|_| Ok(())))
        .unwrap();

    let (result, output) = run(&cli, &["list", "--version"]);
    assert_eq!(
        result.unwrap_err().downcast_ref::<CliError>(),
        Some(&CliError::unknown_option("--version"))
    );
    assert_eq!(
        output,
        "Version: 1.0.0\nUnknown option: --version\n\nUsage: list\n"
    );
}

#[test]
fn test_help_prints_root_usage_and_skips_actions() {
    let calls = Arc::new(AtomicUsize::new(0));
    let root_calls = Arc::clone(&calls);
    let list_calls = Arc::clone(&calls);
    let cli = Cli::new("app")
        .with_action(move |_| {
            root_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .with_command(Command::new("list").with_action(move |_| {
            list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }))
        .unwrap();

    for args in [&["--help"][..], &["list", "-h"][..], &["-h", "--bogus"][..]] {
        let (result, output) = run(&cli, args);
        assert_eq!(result.unwrap(), Outcome::HelpShown);
        assert_eq!(output, "Usage: app [--help|-h] [--version|-v] [list]\n");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_help_wins_over_version() {
    let cli = Cli::new("app").with_version("1.0.0");

    let (result, output) = run(&cli, &["--version", "--help"]);
    assert_eq!(result.unwrap(), Outcome::HelpShown);
    assert_eq!(output, "Usage: app [--help|-h] [--version|-v]\n");
}

#[test]
fn test_empty_args_without_root_action_show_usage() {
    let cli = Cli::new("app");

    let (result, output) = run(&cli, &[]);
    assert_eq!(
        result.unwrap(),
        Outcome::UsageShown {
            command: "app".to_owned()
        }
    );
    assert_eq!(output, "Usage: app [--help|-h] [--version|-v]\n");
}

#[test]
fn test_repeated_runs_do_not_leak_state() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&seen);
    let cli = Cli::new("app")
        .with_command(
            Command::new("list")
                .with_option(OptionSpec::flag("local").alias("l"))
                .unwrap()
                .with_option(OptionSpec::value("name").default_value("none"))
                .unwrap()
                .with_action(move |options| {
                    recorded.lock().unwrap().push((
                        options.is_set("local"),
                        options.value("name").map(str::to_owned),
                    ));
                    Ok(())
                }),
        )
        .unwrap();

    run(&cli, &["list", "-l", "--name=first"]).0.unwrap();
    run(&cli, &["list"]).0.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (true, Some("first".to_owned())),
            (false, Some("none".to_owned())),
        ]
    );
}

#[test]
fn test_concurrent_runs_share_one_tree() {
    let cli = Arc::new(
        Cli::new("app")
            .with_command(
                Command::new("echo")
                    .with_option(OptionSpec::value("text").alias("t"))
                    .unwrap()
                    .with_action(|options| {
                        let text = options.value("text").unwrap_or_default();
                        anyhow::ensure!(text.starts_with("thread-"), "unexpected text {text}");
                        Ok(())
                    }),
            )
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let cli = Arc::clone(&cli);
            thread::spawn(move || {
                let text = format!("thread-{i}");
                let mut out = Vec::new();
                cli.run_from(&["echo", "-t", text.as_str()], &mut out)
                    .map(|_| out.is_empty())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().unwrap());
    }
}
