//! Top-level runner with the reserved help, version and config options

use crate::cli::command::Command;
use crate::cli::dispatch::{self, Outcome};
use crate::cli::option::{OptionRegistry, OptionSpec, ParsedOptions};
use crate::cli::usage::render_usage;
use crate::error::CliError;
use anyhow::{Context as _, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

pub const OPT_CONFIG_NAME: &str = "config";
pub const OPT_CONFIG_ALIAS: &str = "c";
pub const OPT_CONFIG_DESC: &str =
    "Specify the configuration file to use. Supported formats: JSON, YAML, TOML.";

pub const OPT_HELP_NAME: &str = "help";
pub const OPT_HELP_ALIAS: &str = "h";
pub const OPT_HELP_DESC: &str = "Display a list of available commands and global options.";

pub const OPT_VERSION_NAME: &str = "version";
pub const OPT_VERSION_ALIAS: &str = "v";
pub const OPT_VERSION_DESC: &str = "Show the version of the CLI tool.";

/// Owns the root command and the version string
///
/// Every run builds its own option state, so one `Cli` can be run many times
/// and shared between threads.
#[derive(Debug)]
pub struct Cli {
    root: Command,
    version: String,
}

impl Cli {
    /// Create a runner whose root command carries the reserved help and
    /// version flags
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Self {
        let mut root = Command::new(name);
        root.set_options(OptionRegistry::reserved([
            OptionSpec::flag(OPT_HELP_NAME)
                .alias(OPT_HELP_ALIAS)
                .description(OPT_HELP_DESC),
            OptionSpec::flag(OPT_VERSION_NAME)
                .alias(OPT_VERSION_ALIAS)
                .description(OPT_VERSION_DESC),
        ]));

        Self {
            root,
            version: String::new(),
        }
    }

    /// Create a runner named after the running executable
    #[must_use]
    #[inline]
    pub fn from_env() -> Self {
        Self::new(program_name())
    }

    #[must_use]
    #[inline]
    pub fn with_version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = version.into();
        self
    }

    /// Set the action run when no sub command is selected
    #[must_use]
    #[inline]
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(ParsedOptions) -> Result<()> + Send + Sync + 'static,
    {
        self.root.set_action(Box::new(action));
        self
    }

    /// Register the reserved `--config|-c` value option on the root command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The root command already defines `config` or `-c`
    #[inline]
    pub fn with_default_config_option(mut self) -> Result<Self, CliError> {
        self.root.add_option(
            OptionSpec::value(OPT_CONFIG_NAME)
                .alias(OPT_CONFIG_ALIAS)
                .description(OPT_CONFIG_DESC),
        )?;
        Ok(self)
    }

    /// Register an option on the root command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The option name or alias is already registered on the root command
    #[inline]
    pub fn with_option(mut self, spec: OptionSpec) -> Result<Self, CliError> {
        self.root.add_option(spec)?;
        Ok(self)
    }

    /// Attach a sub command to the root command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sub command has an empty name
    /// - A sub command with the same name is already attached
    #[inline]
    pub fn with_command(mut self, command: Command) -> Result<Self, CliError> {
        self.root.add_command(command)?;
        Ok(self)
    }

    #[must_use]
    #[inline]
    pub const fn root(&self) -> &Command {
        &self.root
    }

    #[must_use]
    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Run against the process arguments, printing to standard output
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    ///
    /// # Errors
    ///
    /// See [`Cli::run_from`].
    #[inline]
    pub fn run(&self) -> Result<Outcome> {
        let args: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_from(&args, &mut out)
    }

    /// Run against an explicit argument vector (without the program name)
    ///
    /// An empty vector runs the root action with the root defaults. Otherwise
    /// `--help`/`-h` anywhere prints the root usage and stops, and
    /// `--version`/`-v` anywhere prints the version line before dispatch
    /// carries on.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An option or sub command is unknown (a [`CliError`], after the
    ///   diagnostic and usage were printed)
    /// - The selected action fails
    /// - Writing to `out` fails
    #[inline]
    pub fn run_from<S: AsRef<str>>(&self, args: &[S], out: &mut dyn Write) -> Result<Outcome> {
        if args.is_empty() {
            debug!("No arguments, running the root command");
            return dispatch::Resolution::at_root(&self.root).invoke(out);
        }

        if has_reserved_flag(args, OPT_HELP_NAME, OPT_HELP_ALIAS) {
            writeln!(out, "{}", render_usage(&self.root)).context("Failed to write usage")?;
            return Ok(Outcome::HelpShown);
        }

        if has_reserved_flag(args, OPT_VERSION_NAME, OPT_VERSION_ALIAS) {
            writeln!(out, "Version: {}", self.version).context("Failed to write version")?;
        }

        match dispatch::resolve(&self.root, args) {
            Ok(resolution) => resolution.invoke(out),
            Err(failure) => {
                failure.report(out)?;
                Err(failure.error.into())
            }
        }
    }
}

/// Exact `--name` or `-alias` token anywhere in the vector
fn has_reserved_flag<S: AsRef<str>>(args: &[S], name: &str, alias: &str) -> bool {
    args.iter().any(|arg| {
        let arg = arg.as_ref();
        arg.strip_prefix("--") == Some(name)
            || (!arg.starts_with("--") && arg.strip_prefix('-') == Some(alias))
    })
}

/// Base name of the running executable
#[must_use]
#[inline]
pub fn program_name() -> String {
    let name = std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_default();
    debug!("Program name resolved to '{}'", name);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_flag_matches_exact_tokens_only() {
        assert!(has_reserved_flag(&["list", "--help"], "help", "h"));
        assert!(has_reserved_flag(&["-h"], "help", "h"));
        assert!(!has_reserved_flag(&["--help=yes"], "help", "h"));
        assert!(!has_reserved_flag(&["--h"], "help", "h"));
        assert!(!has_reserved_flag(&["-help"], "help", "h"));
        assert!(!has_reserved_flag(&["help"], "help", "h"));
    }
}
