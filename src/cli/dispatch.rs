//! Walks the command tree over an argument vector
//!
//! Dispatch happens in two steps. [`resolve`] is pure: it consumes the tokens
//! left to right, descending into sub commands and recording option state in
//! a fresh [`ParsedOptions`]. [`Resolution::invoke`] then runs the action of
//! the command where the tokens ran out, or prints its usage.

use crate::cli::command::Command;
use crate::cli::option::ParsedOptions;
use crate::cli::resolve::{embedded_value, is_option_like, resolve_option};
use crate::cli::usage::render_usage;
use crate::error::CliError;
use anyhow::{Context as _, Result};
use std::io::Write;
use tracing::{debug, trace, warn};

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    /// The action of the named command ran
    Dispatched { command: String },
    /// The command where dispatch stopped has no action; its usage was printed
    UsageShown { command: String },
    /// The reserved help option was given; the root usage was printed
    HelpShown,
}

/// Successful walk: the matched commands, root first, and the merged options
#[derive(Debug)]
pub struct Resolution<'cmd> {
    root: &'cmd Command,
    descended: Vec<&'cmd Command>,
    options: ParsedOptions,
}

/// Failed walk: what went wrong and at which command
#[derive(Debug)]
pub struct Failure<'cmd> {
    pub error: CliError,
    pub command: &'cmd Command,
}

impl Failure<'_> {
    /// Print the diagnostic followed by the usage of the failing command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Writing to the output fails
    #[inline]
    pub fn report(&self, out: &mut dyn Write) -> Result<()> {
        write!(out, "{}\n\n{}\n", self.error, render_usage(self.command))
            .context("Failed to write usage")
    }
}

/// Match the argument vector against the tree rooted at `root`
///
/// Option tokens are only matched against the registry of the command being
/// visited. A value option takes the text after `=`, or else the next token
/// unless that one starts with `-`. A positional token must name a child,
/// whose options are then merged into the set before the walk continues
/// there.
///
/// # Errors
///
/// Returns a [`Failure`] if:
/// - An option token is not defined on the current command
/// - A positional token names no child of the current command
#[inline]
pub fn resolve<'cmd, S: AsRef<str>>(
    root: &'cmd Command,
    args: &[S],
) -> Result<Resolution<'cmd>, Failure<'cmd>> {
    let mut node = root;
    let mut descended = Vec::new();
    let mut options = ParsedOptions::from_registry(root.options());
    let mut index = 0;

    while let Some(token) = args.get(index).map(|arg| arg.as_ref()) {
        index += 1;

        if is_option_like(token) {
            let Some(spec) = resolve_option(token, node.options()) else {
                warn!("Unknown option '{}' for command '{}'", token, node.name());
                return Err(Failure {
                    error: CliError::unknown_option(token),
                    command: node,
                });
            };

            if !spec.expects_value() {
                trace!("Flag '{}' set", spec.name());
                options.mark_set(spec);
                continue;
            }

            if let Some(value) = embedded_value(token) {
                debug!("Option '{}' = '{}'", spec.name(), value);
                options.set_value(spec, value);
            } else if let Some(next) = args.get(index).map(|arg| arg.as_ref())
                && !next.starts_with('-')
            {
                debug!("Option '{}' = '{}'", spec.name(), next);
                options.set_value(spec, next);
                index += 1;
            } else {
                trace!("Option '{}' given without a value", spec.name());
            }
        } else {
            let Some(child) = node.find_command(token) else {
                warn!("Unknown sub command '{}' for command '{}'", token, node.name());
                return Err(Failure {
                    error: CliError::unknown_subcommand(token),
                    command: node,
                });
            };

            debug!("Descending into sub command '{}'", child.name());
            options.merge(child.options());
            descended.push(child);
            node = child;
        }
    }

    Ok(Resolution {
        root,
        descended,
        options,
    })
}

impl<'cmd> Resolution<'cmd> {
    /// Walk that stopped at the root before consuming any token
    pub(crate) fn at_root(root: &'cmd Command) -> Self {
        Self {
            root,
            descended: Vec::new(),
            options: ParsedOptions::from_registry(root.options()),
        }
    }

    /// The command where the walk stopped
    #[must_use]
    #[inline]
    pub fn command(&self) -> &'cmd Command {
        self.descended.last().copied().unwrap_or(self.root)
    }

    /// Matched commands, root first
    #[inline]
    pub fn path(&self) -> impl Iterator<Item = &'cmd Command> + '_ {
        core::iter::once(self.root).chain(self.descended.iter().copied())
    }

    #[must_use]
    #[inline]
    pub const fn options(&self) -> &ParsedOptions {
        &self.options
    }

    #[must_use]
    #[inline]
    pub fn into_options(self) -> ParsedOptions {
        self.options
    }

    /// Names of the matched commands below the root, space separated
    #[must_use]
    #[inline]
    pub fn command_path(&self) -> String {
        self.descended
            .iter()
            .map(|command| command.name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the action of the final command, or print its usage if it has none
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The action fails
    /// - Writing the usage fails
    #[inline]
    pub fn invoke(self, out: &mut dyn Write) -> Result<Outcome> {
        let command = self.command();
        let Some(action) = command.action() else {
            debug!("Command '{}' has no action, showing usage", command.name());
            writeln!(out, "{}", render_usage(command)).context("Failed to write usage")?;
            return Ok(Outcome::UsageShown {
                command: command.name().to_owned(),
            });
        };

        let label = self.command_path();
        debug!("Invoking action of '{}'", command.name());
        action(self.options).with_context(|| {
            if label.is_empty() {
                format!("Command '{}' failed", command.name())
            } else {
                format!("Command '{label}' failed")
            }
        })?;

        Ok(Outcome::Dispatched {
            command: command.name().to_owned(),
        })
    }
}
