//! One-line usage rendering

use crate::cli::command::Command;
use core::fmt::Write as _;

/// Render `Usage: <name> [--opt|-o] ... [child|child]` for a command
///
/// Options appear in registration order, then the children in the order
/// they were attached.
#[must_use]
#[inline]
pub fn render_usage(command: &Command) -> String {
    let mut usage = format!("Usage: {}", command.name());

    for option in command.options().iter() {
        let name = option.name();
        match option.alias_name() {
            Some(alias) if !name.is_empty() => {
                let _ = write!(usage, " [--{name}|-{alias}]");
            }
            Some(alias) => {
                let _ = write!(usage, " [-{alias}]");
            }
            None if !name.is_empty() => {
                let _ = write!(usage, " [--{name}]");
            }
            None => {}
        }
    }

    if !command.commands().is_empty() {
        let names: Vec<&str> = command
            .commands()
            .iter()
            .map(Command::name)
            .collect();
        let _ = write!(usage, " [{}]", names.join("|"));
    }

    usage
}
