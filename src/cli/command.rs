//! Command tree nodes

use crate::cli::option::{OptionRegistry, OptionSpec, ParsedOptions};
use crate::error::CliError;
use core::fmt;

/// Callback run when dispatch stops at a command
pub type Action = Box<dyn Fn(ParsedOptions) -> anyhow::Result<()> + Send + Sync>;

/// A node of the dispatch tree
///
/// Children are owned, so a tree is always finite and acyclic. Options and
/// children are validated as they are registered.
pub struct Command {
    name: String,
    usage: String,
    options: OptionRegistry,
    commands: Vec<Command>,
    action: Option<Action>,
}

impl Command {
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
            options: OptionRegistry::new(),
            commands: Vec::new(),
            action: None,
        }
    }

    /// Set the free-text usage description
    #[must_use]
    #[inline]
    pub fn with_usage<S: Into<String>>(mut self, usage: S) -> Self {
        self.usage = usage.into();
        self
    }

    /// Set the action run when dispatch ends at this command
    #[must_use]
    #[inline]
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(ParsedOptions) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Register an option on this command (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The option name or alias is already registered on this command
    #[inline]
    pub fn with_option(mut self, spec: OptionSpec) -> Result<Self, CliError> {
        self.add_option(spec)?;
        Ok(self)
    }

    /// Register an option on this command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The option name or alias is already registered on this command
    #[inline]
    pub fn add_option(&mut self, spec: OptionSpec) -> Result<(), CliError> {
        self.options.register(&self.name, spec)
    }

    /// Attach a sub command (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sub command has an empty name
    /// - A sub command with the same name is already attached
    #[inline]
    pub fn with_command(mut self, command: Self) -> Result<Self, CliError> {
        self.add_command(command)?;
        Ok(self)
    }

    /// Attach a sub command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sub command has an empty name
    /// - A sub command with the same name is already attached
    #[inline]
    pub fn add_command(&mut self, command: Self) -> Result<(), CliError> {
        if command.name.is_empty() {
            return Err(CliError::UnnamedCommand {
                parent: self.name.clone(),
            });
        }
        if self.find_command(&command.name).is_some() {
            return Err(CliError::DuplicateCommand {
                parent: self.name.clone(),
                name: command.name,
            });
        }
        self.commands.push(command);
        Ok(())
    }

    /// First child whose name equals `name`
    #[must_use]
    #[inline]
    pub fn find_command(&self, name: &str) -> Option<&Self> {
        self.commands.iter().find(|command| command.name == name)
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    #[must_use]
    #[inline]
    pub const fn options(&self) -> &OptionRegistry {
        &self.options
    }

    #[must_use]
    #[inline]
    pub fn commands(&self) -> &[Self] {
        &self.commands
    }

    #[must_use]
    #[inline]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub(crate) fn set_options(&mut self, options: OptionRegistry) {
        self.options = options;
    }

    pub(crate) fn set_action(&mut self, action: Action) {
        self.action = Some(action);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("options", &self.options)
            .field("commands", &self.commands)
            .field("action", &self.action.is_some())
            .finish()
    }
}
