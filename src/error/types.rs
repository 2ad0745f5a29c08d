//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for argtree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CliError {
    /// A token looks like an option but the current command does not define it
    #[error("Unknown option: {option}")]
    UnknownOption { option: String },

    /// A positional token matches no child of the current command
    #[error("Unknown sub command: {name}")]
    UnknownSubcommand { name: String },

    /// Two options of one command share a name
    #[error("Option '--{name}' is already registered on command '{command}'")]
    DuplicateOption { command: String, name: String },

    /// Two options of one command share an alias
    #[error("Alias '-{alias}' is already registered on command '{command}'")]
    DuplicateAlias { command: String, alias: String },

    /// Two children of one command share a name
    #[error("Sub command '{name}' is already registered on command '{parent}'")]
    DuplicateCommand { parent: String, name: String },

    /// Only the root command may have an empty name
    #[error("Sub commands of '{parent}' must have a name")]
    UnnamedCommand { parent: String },

    /// Configuration Error - missing or invalid configuration file
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CliError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::UnknownOption { .. } => 2,
            Self::UnknownSubcommand { .. } => 3,
            Self::DuplicateOption { .. }
            | Self::DuplicateAlias { .. }
            | Self::DuplicateCommand { .. }
            | Self::UnnamedCommand { .. } => 4,
        }
    }

    /// Whether this error was raised while building the command tree
    #[must_use]
    #[inline]
    pub const fn is_registration_conflict(&self) -> bool {
        matches!(
            *self,
            Self::DuplicateOption { .. }
                | Self::DuplicateAlias { .. }
                | Self::DuplicateCommand { .. }
                | Self::UnnamedCommand { .. }
        )
    }

    /// Create an unknown option error
    #[inline]
    pub fn unknown_option<S: Into<String>>(option: S) -> Self {
        Self::UnknownOption {
            option: option.into(),
        }
    }

    /// Create an unknown sub command error
    #[inline]
    pub fn unknown_subcommand<S: Into<String>>(name: S) -> Self {
        Self::UnknownSubcommand { name: name.into() }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
