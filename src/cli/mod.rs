//! Command-line interface module
//!
//! Command tree, option registries, token resolution, dispatch and usage
//! rendering

pub mod command;
pub mod dispatch;
pub mod option;
pub mod resolve;
pub mod runner;
pub mod usage;

pub use command::{Action, Command};
pub use dispatch::{Failure, Outcome, Resolution, resolve};
pub use option::{OptionRegistry, OptionSpec, ParsedOption, ParsedOptions};
pub use resolve::resolve_option;
pub use runner::{Cli, program_name};
pub use usage::render_usage;
