//! `argtree` - A command tree argument parser
//!
//! This library resolves a raw argument vector against a tree of named
//! commands. Each command owns its options; options given before a sub
//! command stay visible to it, and the action of the command where the
//! tokens run out receives the merged option set.
//!
//! ```
//! use argtree::cli::{Cli, Command, OptionSpec, Outcome};
//!
//! let cli = Cli::new("app")
//!     .with_version("1.0.0")
//!     .with_command(
//!         Command::new("list")
//!             .with_option(OptionSpec::flag("local").alias("l"))
//!             .unwrap()
//!             .with_action(|options| {
//!                 assert!(options.is_set("local"));
//!                 Ok(())
//!             }),
//!     )
//!     .unwrap();
//!
//! let mut out = Vec::new();
//! let outcome = cli.run_from(&["list", "-l"], &mut out).unwrap();
//! assert_eq!(outcome, Outcome::Dispatched { command: "list".to_owned() });
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod system;
