//! Line-oriented shell over the billing engine, usable interactively or
//! fed a script on stdin.

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
pub mod registry;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
