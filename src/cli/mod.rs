//! CLI layer
//!
//! Argument parsing, help text and dispatch to the command handlers.

pub mod args;
pub mod commands;
pub mod dispatch;
pub mod help;
pub mod output;

pub use args::{Cli, Commands};
pub use dispatch::{dispatch, CliError, Context};
pub use output::Output;

/// Program name as shown in usage and error lines.
pub const PROG: &str = "git ssb";
