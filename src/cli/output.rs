//! CLI output formatting
//!
//! Results that scripts consume (repo URLs, message keys, fork lists) go to
//! stdout through the writer each command is given. Everything here goes to
//! stderr.

use super::PROG;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Output helper for consistent CLI formatting
pub struct Output;

impl Output {
    /// Print a fatal error line
    pub fn fatal(message: &str) {
        eprintln!("{}", fatal_line(message));
    }

    /// Print an info message
    pub fn info(message: &str) {
        eprintln!("{} {}", "ℹ".blue(), message);
    }

    /// Create a spinner with a message. Hidden when stderr is not a terminal.
    pub fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded template must be valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

/// `git ssb: <message>`
pub fn fatal_line(message: &str) -> String {
    format!("{}: {}", PROG, message)
}
