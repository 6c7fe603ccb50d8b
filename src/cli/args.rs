//! Command-line arguments
//!
//! clap's own help and version handling is turned off: `--help` and
//! `--version` are plain flags so the dispatcher can print the per-command
//! help blocks, and `-h` is free for `pull-request --head`.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "git-ssb", bin_name = "git ssb")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Show help for the command
    #[arg(long, global = true)]
    pub help: bool,

    /// Print the version
    #[arg(long, global = true)]
    pub version: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a git repo on SSB
    Create {
        /// Name of the remote to add
        remote_name: Option<String>,
    },
    /// Fork a git repo on SSB
    Fork {
        /// `[<upstream>] <remote_name>`
        args: Vec<String>,
    },
    /// List forks of a repo
    Forks {
        /// Repo id, URL, or git remote name
        repo: Option<String>,
    },
    /// Name a repo
    Name {
        /// `[<repo>] <name>`
        args: Vec<String>,
    },
    /// Create a pull-request
    #[command(name = "pull-request")]
    PullRequest {
        /// Base repo/branch, `[<repo>:]<branch>`
        #[arg(short = 'b', long)]
        base: Option<String>,
        /// Head repo/branch, `[<repo>:]<branch>`
        #[arg(short = 'h', long)]
        head: Option<String>,
        /// Pull-request text
        #[arg(short = 'm', long, conflicts_with = "file")]
        message: Option<String>,
        /// Read the pull-request text from a file (`-` for stdin)
        #[arg(short = 'F', long)]
        file: Option<PathBuf>,
    },
    /// Serve a web server for repos
    Web {
        /// `host`, `:port` or `host:port`
        addr: Option<String>,
        /// Make the instance read-only
        #[arg(long)]
        public: bool,
    },
    /// Get help about a command
    Help { command: Option<String> },
    /// Print the version
    Version,
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Commands {
    /// The verb as the user typed it.
    pub fn name(&self) -> &str {
        match self {
            Commands::Create { .. } => "create",
            Commands::Fork { .. } => "fork",
            Commands::Forks { .. } => "forks",
            Commands::Name { .. } => "name",
            Commands::PullRequest { .. } => "pull-request",
            Commands::Web { .. } => "web",
            Commands::Help { .. } => "help",
            Commands::Version => "version",
            Commands::External(args) => args.first().map(String::as_str).unwrap_or(""),
        }
    }
}
