//! Command dispatch
//!
//! Maps a parsed command line onto a command handler. Handlers return
//! errors instead of exiting; only `main` turns a [`CliError`] into the
//! `git ssb: <message>` line and exit code 1.

use super::args::{Cli, Commands};
use super::commands;
use super::help;
use crate::core::{split_repo_args, ResolveError};
use crate::git::{GitError, LocalGit};
use crate::ssb::web::WebAddrError;
use crate::ssb::{MessageLog, RepoStore, SsbError, WebServer};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Remote added by `create` when no name is given.
pub const DEFAULT_REMOTE_NAME: &str = "ssb";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No such command '{0}'")]
    UnknownCommand(String),

    #[error("No help for command '{0}'")]
    NoHelp(String),

    #[error("{0}")]
    Usage(String),

    #[error("Remote '{0}' already exists")]
    RemoteExists(String),

    #[error("unable to find git-ssb upstream repo: {0}")]
    NoUpstream(#[source] ResolveError),

    #[error("unable to find git-ssb repo: {0}")]
    NoRepo(#[source] ResolveError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Ssb(#[from] SsbError),

    #[error(transparent)]
    WebAddr(#[from] WebAddrError),

    #[error("unable to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Collaborators a command may call.
pub struct Context<'a> {
    pub git: &'a dyn LocalGit,
    pub repos: &'a dyn RepoStore,
    pub log: &'a dyn MessageLog,
    pub web: &'a dyn WebServer,
}

/// Run one parsed command line. Command output is written to `out`.
pub fn dispatch(cli: Cli, ctx: &Context<'_>, out: &mut dyn Write) -> Result<(), CliError> {
    if cli.help {
        return help::write_help(out, cli.command.as_ref().map(Commands::name));
    }
    if cli.version {
        return write_version(out);
    }

    let Some(command) = cli.command else {
        return help::write_help(out, None);
    };
    debug!(command = command.name(), "dispatch");

    match command {
        Commands::Create { remote_name } => commands::create::run_create(
            ctx,
            out,
            remote_name.as_deref().unwrap_or(DEFAULT_REMOTE_NAME),
        ),
        Commands::Fork { args } => match split_repo_args(&args) {
            Some((upstream, remote_name)) => {
                commands::fork::run_fork(ctx, out, upstream, remote_name)
            }
            None => help::write_help(out, Some("fork")),
        },
        Commands::Forks { repo } => commands::forks::run_forks(ctx, out, repo.as_deref()),
        Commands::Name { args } => match split_repo_args(&args) {
            Some((repo, name)) => commands::name::run_name(ctx, out, repo, name),
            None => help::write_help(out, Some("name")),
        },
        Commands::PullRequest {
            base,
            head,
            message,
            file,
        } => commands::pull_request::run_pull_request(
            ctx,
            out,
            &commands::pull_request::PullRequestArgs {
                base: base.as_deref(),
                head: head.as_deref(),
                message: message.as_deref(),
                file: file.as_deref(),
            },
        ),
        Commands::Web { addr, public } => {
            commands::web::run_web(ctx, addr.as_deref(), public)
        }
        Commands::Help { command } => help::write_help(out, command.as_deref()),
        Commands::Version => write_version(out),
        Commands::External(args) => Err(CliError::UnknownCommand(
            args.into_iter().next().unwrap_or_default(),
        )),
    }
}

fn write_version(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
