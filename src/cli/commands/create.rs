//! Create command implementation

use crate::cli::dispatch::{CliError, Context};
use crate::cli::output::Output;
use crate::core::RepoId;
use std::io::Write;
use tracing::info;

/// Run the create command
pub fn run_create(
    ctx: &Context<'_>,
    out: &mut dyn Write,
    remote_name: &str,
) -> Result<(), CliError> {
    create_with_remote(ctx, out, remote_name, None)
}

/// Create a repo on the network and bind it to a new git remote.
///
/// The repo URL is printed before the remote is added, so it is not lost if
/// `git remote add` fails.
pub(crate) fn create_with_remote(
    ctx: &Context<'_>,
    out: &mut dyn Write,
    remote_name: &str,
    upstream: Option<&RepoId>,
) -> Result<(), CliError> {
    if ctx.git.has_remote(remote_name)? {
        return Err(CliError::RemoteExists(remote_name.to_string()));
    }

    let spinner = Output::spinner("Creating repo...");
    let created = ctx.repos.create_repo(upstream);
    spinner.finish_and_clear();
    let id = created?;

    let url = id.to_url();
    writeln!(out, "{}", url)?;
    ctx.git.add_remote(remote_name, &url)?;

    info!(remote = remote_name, repo = %id, upstream = ?upstream, "created repo");
    Output::info(&format!("Added remote '{}'", remote_name));
    Ok(())
}
