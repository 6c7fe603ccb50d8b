//! Name command implementation

use crate::cli::dispatch::{CliError, Context};
use crate::cli::output::Output;
use crate::core::Resolver;
use crate::ssb::Message;
use std::io::Write;
use tracing::info;

/// Run the name command
pub fn run_name(
    ctx: &Context<'_>,
    out: &mut dyn Write,
    repo: Option<&str>,
    name: &str,
) -> Result<(), CliError> {
    let resolver = Resolver::new(ctx.git);
    let repo_id = resolver.resolve_id(repo).map_err(CliError::NoRepo)?;

    if name.trim().is_empty() {
        return Err(CliError::Usage("missing name".to_string()));
    }
    let message = Message::name(repo_id.clone(), name)?;

    let spinner = Output::spinner("Publishing name...");
    let published = ctx.log.publish(&message);
    spinner.finish_and_clear();
    let key = published?;

    info!(repo = %repo_id, name, key = %key, "named repo");
    writeln!(out, "{}", key)?;
    Ok(())
}
