//! Fork command implementation

use super::create::create_with_remote;
use crate::cli::dispatch::{CliError, Context};
use crate::core::Resolver;
use std::io::Write;

/// Run the fork command
///
/// `upstream` is the explicit repo token, if the user gave one.
pub fn run_fork(
    ctx: &Context<'_>,
    out: &mut dyn Write,
    upstream: Option<&str>,
    remote_name: &str,
) -> Result<(), CliError> {
    let resolver = Resolver::new(ctx.git);
    let upstream_id = resolver
        .resolve_id(upstream)
        .map_err(CliError::NoUpstream)?;

    if remote_name.trim().is_empty() {
        return Err(CliError::Usage("missing remote name".to_string()));
    }

    create_with_remote(ctx, out, remote_name, Some(&upstream_id))
}
