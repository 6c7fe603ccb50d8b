//! Web command implementation

use crate::cli::dispatch::{CliError, Context};
use crate::ssb::WebOptions;

/// Run the web command
pub fn run_web(ctx: &Context<'_>, addr: Option<&str>, public: bool) -> Result<(), CliError> {
    let options = WebOptions::parse(addr, public)?;
    ctx.web.serve(&options)?;
    Ok(())
}
