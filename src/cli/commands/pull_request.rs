//! Pull-request command implementation
//!
//! Head defaults to the default repo and the checked-out branch. Base
//! defaults to the upstream of the head repo (or the head repo itself) and
//! that repo's default branch.

use crate::cli::dispatch::{CliError, Context};
use crate::cli::output::Output;
use crate::core::{RepoId, Resolver};
use crate::git::LocalGit;
use crate::ssb::{Message, RepoStore};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Branch used for a base repo with no pushed heads.
pub const FALLBACK_BASE_BRANCH: &str = "master";

/// Options of `git ssb pull-request`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PullRequestArgs<'a> {
    pub base: Option<&'a str>,
    pub head: Option<&'a str>,
    pub message: Option<&'a str>,
    pub file: Option<&'a Path>,
}

/// A repo and branch, both resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub repo: RepoId,
    pub branch: String,
}

/// Run the pull-request command
pub fn run_pull_request(
    ctx: &Context<'_>,
    out: &mut dyn Write,
    args: &PullRequestArgs<'_>,
) -> Result<(), CliError> {
    let resolver = Resolver::new(ctx.git);
    let head = resolve_head(&resolver, ctx.git, args.head)?;
    let base = resolve_base(&resolver, ctx.repos, &head, args.base)?;
    debug!(?head, ?base, "resolved pull-request");

    if head == base {
        return Err(CliError::Usage(format!(
            "head and base are both {}:{}",
            head.repo, head.branch
        )));
    }

    let text = read_text(args.message, args.file)?;
    let message = Message::pull_request(
        (base.repo.clone(), base.branch.clone()),
        (head.repo.clone(), head.branch.clone()),
        &text,
    )?;

    let spinner = Output::spinner("Publishing pull-request...");
    let published = ctx.log.publish(&message);
    spinner.finish_and_clear();
    let key = published?;

    info!(key = %key, "published pull-request");
    writeln!(out, "{}", key)?;
    Ok(())
}

/// Resolve `-h`: an address, or the default repo and the checked-out branch.
pub fn resolve_head<G: LocalGit + ?Sized>(
    resolver: &Resolver<'_, G>,
    git: &G,
    head: Option<&str>,
) -> Result<Target, CliError> {
    let (repo, branch) = match head {
        Some(input) => {
            let addr = resolver.parse_address(input)?;
            (addr.repo, addr.branch)
        }
        None => (None, git.current_branch()?),
    };
    let repo = match repo {
        Some(repo) => repo,
        None => resolver.default_ref()?,
    };
    Ok(Target {
        repo: resolver.repo_id(&repo)?,
        branch,
    })
}

/// Resolve `-b` relative to an already resolved head.
pub fn resolve_base<G: LocalGit + ?Sized>(
    resolver: &Resolver<'_, G>,
    repos: &dyn RepoStore,
    head: &Target,
    base: Option<&str>,
) -> Result<Target, CliError> {
    let addr = base.map(|b| resolver.parse_address(b)).transpose()?;

    let repo = match addr.as_ref().and_then(|a| a.repo.as_ref()) {
        Some(repo) => resolver.repo_id(repo)?,
        None => repos
            .get_repo(&head.repo)?
            .upstream
            .unwrap_or_else(|| head.repo.clone()),
    };
    let branch = match addr {
        Some(addr) => addr.branch,
        None => repos
            .default_branch(&repo)?
            .unwrap_or_else(|| FALLBACK_BASE_BRANCH.to_string()),
    };
    Ok(Target { repo, branch })
}

/// Pull-request text from `-m`, or from `-F` (`-` for stdin).
fn read_text(message: Option<&str>, file: Option<&Path>) -> Result<String, CliError> {
    let text = match (message, file) {
        (Some(message), _) => message.to_string(),
        (None, Some(path)) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            text
        }
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?
        }
        (None, None) => String::new(),
    };

    if text.trim().is_empty() {
        return Err(CliError::Usage(
            "missing pull-request message (use -m <message> or -F <file>)".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_text_from_message() {
        assert_eq!(read_text(Some("hello"), None).unwrap(), "hello");
    }

    #[test]
    fn test_text_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title\n\nBody").unwrap();
        assert_eq!(
            read_text(None, Some(file.path())).unwrap(),
            "Title\n\nBody\n"
        );
    }

    #[test]
    fn test_text_missing() {
        let err = read_text(None, None).unwrap_err();
        assert!(err.to_string().contains("missing pull-request message"));
        assert!(read_text(Some("  \n"), None).is_err());
    }

    #[test]
    fn test_text_unreadable_file() {
        let err = read_text(None, Some(Path::new("/nonexistent/git-ssb-msg"))).unwrap_err();
        assert!(matches!(err, CliError::ReadFile { .. }));
    }
}
