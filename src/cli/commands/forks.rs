//! Forks command implementation

use crate::cli::dispatch::{CliError, Context};
use crate::cli::output::Output;
use crate::core::{RepoId, Resolver};
use crate::ssb::RepoSummary;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// Run the forks command
///
/// Prints the fork tree below the repo, one `ssb://` URL per line with its
/// author, indented two spaces per level.
pub fn run_forks(
    ctx: &Context<'_>,
    out: &mut dyn Write,
    repo: Option<&str>,
) -> Result<(), CliError> {
    let resolver = Resolver::new(ctx.git);
    let repo_id = resolver.resolve_id(repo).map_err(CliError::NoRepo)?;

    let spinner = Output::spinner("Looking for forks...");
    let listed = ctx.repos.list_repos();
    spinner.finish_and_clear();
    let repos = listed?;

    let lines = fork_tree(&repos, &repo_id);
    if lines.is_empty() {
        Output::info(&format!("No forks of {}", repo_id));
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Render the forks below `root`, depth first, in log order.
fn fork_tree(repos: &[RepoSummary], root: &RepoId) -> Vec<String> {
    let mut children: HashMap<&RepoId, Vec<&RepoSummary>> = HashMap::new();
    for repo in repos {
        if let Some(upstream) = &repo.upstream {
            children.entry(upstream).or_default().push(repo);
        }
    }

    let mut seen = HashSet::from([root]);
    let mut lines = Vec::new();
    walk(&children, root, 0, &mut seen, &mut lines);
    lines
}

fn walk<'a>(
    children: &HashMap<&'a RepoId, Vec<&'a RepoSummary>>,
    id: &RepoId,
    depth: usize,
    seen: &mut HashSet<&'a RepoId>,
    lines: &mut Vec<String>,
) {
    let Some(forks) = children.get(id) else {
        return;
    };
    for &fork in forks {
        // a repo reachable twice is listed once
        if !seen.insert(&fork.id) {
            continue;
        }
        lines.push(format!(
            "{}{}  {}",
            "  ".repeat(depth),
            fork.id.to_url(),
            fork.author
        ));
        walk(children, &fork.id, depth + 1, seen, lines);
    }
}
