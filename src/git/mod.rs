//! Local git access
//!
//! Everything this tool needs from the local checkout goes through the
//! `git` binary (remotes, config) or libgit2 (HEAD). Nothing is cached: each
//! call re-queries the repository.

pub mod remote;

pub use remote::{LocalGit, RemoteTable};

use crate::util::log_cmd;
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during git operations
#[derive(Error, Debug)]
pub enum GitError {
    /// The git tool could not be used here: missing binary, or not inside a repository.
    #[error("{0}")]
    Environment(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("No such remote '{0}'")]
    RemoteNotFound(String),

    #[error("HEAD is detached; check out a branch or pass a branch explicitly")]
    DetachedHead,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Git collaborator backed by the `git` executable and libgit2.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new<P: Into<PathBuf>>(workdir: P) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Git collaborator for the process's current directory.
    pub fn current_dir() -> Result<Self, GitError> {
        let cwd = std::env::current_dir()
            .map_err(|e| GitError::Environment(format!("cannot read current directory: {}", e)))?;
        Ok(Self::new(cwd))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run `git <args>` in the working directory and return its raw output.
    pub(crate) fn run(&self, args: &[&str]) -> Result<Output, GitError> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.workdir);
        log_cmd(&cmd);
        cmd.output()
            .map_err(|e| GitError::Environment(format!("unable to run git: {}", e)))
    }

    /// Read a single git config value. Any failure is reported as unset.
    pub fn config_get(&self, key: &str) -> Option<String> {
        match self.run(&["config", "--get", key]) {
            Ok(output) if output.status.success() => {
                let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if value.is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
            Ok(_) => None,
            Err(e) => {
                debug!(key, error = %e, "git config unavailable");
                None
            }
        }
    }

    fn open(&self) -> Result<Repository, GitError> {
        Repository::discover(&self.workdir).map_err(|e| {
            GitError::Environment(format!(
                "not a git repository: {}: {}",
                self.workdir.display(),
                e.message()
            ))
        })
    }
}

/// Get the name of the checked-out branch.
///
/// An unborn branch (fresh repository, no commits yet) still has a name.
pub fn get_current_branch(repo: &Repository) -> Result<String, GitError> {
    match repo.head() {
        Ok(head) if head.is_branch() => head
            .shorthand()
            .map(str::to_string)
            .ok_or_else(|| GitError::OperationFailed("branch name is not UTF-8".to_string())),
        Ok(_) => Err(GitError::DetachedHead),
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD")?;
            head.symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(str::to_string)
                .ok_or(GitError::DetachedHead)
        }
        Err(e) => Err(GitError::Git(e)),
    }
}

impl LocalGit for GitCli {
    fn current_branch(&self) -> Result<String, GitError> {
        let repo = self.open()?;
        get_current_branch(&repo)
    }
}
