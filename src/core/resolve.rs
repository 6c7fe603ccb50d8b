//! Repo reference resolution
//!
//! Turns user tokens into a [`RepoRef`], and a [`RepoRef`] into the
//! [`RepoId`] the peer network knows. When no token is given the default
//! order applies: remote `origin`, then remote `ssb`.

use super::address::{Address, AddressError, RawAddress};
use super::repo_ref::{RepoId, RepoRef};
use crate::git::{GitError, RemoteTable};
use thiserror::Error;
use tracing::debug;

/// Remotes tried, in order, when the user names no repo.
pub const DEFAULT_REMOTES: [&str; 2] = ["origin", "ssb"];

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no 'origin' or 'ssb' remote found")]
    NoDefaultRepo,

    #[error("'{0}' is not a git remote, repo id, or ssb:// URL")]
    UnknownRepoReference(String),

    #[error("remote '{name}' does not point to a git-ssb repo ({url})")]
    NotSsbRemote { name: String, url: String },

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Resolves repo tokens against a remote table.
pub struct Resolver<'a, R: RemoteTable + ?Sized> {
    remotes: &'a R,
}

impl<'a, R: RemoteTable + ?Sized> Resolver<'a, R> {
    pub fn new(remotes: &'a R) -> Self {
        Self { remotes }
    }

    /// The repo used when none is named.
    pub fn default_ref(&self) -> Result<RepoRef, ResolveError> {
        let remotes = self.remotes.list_remotes()?;
        for candidate in DEFAULT_REMOTES {
            if remotes.iter().any(|r| r == candidate) {
                debug!(remote = candidate, "using default remote");
                return Ok(RepoRef::RemoteName(candidate.to_string()));
            }
        }
        Err(ResolveError::NoDefaultRepo)
    }

    /// Resolve a token the user typed.
    ///
    /// Repo ids and `ssb://` URLs still resolve when the remote table cannot
    /// be read, e.g. outside a git checkout.
    pub fn explicit_ref(&self, token: &str) -> Result<RepoRef, ResolveError> {
        let is_remote = match self.remotes.has_remote(token) {
            Ok(is_remote) => is_remote,
            Err(GitError::Environment(reason)) => {
                debug!(token, %reason, "remote table unavailable");
                return RepoRef::classify(token, false)
                    .ok_or(ResolveError::Git(GitError::Environment(reason)));
            }
            Err(e) => return Err(e.into()),
        };
        RepoRef::classify(token, is_remote)
            .ok_or_else(|| ResolveError::UnknownRepoReference(token.to_string()))
    }

    /// Explicit token if given, otherwise the default order.
    pub fn resolve(&self, token: Option<&str>) -> Result<RepoRef, ResolveError> {
        match token {
            Some(token) => self.explicit_ref(token),
            None => self.default_ref(),
        }
    }

    /// The repo id a reference stands for.
    ///
    /// Remote names are looked up in the remote table; their URL must be an
    /// `ssb://` URL.
    pub fn repo_id(&self, repo: &RepoRef) -> Result<RepoId, ResolveError> {
        if let Some(id) = repo.direct_id() {
            return Ok(id);
        }
        match repo {
            RepoRef::RemoteName(name) => {
                let url = self.remotes.url_of(name)?;
                let id = RepoId::from_url(&url).map_err(|_| ResolveError::NotSsbRemote {
                    name: name.clone(),
                    url: url.clone(),
                })?;
                debug!(remote = %name, repo = %id, "resolved remote");
                Ok(id)
            }
            other => Err(ResolveError::UnknownRepoReference(other.to_string())),
        }
    }

    /// Shorthand for `resolve` followed by `repo_id`.
    pub fn resolve_id(&self, token: Option<&str>) -> Result<RepoId, ResolveError> {
        let repo = self.resolve(token)?;
        self.repo_id(&repo)
    }

    /// Parse `[<repo>:]<branch>`, resolving the repo part if present.
    pub fn parse_address(&self, input: &str) -> Result<Address, ResolveError> {
        let raw = RawAddress::parse(input)?;
        let repo = match raw.repo.as_deref() {
            Some(token) => Some(self.explicit_ref(token)?),
            None => None,
        };
        Ok(Address::new(repo, raw.branch))
    }
}

/// Split `[<repo>] <target>` positionals, as taken by `fork` and `name`.
///
/// One argument is the target with the default repo; two are an explicit
/// repo and the target. Any other count returns `None`.
pub fn split_repo_args(args: &[String]) -> Option<(Option<&str>, &str)> {
    match args {
        [target] => Some((None, target.as_str())),
        [repo, target] => Some((Some(repo.as_str()), target.as_str())),
        _ => None,
    }
}
