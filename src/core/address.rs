//! `[<repo>:]<branch>` addresses
//!
//! Parsing happens in two stages. [`RawAddress::parse`] only splits the text;
//! turning the repo token into a [`RepoRef`] needs the remote table and is
//! done by [`crate::core::resolve::Resolver::parse_address`].
//!
//! The split is made at the last `:`. Git branch names cannot contain a
//! colon, while `ssb://` repo URLs always do.

use super::repo_ref::RepoRef;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty branch name in '{0}'")]
    EmptyBranchName(String),

    #[error("empty repo in '{0}'")]
    EmptyRepoReference(String),
}

/// An address split into its textual parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAddress {
    pub repo: Option<String>,
    pub branch: String,
}

impl RawAddress {
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();

        let (repo, branch) = match trimmed.rfind(':') {
            Some(idx) => (Some(&trimmed[..idx]), &trimmed[idx + 1..]),
            None => (None, trimmed),
        };

        if branch.is_empty() {
            return Err(AddressError::EmptyBranchName(input.to_string()));
        }
        if repo == Some("") {
            return Err(AddressError::EmptyRepoReference(input.to_string()));
        }

        Ok(Self {
            repo: repo.map(str::to_string),
            branch: branch.to_string(),
        })
    }
}

/// A parsed address. `repo` is absent when the input had no repo prefix,
/// in which case the caller applies its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub repo: Option<RepoRef>,
    pub branch: String,
}

impl Address {
    pub fn new(repo: Option<RepoRef>, branch: impl Into<String>) -> Self {
        Self {
            repo,
            branch: branch.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repo {
            Some(repo) => write!(f, "{}:{}", repo, self.branch),
            None => f.write_str(&self.branch),
        }
    }
}
