//! Repo identifiers and references
//!
//! A repo on the peer network is named by the id of the message that created
//! it: `%` + base64(sha256) + `.sha256`. Users refer to repos by that id, by
//! an `ssb://<id>` URL, or by the name of a git remote whose URL is one.

use base64::{engine::general_purpose::STANDARD, Engine};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// URL scheme used for git remotes that point at peer-network repos.
pub const SSB_URL_PREFIX: &str = "ssb://";

static REPO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^%[A-Za-z0-9+/]{43}=\.sha256$").expect("hardcoded regex must be valid")
});

const HASH_LEN: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoIdError {
    #[error("'{0}' is not a repo id")]
    Malformed(String),

    #[error("'{0}' does not hash to 32 bytes")]
    BadHash(String),

    #[error("'{0}' is not an ssb:// URL")]
    NotSsbUrl(String),
}

/// Content-address of a repo on the peer network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoId(String);

impl RepoId {
    /// Validate the textual form of a repo id.
    pub fn parse(s: &str) -> Result<Self, RepoIdError> {
        if !REPO_ID_RE.is_match(s) {
            return Err(RepoIdError::Malformed(s.to_string()));
        }
        let encoded = &s[1..s.len() - ".sha256".len()];
        match STANDARD.decode(encoded) {
            Ok(hash) if hash.len() == HASH_LEN => Ok(Self(s.to_string())),
            _ => Err(RepoIdError::BadHash(s.to_string())),
        }
    }

    /// Parse an `ssb://<id>` URL. The id part may be percent-encoded.
    pub fn from_url(url: &str) -> Result<Self, RepoIdError> {
        let rest = url
            .strip_prefix(SSB_URL_PREFIX)
            .ok_or_else(|| RepoIdError::NotSsbUrl(url.to_string()))?;
        let rest = rest.trim_end_matches('/');

        if let Ok(id) = Self::parse(rest) {
            return Ok(id);
        }
        let decoded = urlencoding::decode(rest)
            .map_err(|_| RepoIdError::Malformed(rest.to_string()))?;
        Self::parse(&decoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `ssb://` URL a git remote uses for this repo.
    pub fn to_url(&self) -> String {
        format!("{}{}", SSB_URL_PREFIX, self.0)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RepoId {
    type Err = RepoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RepoId {
    type Error = RepoIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RepoId> for String {
    fn from(id: RepoId) -> Self {
        id.0
    }
}

/// How a user or a remote entry identifies a repo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoRef {
    /// A git remote; only meaningful alongside the remote table.
    RemoteName(String),
    /// A bare repo id.
    RepoId(RepoId),
    /// An `ssb://` URL, kept as the user wrote it.
    RepoUrl(String),
}

impl RepoRef {
    /// Classify a token by shape.
    ///
    /// `is_remote` says whether the token names an existing git remote; that
    /// takes precedence over any other reading of the token.
    pub fn classify(token: &str, is_remote: bool) -> Option<RepoRef> {
        if is_remote {
            Some(RepoRef::RemoteName(token.to_string()))
        } else if let Ok(id) = RepoId::parse(token) {
            Some(RepoRef::RepoId(id))
        } else if RepoId::from_url(token).is_ok() {
            Some(RepoRef::RepoUrl(token.to_string()))
        } else {
            None
        }
    }

    /// The repo id, when it can be known without the remote table.
    pub fn direct_id(&self) -> Option<RepoId> {
        match self {
            RepoRef::RemoteName(_) => None,
            RepoRef::RepoId(id) => Some(id.clone()),
            RepoRef::RepoUrl(url) => RepoId::from_url(url).ok(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoRef::RemoteName(name) => f.write_str(name),
            RepoRef::RepoId(id) => write!(f, "{}", id),
            RepoRef::RepoUrl(url) => f.write_str(url),
        }
    }
}
