//! Peer-network collaborators
//!
//! Repo storage, the append-only message log and the web browser all live
//! outside this tool. The traits here are the narrow interfaces the commands
//! call; [`sbot::SbotClient`] and [`web::WebProcess`] implement them by
//! driving external programs.

pub mod sbot;
pub mod schema;
pub mod web;

pub use sbot::SbotClient;
pub use schema::Message;
pub use web::{WebOptions, WebProcess};

use crate::core::RepoId;
use thiserror::Error;

/// Errors reported by peer-network collaborators
#[derive(Error, Debug)]
pub enum SsbError {
    #[error("'{0}' not found in PATH; is the peer server installed?")]
    NotInstalled(String),

    #[error("unable to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed: {message}")]
    Failed { program: String, message: String },

    #[error("Failed to parse server reply: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected server reply: {0}")]
    UnexpectedReply(String),

    #[error("{0} is not a git-ssb repo")]
    NotARepo(RepoId),

    #[error("Invalid message: {0}")]
    Schema(String),
}

/// A repo as recorded by its creation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSummary {
    pub id: RepoId,
    /// Feed id of the repo's creator
    pub author: String,
    /// Repo this one was forked from
    pub upstream: Option<RepoId>,
}

/// Repo storage on the peer network.
pub trait RepoStore {
    /// Create a repo, optionally recording the repo it was forked from.
    fn create_repo(&self, upstream: Option<&RepoId>) -> Result<RepoId, SsbError>;

    fn get_repo(&self, id: &RepoId) -> Result<RepoSummary, SsbError>;

    /// Every repo known to the local peer, in log order.
    fn list_repos(&self) -> Result<Vec<RepoSummary>, SsbError>;

    /// Branch a repo's pushes treat as default, if any were pushed.
    fn default_branch(&self, id: &RepoId) -> Result<Option<String>, SsbError>;
}

/// The local peer's append-only log.
pub trait MessageLog {
    /// Publish a message and return its key.
    fn publish(&self, message: &Message) -> Result<String, SsbError>;
}

/// Repo browser served over HTTP.
pub trait WebServer {
    /// Serve until the user stops the process.
    fn serve(&self, options: &WebOptions) -> Result<(), SsbError>;
}
