//! Message schemas
//!
//! Content objects published to the log. The `type` field selects the
//! variant; field names match what other git-ssb clients read.

use super::SsbError;
use crate::core::RepoId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Creates a repo. The message key becomes the repo id.
    #[serde(rename = "git-repo")]
    GitRepo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upstream: Option<RepoId>,
    },

    /// Names a repo.
    #[serde(rename = "about")]
    About { about: RepoId, name: String },

    /// Asks for `head_repo:head_branch` to be merged into `repo:branch`.
    #[serde(rename = "pull-request")]
    PullRequest {
        repo: RepoId,
        branch: String,
        head_repo: RepoId,
        head_branch: String,
        text: String,
    },
}

impl Message {
    pub fn git_repo(upstream: Option<RepoId>) -> Self {
        Message::GitRepo { upstream }
    }

    pub fn name(repo: RepoId, name: &str) -> Result<Self, SsbError> {
        if name.trim().is_empty() {
            return Err(SsbError::Schema("name must not be empty".to_string()));
        }
        Ok(Message::About {
            about: repo,
            name: name.to_string(),
        })
    }

    pub fn pull_request(
        base: (RepoId, String),
        head: (RepoId, String),
        text: &str,
    ) -> Result<Self, SsbError> {
        if base.1.is_empty() || head.1.is_empty() {
            return Err(SsbError::Schema("branch must not be empty".to_string()));
        }
        if text.trim().is_empty() {
            return Err(SsbError::Schema(
                "pull-request text must not be empty".to_string(),
            ));
        }
        Ok(Message::PullRequest {
            repo: base.0,
            branch: base.1,
            head_repo: head.0,
            head_branch: head.1,
            text: text.to_string(),
        })
    }

    /// Value of the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::GitRepo { .. } => "git-repo",
            Message::About { .. } => "about",
            Message::PullRequest { .. } => "pull-request",
        }
    }

    pub fn to_json(&self) -> Result<String, SsbError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const ID: &str = "%jWIfIWAa1qErgy1+t8Ef6R4eVlP2BYxUNhr6Ltrtnbo=.sha256";
    const HEAD_ID: &str = "%Rfv3pdLXgqSKWYHxR1OGIyWfZ5lrIOkiwfuGKOjpyaA=.sha256";

    fn id(s: &str) -> RepoId {
        RepoId::parse(s).unwrap()
    }

    fn encoded(msg: &Message) -> Value {
        serde_json::from_str(&msg.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_git_repo_without_upstream() {
        assert_eq!(encoded(&Message::git_repo(None)), json!({"type": "git-repo"}));
    }

    #[test]
    fn test_git_repo_with_upstream() {
        assert_eq!(
            encoded(&Message::git_repo(Some(id(ID)))),
            json!({"type": "git-repo", "upstream": ID})
        );
    }

    #[test]
    fn test_about() {
        let msg = Message::name(id(ID), "my-project").unwrap();
        assert_eq!(msg.kind(), "about");
        assert_eq!(
            encoded(&msg),
            json!({"type": "about", "about": ID, "name": "my-project"})
        );
    }

    #[test]
    fn test_about_rejects_empty_name() {
        assert!(Message::name(id(ID), "  ").is_err());
    }

    #[test]
    fn test_pull_request() {
        let msg = Message::pull_request(
            (id(ID), "master".into()),
            (id(HEAD_ID), "feature".into()),
            "Please merge",
        )
        .unwrap();
        assert_eq!(
            encoded(&msg),
            json!({
                "type": "pull-request",
                "repo": ID,
                "branch": "master",
                "head_repo": HEAD_ID,
                "head_branch": "feature",
                "text": "Please merge",
            })
        );
    }

    #[test]
    fn test_pull_request_requires_text() {
        assert!(Message::pull_request(
            (id(ID), "master".into()),
            (id(HEAD_ID), "feature".into()),
            "\n",
        )
        .is_err());
    }

    #[test]
    fn test_decode_git_repo_content() {
        let content = json!({"type": "git-repo", "upstream": ID, "extra": 1});
        let msg: Message = serde_json::from_value(content).unwrap();
        assert_eq!(msg, Message::git_repo(Some(id(ID))));
    }
}
