//! Peer server client
//!
//! Talks to the local peer server through its command-line client
//! (`ssb-server` by default). Requests that carry a message send it as JSON
//! on stdin with `.` as the argument; replies are JSON on stdout, and
//! streaming calls print one JSON value after another.

use super::schema::Message;
use super::{MessageLog, RepoStore, RepoSummary, SsbError};
use crate::core::config::{Settings, APPNAME_ENV};
use crate::core::RepoId;
use crate::util::log_cmd;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

/// Branches preferred as a repo's default, in order.
const PREFERRED_DEFAULT_BRANCHES: [&str; 2] = ["master", "main"];

#[derive(Debug, Deserialize)]
struct PublishReply {
    key: String,
}

#[derive(Debug, Deserialize)]
struct MessageValue {
    author: String,
    content: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct LogEntry {
    key: String,
    value: MessageValue,
}

#[derive(Debug, Deserialize)]
struct UpdateContent {
    repo: Option<String>,
    #[serde(default)]
    refs: BTreeMap<String, Option<String>>,
}

/// Peer server reached through its CLI.
#[derive(Debug, Clone)]
pub struct SbotClient {
    program: String,
    appname: String,
}

impl SbotClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: settings.sbot.clone(),
            appname: settings.appname.clone(),
        }
    }

    fn call(&self, args: &[&str], input: Option<&str>) -> Result<String, SsbError> {
        let path = which::which(&self.program)
            .map_err(|_| SsbError::NotInstalled(self.program.clone()))?;

        let mut cmd = Command::new(path);
        cmd.args(args)
            .env(APPNAME_ENV, &self.appname)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        log_cmd(&cmd);

        let spawn_err = |source| SsbError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = cmd.spawn().map_err(spawn_err)?;
        let stdin = child.stdin.take();

        // stdin is written on its own thread while stdout is drained here
        let (written, output) = std::thread::scope(|scope| {
            let writer = match (input, stdin) {
                (Some(input), Some(mut stdin)) => {
                    Some(scope.spawn(move || stdin.write_all(input.as_bytes())))
                }
                _ => None,
            };
            let output = child.wait_with_output();
            let written = match writer {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
                None => Ok(()),
            };
            (written, output)
        });
        let output = output.map_err(spawn_err)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(SsbError::Failed {
                program: self.program.clone(),
                message,
            });
        }

        written.map_err(spawn_err)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn messages_by_type(&self, kind: &str) -> Result<Vec<LogEntry>, SsbError> {
        let out = self.call(&["messagesByType", "--type", kind], None)?;
        let entries = parse_entries(&out)?;
        debug!(kind, count = entries.len(), "read messages");
        Ok(entries)
    }
}

impl MessageLog for SbotClient {
    #[instrument(skip(self, message), fields(kind = message.kind()))]
    fn publish(&self, message: &Message) -> Result<String, SsbError> {
        let out = self.call(&["publish", "."], Some(&message.to_json()?))?;
        parse_publish_reply(&out)
    }
}

impl RepoStore for SbotClient {
    fn create_repo(&self, upstream: Option<&RepoId>) -> Result<RepoId, SsbError> {
        let key = self.publish(&Message::git_repo(upstream.cloned()))?;
        RepoId::parse(&key).map_err(|e| SsbError::UnexpectedReply(e.to_string()))
    }

    fn get_repo(&self, id: &RepoId) -> Result<RepoSummary, SsbError> {
        let out = self.call(&["get", id.as_str()], None)?;
        let value: MessageValue = serde_json::from_str(&out)?;
        summary_of(id.clone(), value).ok_or_else(|| SsbError::NotARepo(id.clone()))
    }

    fn list_repos(&self) -> Result<Vec<RepoSummary>, SsbError> {
        let entries = self.messages_by_type("git-repo")?;
        Ok(repos_of(entries))
    }

    fn default_branch(&self, id: &RepoId) -> Result<Option<String>, SsbError> {
        let entries = self.messages_by_type("git-update")?;
        let heads = pushed_heads(&entries, id);
        Ok(pick_default_branch(&heads))
    }
}

fn parse_publish_reply(out: &str) -> Result<String, SsbError> {
    let reply: PublishReply = serde_json::from_str(out.trim())?;
    Ok(reply.key)
}

fn parse_entries(out: &str) -> Result<Vec<LogEntry>, SsbError> {
    serde_json::Deserializer::from_str(out)
        .into_iter::<LogEntry>()
        .map(|entry| entry.map_err(SsbError::from))
        .collect()
}

fn summary_of(id: RepoId, value: MessageValue) -> Option<RepoSummary> {
    match serde_json::from_value::<Message>(value.content) {
        Ok(Message::GitRepo { upstream }) => Some(RepoSummary {
            id,
            author: value.author,
            upstream,
        }),
        _ => None,
    }
}

fn repos_of(entries: Vec<LogEntry>) -> Vec<RepoSummary> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let key = RepoId::parse(&entry.key).ok()?;
            summary_of(key, entry.value)
        })
        .collect()
}

/// Branch heads a repo's update messages leave in place, in log order.
fn pushed_heads(entries: &[LogEntry], id: &RepoId) -> Vec<String> {
    let mut heads: Vec<String> = Vec::new();
    for entry in entries {
        let Ok(update) = serde_json::from_value::<UpdateContent>(entry.value.content.clone())
        else {
            continue;
        };
        if update.repo.as_deref() != Some(id.as_str()) {
            continue;
        }
        for (name, target) in update.refs {
            let Some(branch) = name.strip_prefix("refs/heads/") else {
                continue;
            };
            heads.retain(|h| h != branch);
            if target.is_some() {
                heads.push(branch.to_string());
            }
        }
    }
    heads
}

fn pick_default_branch(heads: &[String]) -> Option<String> {
    PREFERRED_DEFAULT_BRANCHES
        .iter()
        .find(|preferred| heads.iter().any(|h| h == *preferred))
        .map(|b| b.to_string())
        .or_else(|| heads.first().cloned())
}
