//! In-memory collaborators for driving the dispatcher without git or a
//! peer server.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use git_ssb::cli::{dispatch, Cli, CliError, Context};
use git_ssb::git::{GitError, LocalGit, RemoteTable};
use git_ssb::ssb::{Message, MessageLog, RepoStore, RepoSummary, SsbError, WebOptions, WebServer};
use git_ssb::RepoId;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub const AUTHOR: &str = "@FCX/tsDLpubCPKKfIrw4gc+SQkHcaD17s7GI6i/ziWY=.ed25519";

/// A well-formed repo id derived from `seed`.
pub fn repo_id(seed: u8) -> RepoId {
    RepoId::parse(&format!("%{}.sha256", STANDARD.encode([seed; 32]))).unwrap()
}

/// Local checkout with a remote table and a checked-out branch.
pub struct FakeGit {
    remotes: RefCell<Vec<(String, String)>>,
    branch: String,
    outside_repo: bool,
}

impl FakeGit {
    pub fn new() -> Self {
        Self {
            remotes: RefCell::new(Vec::new()),
            branch: "main".to_string(),
            outside_repo: false,
        }
    }

    /// A working directory that is not a git checkout.
    pub fn outside_repo() -> Self {
        Self {
            outside_repo: true,
            ..Self::new()
        }
    }

    pub fn with_remote(self, name: &str, url: &str) -> Self {
        self.remotes
            .borrow_mut()
            .push((name.to_string(), url.to_string()));
        self
    }

    pub fn on_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    pub fn remote(&self, name: &str) -> Option<String> {
        self.remotes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.clone())
    }

    fn check(&self) -> Result<(), GitError> {
        if self.outside_repo {
            return Err(GitError::Environment("not a git repository".to_string()));
        }
        Ok(())
    }
}

impl RemoteTable for FakeGit {
    fn list_remotes(&self) -> Result<Vec<String>, GitError> {
        self.check()?;
        Ok(self.remotes.borrow().iter().map(|(n, _)| n.clone()).collect())
    }

    fn url_of(&self, name: &str) -> Result<String, GitError> {
        self.check()?;
        self.remote(name)
            .ok_or_else(|| GitError::RemoteNotFound(name.to_string()))
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.check()?;
        self.remotes
            .borrow_mut()
            .push((name.to_string(), url.to_string()));
        Ok(())
    }
}

impl LocalGit for FakeGit {
    fn current_branch(&self) -> Result<String, GitError> {
        self.check()?;
        Ok(self.branch.clone())
    }
}

/// Repo store and message log backed by vectors, counting every call.
pub struct FakeSsb {
    repos: RefCell<Vec<RepoSummary>>,
    default_branches: RefCell<HashMap<RepoId, String>>,
    published: RefCell<Vec<Message>>,
    created: Cell<u8>,
    listed: Cell<usize>,
}

impl FakeSsb {
    pub fn new() -> Self {
        Self {
            repos: RefCell::new(Vec::new()),
            default_branches: RefCell::new(HashMap::new()),
            published: RefCell::new(Vec::new()),
            created: Cell::new(0),
            listed: Cell::new(0),
        }
    }

    pub fn with_repo(self, id: &RepoId, upstream: Option<&RepoId>) -> Self {
        self.repos.borrow_mut().push(RepoSummary {
            id: id.clone(),
            author: AUTHOR.to_string(),
            upstream: upstream.cloned(),
        });
        self
    }

    pub fn with_default_branch(self, id: &RepoId, branch: &str) -> Self {
        self.default_branches
            .borrow_mut()
            .insert(id.clone(), branch.to_string());
        self
    }

    pub fn publish_count(&self) -> usize {
        self.published.borrow().len()
    }

    pub fn create_count(&self) -> usize {
        usize::from(self.created.get())
    }

    /// Number of full repo listings requested.
    pub fn list_count(&self) -> usize {
        self.listed.get()
    }

    pub fn published(&self) -> Vec<Message> {
        self.published.borrow().clone()
    }

    pub fn summary(&self, id: &RepoId) -> Option<RepoSummary> {
        self.repos.borrow().iter().find(|r| &r.id == id).cloned()
    }
}

impl RepoStore for FakeSsb {
    fn create_repo(&self, upstream: Option<&RepoId>) -> Result<RepoId, SsbError> {
        let n = self.created.get() + 1;
        self.created.set(n);
        let id = repo_id(200 + n);
        self.repos.borrow_mut().push(RepoSummary {
            id: id.clone(),
            author: AUTHOR.to_string(),
            upstream: upstream.cloned(),
        });
        Ok(id)
    }

    fn get_repo(&self, id: &RepoId) -> Result<RepoSummary, SsbError> {
        self.summary(id)
            .ok_or_else(|| SsbError::NotARepo(id.clone()))
    }

    fn list_repos(&self) -> Result<Vec<RepoSummary>, SsbError> {
        self.listed.set(self.listed.get() + 1);
        Ok(self.repos.borrow().clone())
    }

    fn default_branch(&self, id: &RepoId) -> Result<Option<String>, SsbError> {
        Ok(self.default_branches.borrow().get(id).cloned())
    }
}

impl MessageLog for FakeSsb {
    fn publish(&self, message: &Message) -> Result<String, SsbError> {
        self.published.borrow_mut().push(message.clone());
        Ok(format!("%msg{}.sha256", self.publish_count()))
    }
}

/// Records the options it was asked to serve with.
#[derive(Default)]
pub struct FakeWeb {
    pub served: RefCell<Vec<WebOptions>>,
}

impl WebServer for FakeWeb {
    fn serve(&self, options: &WebOptions) -> Result<(), SsbError> {
        self.served.borrow_mut().push(options.clone());
        Ok(())
    }
}

/// Parse `args` and dispatch against the fakes; returns the result and stdout.
pub fn run(
    args: &[&str],
    git: &FakeGit,
    ssb: &FakeSsb,
    web: &FakeWeb,
) -> (Result<(), CliError>, String) {
    use clap::Parser;

    let cli = Cli::try_parse_from(std::iter::once("git-ssb").chain(args.iter().copied()))
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", args, e));
    let ctx = Context {
        git,
        repos: ssb,
        log: ssb,
        web,
    };
    let mut out = Vec::new();
    let result = dispatch(cli, &ctx, &mut out);
    (result, String::from_utf8(out).unwrap())
}
