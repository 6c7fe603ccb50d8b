//! Git helper utilities for integration tests.
//!
//! Creates real checkouts with the `git` CLI so the binary can be run
//! against them offline.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Initialize a non-bare git repository with user config.
pub fn init_repo(path: &Path) {
    fs::create_dir_all(path).unwrap();
    git(path, &["init", "-b", "main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
}

/// Add a remote to a repository.
pub fn add_remote(repo_path: &Path, name: &str, url: &str) {
    git(repo_path, &["remote", "add", name, url]);
}

/// URL of a remote, or `None` if it does not exist.
pub fn remote_url(repo_path: &Path, name: &str) -> Option<String> {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args(["remote", "get-url", name])
        .output()
        .unwrap_or_else(|e| panic!("failed to run git remote get-url: {}", e));

    if !output.status.success() {
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Set a repository-local config value.
pub fn set_config(repo_path: &Path, key: &str, value: &str) {
    git(repo_path, &["config", key, value]);
}

/// Run a git command, panic on failure.
fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}
