//! Git remote table
//!
//! The remote table maps short names to URLs. It is read fresh on every call
//! by invoking `git remote`; nothing is cached between calls.

use super::{GitCli, GitError};

/// Read/write access to the local git remote list.
pub trait RemoteTable {
    /// Remote names, in the order `git remote` reports them.
    fn list_remotes(&self) -> Result<Vec<String>, GitError>;

    /// URL bound to a remote, or `GitError::RemoteNotFound`.
    fn url_of(&self, name: &str) -> Result<String, GitError>;

    /// Register a new remote.
    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError>;

    fn has_remote(&self, name: &str) -> Result<bool, GitError> {
        Ok(self.list_remotes()?.iter().any(|remote| remote == name))
    }
}

/// The local checkout: its remotes plus the checked-out branch.
pub trait LocalGit: RemoteTable {
    fn current_branch(&self) -> Result<String, GitError>;
}

/// Split `git remote` output into names.
pub fn parse_remote_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl RemoteTable for GitCli {
    fn list_remotes(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["remote"])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::Environment(stderr.trim().to_string()));
        }
        Ok(parse_remote_list(&String::from_utf8_lossy(&output.stdout)))
    }

    fn url_of(&self, name: &str) -> Result<String, GitError> {
        let output = self.run(&["remote", "get-url", name])?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("No such remote") {
            Err(GitError::RemoteNotFound(name.to_string()))
        } else {
            Err(GitError::Environment(stderr.trim().to_string()))
        }
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        let output = self.run(&["remote", "add", name, url])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::OperationFailed(format!(
                "git remote add failed: {}",
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn init_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        git(temp.path(), &["init", "-b", "main"]);
        temp
    }

    #[test]
    fn test_parse_remote_list() {
        assert_eq!(
            parse_remote_list("origin\nssb\n\n"),
            vec!["origin".to_string(), "ssb".to_string()]
        );
        assert!(parse_remote_list("").is_empty());
    }

    #[test]
    fn test_list_remotes_empty() {
        let temp = init_repo();
        let cli = GitCli::new(temp.path());
        assert!(cli.list_remotes().unwrap().is_empty());
        assert!(!cli.has_remote("origin").unwrap());
    }

    #[test]
    fn test_add_and_read_remote() {
        let temp = init_repo();
        let cli = GitCli::new(temp.path());
        let url = "ssb://%AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=.sha256";

        cli.add_remote("ssb", url).unwrap();

        assert_eq!(cli.list_remotes().unwrap(), vec!["ssb".to_string()]);
        assert!(cli.has_remote("ssb").unwrap());
        assert_eq!(cli.url_of("ssb").unwrap(), url);
    }

    #[test]
    fn test_add_existing_remote_fails() {
        let temp = init_repo();
        let cli = GitCli::new(temp.path());
        cli.add_remote("origin", "file:///tmp/a.git").unwrap();
        assert!(cli.add_remote("origin", "file:///tmp/b.git").is_err());
    }

    #[test]
    fn test_url_of_missing_remote() {
        let temp = init_repo();
        let cli = GitCli::new(temp.path());
        assert!(matches!(
            cli.url_of("nope"),
            Err(GitError::RemoteNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_list_remotes_outside_repo() {
        let temp = TempDir::new().unwrap();
        let cli = GitCli::new(temp.path());
        assert!(matches!(
            cli.list_remotes(),
            Err(GitError::Environment(_))
        ));
    }
}
