//! git-ssb - git repositories on a Secure Scuttlebutt network
//!
//! Resolves which peer-network repo and branch a command means, from git
//! remotes, repo ids, `ssb://` URLs and `[<repo>:]<branch>` addresses, then
//! hands the work to the peer server.

pub mod cli;
pub mod core;
pub mod git;
pub mod ssb;
pub mod telemetry;
pub mod util;

pub use core::{Address, RepoId, RepoRef, Resolver};
