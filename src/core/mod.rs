//! Repo references, addresses, and their resolution

pub mod address;
pub mod config;
pub mod repo_ref;
pub mod resolve;

pub use address::{Address, AddressError, RawAddress};
pub use config::Settings;
pub use repo_ref::{RepoId, RepoIdError, RepoRef};
pub use resolve::{split_repo_args, ResolveError, Resolver};
