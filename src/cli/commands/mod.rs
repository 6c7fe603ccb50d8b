//! CLI command implementations
//!
//! Each command is implemented in its own module.

pub mod create;
pub mod fork;
pub mod forks;
pub mod name;
pub mod pull_request;
pub mod web;
