//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod fakes;
pub mod git_helpers;
