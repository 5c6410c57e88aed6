//! # Parley Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each file in
//! this directory is compiled as its own test crate and pulls this module in
//! with `mod common;`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use parley::engine::{KnowledgeBase, Responder};
use std::path::Path;

/// # Get Parley Command (`parley_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `parley` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn parley_cmd() -> Command {
    Command::cargo_bin("parley").expect("Failed to find parley binary for testing")
}

/// # Get Isolated Parley Command (`isolated_cmd`)
///
/// Like `parley_cmd`, but runs inside `dir` with `HOME` and `XDG_CONFIG_HOME`
/// pointing there too, so neither a user config nor a project config from
/// the developer's machine leaks into the test. A `.git` directory is
/// created in `dir` to stop the project config search.
pub fn isolated_cmd(dir: &Path) -> Command {
    std::fs::create_dir_all(dir.join(".git")).expect("Failed to create .git marker");
    let mut cmd = parley_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

/// A responder over the default knowledge base with a fixed seed.
pub fn seeded_responder(seed: u64) -> Responder {
    let knowledge = KnowledgeBase::with_defaults().expect("default knowledge base");
    Responder::with_seed(knowledge, seed).expect("responder")
}
