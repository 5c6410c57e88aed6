//! # Parley Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! The library half of the `parley` crate. `main.rs` is a thin clap front
//! end; everything it runs lives here so integration tests under `tests/`
//! can reach it.
//!
//! - `engine`: the responder and its knowledge base
//! - `commands`: `serve`, `chat` and `ask`
//! - `core`: configuration and errors
//!

pub mod commands;
pub mod core;
pub mod engine;
