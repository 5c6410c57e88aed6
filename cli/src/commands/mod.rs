//! # Parley Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the Parley CLI. Every
//! command builds a `Responder` from the loaded configuration and differs
//! only in how messages reach it.
//!
//! ## Commands
//!
//! - `serve`: HTTP server with a browser chat page
//! - `chat`: interactive terminal session
//! - `ask`: answer a single message and exit
//!

/// One-shot reply printed to stdout.
pub mod ask;
/// Interactive REPL on stdin/stdout.
pub mod chat;
/// HTTP server: configuration, routes and server logic.
pub mod serve;
