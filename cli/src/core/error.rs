//! # Parley Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout Parley. Domain errors
//! are modelled with a `thiserror` enum; everything else travels as an
//! `anyhow::Error` so command handlers can attach context freely.
//!
//! ## Architecture
//!
//! - `ParleyError`: specific, matchable failures (bad config, empty message,
//!   broken pattern rule, server start-up problems)
//! - `Result<T>`: alias for `anyhow::Result<T>`
//!
//! The responder itself never fails. Only the front ends (HTTP, REPL,
//! one-shot `ask`) and configuration loading produce errors.
//!
//! ## Examples
//!
//! ```text
//! // Reject empty input before it reaches the responder
//! if message.trim().is_empty() {
//!     return Err(ParleyError::EmptyMessage.into());
//! }
//!
//! // Downcast to react to a specific failure
//! if let Some(ParleyError::EmptyMessage) = err.downcast_ref::<ParleyError>() {
//!     // map to a client error
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Parley application.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParleyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Message cannot be empty.")]
    EmptyMessage,

    #[error("Invalid pattern rule '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Server error: {0}")]
    Server(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
