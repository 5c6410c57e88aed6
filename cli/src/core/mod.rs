//! # Parley Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every Parley command:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```text
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ParleyError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
