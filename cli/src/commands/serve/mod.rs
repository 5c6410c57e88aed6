//! # Parley Chat Server
//!
//! File: cli/src/commands/serve/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `parley serve` exposes the responder over HTTP together with a small
//! browser chat page.
//!
//! ## Architecture
//!
//! - `config.rs`: merges CLI arguments with the `[server]` config section
//! - `routes.rs`: the `/` and `/ask` handlers
//! - `server_logic.rs`: port selection, middleware and graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve on the default port (8000)
//! parley serve
//!
//! # Listen on all interfaces, port 9000, without CORS headers
//! parley serve --host 0.0.0.0 --port 9000 --no-cors
//!
//! # Talk to it
//! curl -s localhost:8000/ask -H 'content-type: application/json' \
//!      -d '{"message":"what is 2+2"}'
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::Responder;
use std::sync::Arc;
use tracing::info;

pub use config::ServeArgs;

/// Merges CLI arguments with the `[server]` section of the config file.
pub mod config;

/// The HTTP handlers.
pub mod routes;

/// Contains the Axum-based HTTP server implementation.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Builds the responder from `config`, resolves the effective server
/// settings and runs the server until shutdown.
pub async fn handle_serve(args: ServeArgs, config: &Config) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let server_config = config::load_and_merge_config(&args, &config.server)?;
    info!("Effective server config: {:?}", server_config);

    let responder = Arc::new(Responder::from_config(config)?);
    server_logic::run_server(server_config, responder).await
}
