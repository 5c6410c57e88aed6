//! # Parley HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module runs the HTTP server for `parley serve`:
//! - Port availability checking with automatic fallback
//! - Request tracing and optional permissive CORS
//! - Graceful shutdown on Ctrl+C or SIGTERM
//!
//! ## Architecture
//!
//! 1. Find an available port, starting at the configured one
//! 2. Build the router (`routes::chat_routes`) and wrap it in middleware
//! 3. Print the URLs and serve until a shutdown signal arrives
//!
//! ## Examples
//!
//! ```text
//! let responder = Arc::new(Responder::from_config(&config)?);
//! server_logic::run_server(server_config, responder).await?;
//! ```
//!
use super::config::ServerConfig;
use super::routes;
use crate::core::error::{ParleyError, Result};
use crate::engine::Responder;
use anyhow::Context;
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

/// How many consecutive ports to try before giving up.
const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port at or above `config.port`, prints the URLs
/// and serves requests until a shutdown signal is received.
///
/// ## Errors
///
/// - No free port within `MAX_PORT_ATTEMPTS` attempts.
/// - Binding the listener fails.
/// - The server itself fails while running.
pub async fn run_server(config: ServerConfig, responder: Arc<Responder>) -> Result<()> {
    let listener = bind_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read the bound address")?;

    let facts = responder.fact_count();
    let app = create_app(&config, responder);

    println!("\n=================================================================");
    println!("💬 Parley is listening");
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    println!("⚙️  Binding to address: {}", addr);
    println!("📚 Facts loaded:      {}", facts);
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// # Handle Shutdown Signal (`shutdown_signal`)
///
/// Resolves when Ctrl+C or (on Unix) SIGTERM is received. If a handler
/// cannot be installed, that branch simply never resolves.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Bind Available Port (`bind_available_port`)
///
/// Tries `start_port`, then each following port, up to `max_attempts` ports
/// in total. The returned listener is the one that will serve requests, so
/// there is no window in which another process can take the port.
///
/// ## Errors
///
/// Returns `ParleyError::Server` when every attempt fails.
async fn bind_available_port(
    host: IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<TcpListener> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(listener);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    Err(ParleyError::Server(format!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        host, start_port, max_attempts
    ))
    .into())
}

/// # Create Axum Application (`create_app`)
///
/// Wraps the chat routes in tracing and CORS middleware.
pub fn create_app(config: &ServerConfig, responder: Arc<Responder>) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    routes::chat_routes(responder).layer(
        ServiceBuilder::new()
            .layer(trace_layer) // Apply tracing first.
            .layer(cors_layer),
    )
}
