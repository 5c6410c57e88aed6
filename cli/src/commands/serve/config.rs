//! # Parley HTTP Server Configuration
//!
//! File: cli/src/commands/serve/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module merges the `parley serve` command-line arguments with the
//! `[server]` section of the loaded configuration. Precedence:
//! 1. Command-line arguments, when they differ from their defaults
//! 2. `[server]` settings from `.parley.toml` / the user config file
//! 3. Default values
//!
//! ## Examples
//!
//! ```text
//! let config = core::config::load_config()?;
//! let server_config = load_and_merge_config(&args, &config.server)?;
//! println!("Listening on: {}:{}", server_config.host, server_config.port);
//! ```
//!
use crate::core::config::{default_host, default_port, ServerSection};
use crate::core::error::Result;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// # Serve Command Arguments (`ServeArgs`)
///
/// Defines the command-line arguments accepted by `parley serve`.
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Sets the network port the server will listen on.
    /// If the port is busy the next free port is used.
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Sets the network IP address the server will bind to.
    /// Use `0.0.0.0` to accept connections from other machines.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// The consolidated settings the server logic runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            enable_cors: true,
        }
    }
}

/// # Load and Merge Server Configuration (`load_and_merge_config`)
///
/// Combines `args` with the file-based `[server]` settings.
///
/// ## Process:
/// 1. Start from the file settings (which already fall back to defaults).
/// 2. Port and host from the command line win when they differ from the
///    clap defaults, meaning the user set them explicitly.
/// 3. `--no-cors` always disables CORS.
///
/// ## Errors
///
/// Returns an error if the host in the configuration file is not a valid IP address.
pub fn load_and_merge_config(args: &ServeArgs, file: &ServerSection) -> Result<ServerConfig> {
    let mut effective = ServerConfig {
        port: file.port,
        host: file.host_ip()?,
        enable_cors: file.enable_cors,
    };

    if args.port != default_port() {
        effective.port = args.port;
    }
    if args.host.to_string() != default_host() {
        effective.host = args.host;
    }
    if args.no_cors {
        effective.enable_cors = false;
    }

    debug!("Merged server configuration: {:?}", effective);
    Ok(effective)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> ServeArgs {
        ServeArgs::parse_from(["serve"])
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(config.enable_cors);
    }

    #[test]
    fn test_defaults_everywhere() {
        let config = load_and_merge_config(&default_args(), &ServerSection::default()).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_file_values_used_when_args_default() {
        let file = ServerSection {
            host: "0.0.0.0".into(),
            port: 9090,
            enable_cors: false,
        };
        let config = load_and_merge_config(&default_args(), &file).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = ServerSection {
            host: "0.0.0.0".into(),
            port: 9090,
            enable_cors: true,
        };
        let args = ServeArgs::parse_from(["serve", "--port", "9999", "--host", "10.0.0.1", "--no-cors"]);
        let config = load_and_merge_config(&args, &file).unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.host.to_string(), "10.0.0.1");
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_invalid_file_host() {
        let file = ServerSection {
            host: "localhost:80".into(),
            ..ServerSection::default()
        };
        assert!(load_and_merge_config(&default_args(), &file).is_err());
    }
}
