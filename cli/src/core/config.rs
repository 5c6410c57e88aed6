//! # Parley Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for Parley, handling loading,
//! merging and validation of configuration data. It supports a multi-level
//! approach that combines defaults, user settings and project-specific overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.parley.toml` in the current directory or its ancestors
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/parley/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! Command-line arguments are layered on top of the result by the command
//! that needs them (see `commands::serve::config`).
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! seed = 42
//!
//! [server]
//! host = "0.0.0.0"
//! port = 9000
//! enable_cors = false
//!
//! [knowledge.facts]
//! "what is parley" = "A tiny rule-based responder."
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the modules that need it.
//!
use crate::core::error::{ParleyError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the project-level configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".parley.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seed for the responder's random source. `None` means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub knowledge: KnowledgeSection,
}

/// Settings for `parley serve`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Interface to bind. Kept as a string here and validated after merging.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

/// Extra knowledge loaded into the responder at start-up.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeSection {
    /// Trigger phrase -> answer. Phrases are lowercased when inserted.
    #[serde(default)]
    pub facts: BTreeMap<String, String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}
pub fn default_port() -> u16 {
    8000
}
fn default_enable_cors() -> bool {
    true
}

impl ServerSection {
    /// Parses the configured host into an IP address.
    pub fn host_ip(&self) -> Result<IpAddr> {
        self.host.parse::<IpAddr>().map_err(|e| {
            anyhow!(ParleyError::Config(format!(
                "Invalid server host '{}': {}",
                self.host, e
            )))
        })
    }
}

/// Loads the effective configuration for the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_with(user_config_path().as_deref(), &current_dir)
}

/// Loads configuration from an explicit user config path and a directory to
/// start the project config search from.
pub fn load_config_with(user_config: Option<&Path>, start_dir: &Path) -> Result<Config> {
    let user = match user_config {
        Some(path) if path.is_file() => {
            info!("Loading user configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        Some(path) => {
            debug!("User configuration file not found at {}", path.display());
            None
        }
        None => None,
    };

    let project = match find_project_config_path(start_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
            None
        }
    };

    let merged = merge_configs(user.unwrap_or_default(), project);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn user_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "Parley", "parley") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win whenever they differ from the built-in defaults.
/// Facts are unioned, project entries replacing user entries with the same key.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = ServerSection::default();

    let mut merged = Config {
        seed: project.seed.or(user.seed),
        ..Config::default()
    };
    merged.server.host = if project.server.host != defaults.host {
        project.server.host
    } else {
        user.server.host
    };
    merged.server.port = if project.server.port != defaults.port {
        project.server.port
    } else {
        user.server.port
    };
    merged.server.enable_cors = if project.server.enable_cors != defaults.enable_cors {
        project.server.enable_cors
    } else {
        user.server.enable_cors
    };
    merged.knowledge.facts = user.knowledge.facts;
    merged.knowledge.facts.extend(project.knowledge.facts);
    merged
}

fn validate_config(config: &Config) -> Result<()> {
    config.server.host_ip()?;
    for (question, answer) in &config.knowledge.facts {
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(anyhow!(ParleyError::Config(format!(
                "Fact entries need a non-empty question and answer (got '{}' => '{}').",
                question, answer
            ))));
        }
    }
    Ok(())
}
