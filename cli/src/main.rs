//! # Parley Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Parley CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and routing to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! parley --help
//!
//! # Serve the chat page with request logging
//! parley -v serve
//!
//! # One-shot answer with deterministic random picks
//! parley --seed 7 ask tell me a joke
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and apply global overrides
//! 4. Route to the command handler and report any error
//!
use clap::Parser;
use parley::commands;
use parley::core::config;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "parley",
    about = "💬 Parley: a tiny rule-based conversational responder",
    long_about = "Answers short messages from facts, patterns, arithmetic and canned lines.\n\
                  Teach it new facts with: teach me: question => answer",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Seed for random replies (overrides `seed` in the config file).
    #[arg(long, global = true)]
    seed: Option<u64>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Serve the chat page and the `/ask` endpoint over HTTP.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Chat interactively in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Print the reply to a single message.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match config::load_config() {
        Ok(mut cfg) => {
            if cli.seed.is_some() {
                cfg.seed = cli.seed;
            }
            match cli.command {
                Commands::Serve(args) => commands::serve::handle_serve(args, &cfg).await,
                Commands::Chat(args) => commands::chat::handle_chat(args, &cfg),
                Commands::Ask(args) => commands::ask::handle_ask(args, &cfg),
            }
        }
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["parley", "ask", "-vv", "--seed", "5", "hi"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.seed, Some(5));
        assert!(matches!(cli.command, Commands::Ask(_)));
    }
}
