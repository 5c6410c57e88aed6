//! # Parley Interactive Chat
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `parley chat` runs a REPL on the terminal: each line typed is answered by
//! the responder until the user says `bye`, `exit` or `quit`, or closes stdin.
//! Facts taught during the session live until the session ends.
//!
//! The loop is written against `BufRead`/`Write` so tests can drive it with
//! in-memory buffers.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::Responder;
use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Name the bot uses when it replies.
    #[arg(long, default_value = "Parley")]
    pub name: String,
}

const QUIT_WORDS: [&str; 3] = ["bye", "exit", "quit"];

/// # Handle Chat Command (`handle_chat`)
///
/// Builds a responder from `config` and runs the REPL on stdin/stdout.
pub fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    info!("Starting chat session as '{}'", args.name);
    let responder = Responder::from_config(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_repl(&responder, &args.name, stdin.lock(), stdout.lock())
}

/// Reads lines from `input` and writes replies to `output` until a quit word or EOF.
pub fn run_repl<R: BufRead, W: Write>(
    responder: &Responder,
    name: &str,
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "Chat with {name}! Type 'bye' to quit.")?;

    loop {
        write!(output, "You: ")?;
        output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            debug!("Input closed, ending chat session");
            writeln!(output)?;
            break;
        }

        let trimmed = line.trim();
        if QUIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
            writeln!(output, "{name}: Goodbye!")?;
            break;
        }

        match responder.try_respond(trimmed) {
            Ok(reply) => writeln!(output, "{name}: {reply}")?,
            Err(e) => writeln!(output, "{name} (error): {e}")?,
        }
    }

    Ok(())
}
