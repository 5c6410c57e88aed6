//! # Parley One-Shot Ask
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! `parley ask <message...>` prints a single reply and exits. The words are
//! joined with spaces, so quoting is optional:
//!
//! ```bash
//! parley ask what is 6 * 7
//! parley --seed 1 ask tell me a joke
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::Responder;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to answer.
    #[arg(required = true, trailing_var_arg = true)]
    pub message: Vec<String>,
}

pub fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    let responder = Responder::from_config(config)?;
    let message = args.message.join(" ");
    debug!("Asking: {:?}", message);

    let reply = responder.try_respond(&message)?;
    println!("{reply}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_words() {
        let args = AskArgs::parse_from(["ask", "what", "is", "6", "*", "7"]);
        assert_eq!(args.message.join(" "), "what is 6 * 7");
    }

    #[test]
    fn blank_message_is_an_error() {
        let args = AskArgs::parse_from(["ask", "   "]);
        assert!(handle_ask(args, &Config::default()).is_err());
    }

    #[test]
    fn message_is_required() {
        assert!(AskArgs::try_parse_from(["ask"]).is_err());
    }
}
