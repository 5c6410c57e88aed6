//! # Parley Response Engine
//!
//! File: cli/src/engine/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module contains everything needed to turn a message into a reply:
//! - `responder`: the ordered decision process (`Responder::respond`)
//! - `knowledge`: greetings, facts, jokes, fallbacks and pattern rules
//! - `patterns`: regular-expression rules and their reply producers
//! - `arithmetic`: the "what is 2+2" expression evaluator
//! - `corpus`: the built-in replies and facts
//!
//! Front ends (HTTP server, REPL, one-shot `ask`) only ever talk to the
//! `Responder`.
//!
//! ## Examples
//!
//! ```
//! use parley::engine::{KnowledgeBase, Responder};
//!
//! let bot = Responder::with_seed(KnowledgeBase::with_defaults()?, 42)?;
//! assert!(bot.respond("what is 6*7").contains("42"));
//! bot.respond("teach me: favourite crab => Ferris");
//! assert_eq!(bot.respond("who is my favourite crab?"), "Ferris");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
pub mod arithmetic;
pub mod corpus;
pub mod knowledge;
pub mod patterns;
pub mod responder;

pub use knowledge::{Fact, KnowledgeBase};
pub use patterns::PatternRule;
pub use responder::{Reply, Responder, Rule};
