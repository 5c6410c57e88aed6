//! # Parley Pattern Rules
//!
//! File: cli/src/engine/patterns.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A pattern rule pairs a regular expression with a reply producer. The
//! responder tries rules in declaration order against the trimmed input and
//! returns the first reply produced. A producer may decline a match by
//! returning `None`, in which case the next rule is tried.
//!
//! Built-in rules, in order:
//! 1. `capital of X`: looks X up in a small country table
//! 2. `what is X`: a thinking-out-loud placeholder (declines for arithmetic)
//! 3. `how does X work`
//! 4. `explain X`
//!
use super::corpus;
use crate::core::error::{ParleyError, Result};
use regex::{Captures, Regex, RegexBuilder};
use std::fmt;

/// Produces a reply from a rule's captures, or `None` to decline.
pub type ReplyFn = Box<dyn Fn(&Captures<'_>) -> Option<String> + Send + Sync>;

pub struct PatternRule {
    regex: Regex,
    reply: ReplyFn,
}

impl PatternRule {
    /// Compiles `pattern` case-insensitively.
    pub fn new<F>(pattern: &str, reply: F) -> Result<Self>
    where
        F: Fn(&Captures<'_>) -> Option<String> + Send + Sync + 'static,
    {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ParleyError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            regex,
            reply: Box::new(reply),
        })
    }

    /// Runs the rule against `input`. `None` if it does not match or declines.
    pub fn apply(&self, input: &str) -> Option<String> {
        let caps = self.regex.captures(input)?;
        (self.reply)(&caps)
    }

    /// The source of the rule's regular expression.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRule")
            .field("regex", &self.regex.as_str())
            .finish_non_exhaustive()
    }
}

/// The rules Parley ships with.
pub fn default_rules() -> Result<Vec<PatternRule>> {
    Ok(vec![
        PatternRule::new(r"capital of (.+)", |caps| Some(capital_of(&caps[1])))?,
        PatternRule::new(r"what is (.+)", |caps| {
            let subject = &caps[1];
            // Leave purely numeric subjects to the arithmetic step.
            if !subject.chars().any(char::is_alphabetic) {
                return None;
            }
            Some(format!(
                "Let me think: {subject} is... (add fact or say \"I need to learn this\")"
            ))
        })?,
        PatternRule::new(r"how does (.+) work", |_| {
            Some("Step 1: Input. Step 2: Process. Step 3: Output. Want details?".to_string())
        })?,
        PatternRule::new(r"explain (.+)", |_| {
            Some("Breaking it down simply...".to_string())
        })?,
    ])
}

/// Resolves a country against the embedded capital table.
pub fn capital_of(country: &str) -> String {
    let name = country
        .trim()
        .trim_end_matches(['?', '.', '!'])
        .trim_end();
    let key = name.to_lowercase();
    match corpus::CAPITALS.iter().find(|(c, _)| *c == key) {
        Some((_, capital)) => format!("{capital}."),
        None => format!("I don't know the capital of {name}. Teach me!"),
    }
}
