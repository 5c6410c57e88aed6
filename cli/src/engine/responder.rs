//! # Parley Responder
//!
//! File: cli/src/engine/responder.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The `Responder` turns one free-text message into one reply. It owns the
//! `KnowledgeBase` and the random source used to pick canned lines, and is
//! shared between concurrent requests behind an `Arc`.
//!
//! ## Decision order
//!
//! Rules are tried in a fixed order; the first one that applies produces the
//! reply:
//! 1. Greeting at the start of the message
//! 2. Fact whose trigger phrase is contained in the message
//! 3. Pattern rules, in declaration order
//! 4. Arithmetic (`what is <expression>`)
//! 5. `teach me: question => answer`
//! 6. Joke request (`joke` / `funny`)
//! 7. Fallback line
//!
//! Only step 5 mutates state. `respond` never fails; arithmetic errors and
//! malformed teach requests are handled inside their steps.
//!
//! ## Locking
//!
//! The knowledge base sits behind an `RwLock` and the RNG behind a `Mutex`.
//! Neither guard is held across an await point. A poisoned lock is recovered
//! since every write is a single insert or overwrite.
//!
use super::arithmetic;
use super::corpus;
use super::knowledge::KnowledgeBase;
use super::patterns::PatternRule;
use crate::core::config::Config;
use crate::core::error::{ParleyError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

const TEACH_PREFIX: &str = "teach me:";
const LAST_RESORT: &str = "Interesting. Tell me more.";

/// Which step of the decision order produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Greeting,
    Fact,
    Pattern,
    Arithmetic,
    Teach,
    Joke,
    Fallback,
}

/// A reply together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub rule: Rule,
    pub text: String,
}

impl Reply {
    fn new(rule: Rule, text: impl Into<String>) -> Self {
        Self {
            rule,
            text: text.into(),
        }
    }
}

/// Answers messages from a shared `KnowledgeBase`.
///
/// All methods take `&self`; wrap it in an `Arc` to share it between tasks.
pub struct Responder {
    knowledge: RwLock<KnowledgeBase>,
    rng: Mutex<StdRng>,
    greeting: Regex,
    arithmetic: Regex,
}

impl Responder {
    /// Creates a responder whose random choices are seeded from OS entropy.
    pub fn new(knowledge: KnowledgeBase) -> Result<Self> {
        Self::with_rng(knowledge, StdRng::from_entropy())
    }

    /// Creates a responder with reproducible random choices.
    pub fn with_seed(knowledge: KnowledgeBase, seed: u64) -> Result<Self> {
        Self::with_rng(knowledge, StdRng::seed_from_u64(seed))
    }

    /// Builds the default knowledge base, adds the configured facts and
    /// applies the configured seed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut knowledge = KnowledgeBase::with_defaults()?;
        for (question, answer) in &config.knowledge.facts {
            knowledge.teach(question, answer);
        }
        if !config.knowledge.facts.is_empty() {
            info!(
                "Loaded {} fact(s) from configuration",
                config.knowledge.facts.len()
            );
        }
        match config.seed {
            Some(seed) => Self::with_seed(knowledge, seed),
            None => Self::new(knowledge),
        }
    }

    fn with_rng(knowledge: KnowledgeBase, rng: StdRng) -> Result<Self> {
        debug!(
            "Responder ready with {} fact(s) and pattern rules {:?}",
            knowledge.facts().len(),
            knowledge
                .patterns
                .iter()
                .map(PatternRule::pattern)
                .collect::<Vec<_>>()
        );
        Ok(Self {
            knowledge: RwLock::new(knowledge),
            rng: Mutex::new(rng),
            greeting: compile(r"^(?:hi|hello|hey|sup|yo|what['’]?s\s+up)\b")?,
            arithmetic: compile(r"what is\s+(.+?)\??$")?,
        })
    }

    /// Returns the reply text for `input`.
    pub fn respond(&self, input: &str) -> String {
        self.decide(input).text
    }

    /// Like `respond`, but rejects empty or whitespace-only input.
    pub fn try_respond(&self, input: &str) -> Result<String> {
        if input.trim().is_empty() {
            return Err(ParleyError::EmptyMessage.into());
        }
        Ok(self.respond(input))
    }

    /// Runs the decision order and reports which rule answered.
    pub fn decide(&self, input: &str) -> Reply {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();

        if self.greeting.is_match(&lowered) {
            if let Some(text) = self.pick(|kb| &kb.greetings) {
                debug!("Greeting matched");
                return Reply::new(Rule::Greeting, text);
            }
        }

        if let Some(fact) = self.read().lookup(&lowered) {
            debug!("Fact '{}' matched", fact.question);
            return Reply::new(Rule::Fact, fact.answer.clone());
        }

        if let Some(text) = self.read().patterns.iter().find_map(|p| p.apply(trimmed)) {
            debug!("Pattern rule matched");
            return Reply::new(Rule::Pattern, text);
        }

        if let Some(text) = self.evaluate(&lowered) {
            return Reply::new(Rule::Arithmetic, text);
        }

        if let Some(rest) = strip_teach_prefix(trimmed) {
            return Reply::new(Rule::Teach, self.handle_teach(rest));
        }

        if lowered.contains("joke") || lowered.contains("funny") {
            if let Some(text) = self.pick(|kb| &kb.jokes) {
                return Reply::new(Rule::Joke, text);
            }
        }

        let text = self
            .pick(|kb| &kb.fallbacks)
            .unwrap_or_else(|| LAST_RESORT.to_string());
        Reply::new(Rule::Fallback, text)
    }

    /// Inserts or overwrites a fact. Returns the previous answer, if any.
    pub fn teach(&self, question: &str, answer: &str) -> Option<String> {
        self.write().teach(question, answer)
    }

    pub fn fact_count(&self) -> usize {
        self.read().fact_count()
    }

    fn evaluate(&self, lowered: &str) -> Option<String> {
        let caps = self.arithmetic.captures(lowered)?;
        let expr = arithmetic::sanitize(&caps[1]);
        match arithmetic::evaluate(&expr) {
            Ok(value) => Some(format!(
                "**{} = {}**",
                expr,
                arithmetic::format_number(value)
            )),
            Err(e) => {
                debug!("Arithmetic on '{}' failed: {}", expr, e);
                None
            }
        }
    }

    fn handle_teach(&self, rest: &str) -> String {
        match parse_teach(rest) {
            Some((question, answer)) => {
                let previous = self.teach(question, answer);
                info!(
                    "Learned fact '{}'{}",
                    question.to_lowercase(),
                    if previous.is_some() { " (overwritten)" } else { "" }
                );
                format!("Learned: **{question}** → {answer}")
            }
            None => corpus::TEACH_HELP.to_string(),
        }
    }

    fn pick<F>(&self, list: F) -> Option<String>
    where
        F: Fn(&KnowledgeBase) -> &Vec<String>,
    {
        let kb = self.read();
        let mut rng = self.rng();
        list(&kb).choose(&mut *rng).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, KnowledgeBase> {
        self.knowledge.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, KnowledgeBase> {
        self.knowledge.write().unwrap_or_else(|e| e.into_inner())
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        ParleyError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Returns the text after a case-insensitive `teach me:` prefix.
fn strip_teach_prefix(input: &str) -> Option<&str> {
    let prefix = input.get(..TEACH_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(TEACH_PREFIX) {
        input.get(TEACH_PREFIX.len()..)
    } else {
        None
    }
}

/// Splits `question => answer` on the first `=>`. Both sides must be non-empty.
fn parse_teach(rest: &str) -> Option<(&str, &str)> {
    let (question, answer) = rest.split_once("=>")?;
    let (question, answer) = (question.trim(), answer.trim());
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some((question, answer))
}
