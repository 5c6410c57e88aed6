//! # Parley Knowledge Base
//!
//! File: cli/src/engine/knowledge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The `KnowledgeBase` holds everything the responder draws replies from:
//! canned greetings, jokes and fallback lines, the ordered pattern rules, and
//! the mutable fact table that grows through "teach me" requests.
//!
//! ## Fact matching
//!
//! Facts are keyed by a trimmed, lowercase trigger phrase. A lookup succeeds
//! when a key appears anywhere inside the lowercased input. When several keys
//! are contained in the same input, the longest key wins; keys of equal length
//! resolve to the one inserted first. Teaching an existing key replaces its
//! answer in place, so insertion order is stable across overwrites.
//!
use super::corpus;
use super::patterns::{self, PatternRule};
use crate::core::error::Result;
use tracing::{debug, warn};

/// A taught or built-in trigger phrase and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub question: String,
    pub answer: String,
}

/// All replies and rules available to a `Responder`.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    pub greetings: Vec<String>,
    pub jokes: Vec<String>,
    pub fallbacks: Vec<String>,
    pub patterns: Vec<PatternRule>,
    facts: Vec<Fact>,
}

impl KnowledgeBase {
    /// Creates a knowledge base with no replies, rules or facts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the knowledge base Parley ships with.
    ///
    /// Fails only if one of the built-in pattern rules does not compile.
    pub fn with_defaults() -> Result<Self> {
        let mut kb = Self {
            greetings: to_owned(corpus::GREETINGS),
            jokes: to_owned(corpus::JOKES),
            fallbacks: to_owned(corpus::FALLBACKS),
            patterns: patterns::default_rules()?,
            facts: Vec::with_capacity(corpus::FACTS.len()),
        };
        for (question, answer) in corpus::FACTS {
            kb.teach(question, answer);
        }
        Ok(kb)
    }

    /// Inserts or overwrites a fact, returning the previous answer if any.
    ///
    /// The question is trimmed and lowercased before storage. Blank questions
    /// are ignored since an empty key would be contained in every input.
    pub fn teach(&mut self, question: &str, answer: &str) -> Option<String> {
        let key = question.trim().to_lowercase();
        if key.is_empty() {
            warn!("Ignoring fact with an empty question (answer: '{}')", answer);
            return None;
        }
        let answer = answer.trim().to_string();

        if let Some(existing) = self.facts.iter_mut().find(|f| f.question == key) {
            debug!("Overwriting fact '{}'", key);
            return Some(std::mem::replace(&mut existing.answer, answer));
        }
        debug!("Adding fact '{}'", key);
        self.facts.push(Fact {
            question: key,
            answer,
        });
        None
    }

    /// Finds the answer whose trigger phrase is contained in `lowered`.
    ///
    /// `lowered` must already be lowercase.
    pub fn lookup(&self, lowered: &str) -> Option<&Fact> {
        let mut best: Option<(&Fact, usize)> = None;
        for fact in &self.facts {
            if !lowered.contains(fact.question.as_str()) {
                continue;
            }
            let len = fact.question.chars().count();
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((fact, len));
            }
        }
        best.map(|(fact, _)| fact)
    }

    /// Facts in insertion order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
