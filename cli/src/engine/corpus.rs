//! # Parley Built-in Corpus
//!
//! File: cli/src/engine/corpus.rs
//! Author: Christi Mahu
//!
//! Built-in replies and facts the responder starts with. Extra facts come
//! from `[knowledge.facts]` in the configuration or from `teach me:` requests.
//!

pub const GREETINGS: &[&str] = &[
    "Hey! What's on your mind?",
    "Hi! Ready to think deep?",
    "Hello! I'm your genius assistant.",
    "Yo! Let's solve something cool.",
];

/// Trigger phrase (lowercase) -> answer.
pub const FACTS: &[(&str, &str)] = &[
    // History
    ("when was world war 2", "1939 – 1945."),
    ("who won world war 2", "The Allies (USA, USSR, UK, etc.)."),
    ("when was world war 1", "1914 – 1918."),
    ("who invented the internet", "Vint Cerf and Bob Kahn (TCP/IP)."),
    ("when was the moon landing", "July 20, 1969 – Apollo 11."),
    // Science
    ("how old is the earth", "4.54 billion years."),
    ("speed of light", "299,792,458 m/s."),
    ("what is e=mc²", "Energy = mass × (speed of light)²."),
    ("what is dna", "Deoxyribonucleic acid – the code of life."),
    (
        "what is gravity",
        "A force pulling masses together. Curved spacetime (Einstein).",
    ),
    // Tech
    ("best programming language", "Rust – fast, safe, everywhere."),
    ("what is git", "Version control. Never lose code again."),
    ("what is vercel", "Deploy websites in 1 click."),
    ("how to deploy to vercel", "Push to GitHub → Import → Done."),
    // Life
    ("how to make money", "Solve hard problems. Ship fast. Own equity."),
    ("how to learn coding", "Build. Break. Fix. Repeat. Daily."),
    ("best way to sleep", "7–9 hours. Dark room. No screens."),
    ("how to be happy", "Gratitude + purpose + human connection."),
];

/// Country (lowercase) -> capital, consulted by the `capital of X` rule.
pub const CAPITALS: &[(&str, &str)] = &[
    ("france", "Paris"),
    ("japan", "Tokyo"),
    ("brazil", "Brasília"),
    ("india", "New Delhi"),
];

pub const JOKES: &[&str] = &[
    "Why did the AI go to therapy? Too many unresolved promises.",
    "I told my code to behave — now it's unionizing.",
    "Why don't AIs play hide and seek? Because good luck hiding from `grep`!",
];

pub const FALLBACKS: &[&str] = &[
    "That's a great question. Let me think...",
    "I don't know yet — but I'm learning. Teach me?",
    "The universe is weird. Want to explore?",
    "Interesting. Tell me more.",
];

pub const TEACH_HELP: &str = "Format: teach me: question => answer";
