//! Core data model types for wordgap.
//!
//! These are the fundamental types the engine passes around: parsed
//! vocabulary entries, per-word progress, questions, and session counters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single parsed vocabulary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// The word to guess, case preserved.
    pub word: String,
    /// The meaning shown as the clue.
    pub meaning: String,
    /// Baseline number of hidden letters for this word.
    pub base_missing: u32,
}

impl VocabEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>, base_missing: u32) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            base_missing: base_missing.max(1),
        }
    }

    /// Lowercased word, used as the progress key and for identity checks.
    pub fn key(&self) -> String {
        self.word.to_lowercase()
    }

    /// Length of the word in characters.
    pub fn char_len(&self) -> usize {
        self.word.chars().count()
    }
}

/// Adaptive difficulty state for one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Number of times the word has been answered correctly, minus reveals.
    pub correct_count: u32,
    /// How many letters the next question for this word hides.
    pub current_missing: u32,
}

/// Persisted progress, keyed by lowercase word.
pub type ProgressMap = BTreeMap<String, ProgressEntry>;

/// Persisted numeric counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(default)]
    pub high_score: u64,
    #[serde(default)]
    pub total_correct: u64,
}

/// Score and streak for the running session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub streak: u32,
    /// Lifetime correct answers; survives across sessions.
    pub total_correct: u64,
}

/// One answerable round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub entry: VocabEntry,
    /// Progress as it was when the question was built.
    pub progress: ProgressEntry,
    /// Masked character positions, ascending.
    pub masked_indices: Vec<usize>,
    /// Original characters at the masked positions, in order.
    pub missing_letters: String,
    /// Space-separated display form with `_` at masked positions.
    pub display: String,
}

impl Question {
    /// Whether there is anything left to guess.
    pub fn is_trivial(&self) -> bool {
        self.missing_letters.is_empty()
    }
}

/// How the player submits answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    /// Type the full word.
    #[default]
    Typed,
    /// Pick the missing letters out of four options.
    Choice,
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerMode::Typed => write!(f, "typed"),
            AnswerMode::Choice => write!(f, "choice"),
        }
    }
}

impl FromStr for AnswerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typed" | "type" | "text" => Ok(AnswerMode::Typed),
            "choice" | "choices" | "mc" => Ok(AnswerMode::Choice),
            other => Err(format!("unknown answer mode: {other}")),
        }
    }
}
