//! Capabilities the engine consumes from its collaborators.
//!
//! The engine never touches the filesystem or network directly. Storage and
//! the default vocabulary come in through these traits, implemented by
//! `wordgap-store` for real use and by [`MemoryRepository`] in tests.

use anyhow::Result;

use crate::model::{ProgressMap, Totals};

// ---------------------------------------------------------------------------
// Repository trait
// ---------------------------------------------------------------------------

/// Persistent key/value storage for player state.
///
/// Loads are infallible: implementations treat missing or corrupt data as
/// empty. Saves report failures so the caller can surface them.
pub trait Repository {
    /// Saved per-word progress, or empty if absent or corrupt.
    fn load_progress(&self) -> ProgressMap;

    /// Replace the saved progress mapping.
    fn save_progress(&mut self, progress: &ProgressMap) -> Result<()>;

    /// Saved high score and lifetime correct count.
    fn load_totals(&self) -> Totals;

    fn save_high_score(&mut self, high_score: u64) -> Result<()>;

    fn save_total_correct(&mut self, total_correct: u64) -> Result<()>;

    /// Remove saved progress and the lifetime correct count. The high score
    /// and custom vocabulary are kept.
    fn clear_progress(&mut self) -> Result<()>;

    /// User-supplied vocabulary text overriding the default source.
    fn load_custom_vocabulary(&self) -> Option<String>;

    fn save_custom_vocabulary(&mut self, text: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Vocabulary source trait
// ---------------------------------------------------------------------------

/// Where the default vocabulary text comes from.
pub trait VocabularySource {
    /// Human-readable source name for log messages.
    fn name(&self) -> String;

    /// Fetch the raw vocabulary text.
    fn fetch_default_text(&self) -> Result<String>;
}

/// A source backed by a string already in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl VocabularySource for StaticSource {
    fn name(&self) -> String {
        "static".to_string()
    }

    fn fetch_default_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

// ---------------------------------------------------------------------------
// In-memory repository
// ---------------------------------------------------------------------------

/// A repository that keeps everything in memory.
///
/// Useful for tests and for sessions that should not be saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    pub progress: ProgressMap,
    pub totals: Totals,
    pub custom_vocabulary: Option<String>,
    /// Number of successful `save_progress` calls.
    pub progress_saves: usize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn load_progress(&self) -> ProgressMap {
        self.progress.clone()
    }

    fn save_progress(&mut self, progress: &ProgressMap) -> Result<()> {
        self.progress = progress.clone();
        self.progress_saves += 1;
        Ok(())
    }

    fn load_totals(&self) -> Totals {
        self.totals
    }

    fn save_high_score(&mut self, high_score: u64) -> Result<()> {
        self.totals.high_score = high_score;
        Ok(())
    }

    fn save_total_correct(&mut self, total_correct: u64) -> Result<()> {
        self.totals.total_correct = total_correct;
        Ok(())
    }

    fn clear_progress(&mut self) -> Result<()> {
        self.progress.clear();
        self.totals.total_correct = 0;
        Ok(())
    }

    fn load_custom_vocabulary(&self) -> Option<String> {
        self.custom_vocabulary.clone()
    }

    fn save_custom_vocabulary(&mut self, text: &str) -> Result<()> {
        self.custom_vocabulary = Some(text.to_string());
        Ok(())
    }
}
