//! Per-word adaptive difficulty state.

use crate::model::{ProgressEntry, ProgressMap, VocabEntry};

/// Clamp a missing-letter count into the range allowed for `entry`.
///
/// The ceiling is the number of interior positions (`len - 2`, at least 1);
/// the floor is the word's baseline, itself capped by the ceiling.
pub fn clamp_missing(missing: u32, entry: &VocabEntry) -> u32 {
    let len = entry.char_len() as u32;
    let max_missing = len.saturating_sub(2).max(1);
    let min_missing = entry.base_missing.min(max_missing).max(1);
    missing.max(min_missing).min(max_missing)
}

/// Keyed progress for every word the player has seen.
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    entries: ProgressMap,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(entries: ProgressMap) -> Self {
        Self { entries }
    }

    /// Return the progress for `entry`, creating it on first sight.
    ///
    /// Existing values are re-clamped in place, since the word or its
    /// baseline may have changed since the progress was saved.
    pub fn ensure_entry(&mut self, entry: &VocabEntry) -> ProgressEntry {
        *self.entry_mut(entry)
    }

    /// Mutable access with the same create-or-reclamp behaviour as
    /// [`ensure_entry`](Self::ensure_entry).
    pub fn entry_mut(&mut self, entry: &VocabEntry) -> &mut ProgressEntry {
        let progress = self
            .entries
            .entry(entry.key())
            .or_insert_with(|| ProgressEntry {
                correct_count: 0,
                current_missing: clamp_missing(entry.base_missing, entry),
            });
        progress.current_missing = clamp_missing(progress.current_missing, entry);
        progress
    }

    pub fn get(&self, entry: &VocabEntry) -> Option<&ProgressEntry> {
        self.entries.get(&entry.key())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The whole mapping, for persisting.
    pub fn snapshot(&self) -> &ProgressMap {
        &self.entries
    }
}

/// Decode a persisted progress snapshot.
///
/// Malformed data is treated as empty progress rather than an error.
pub fn decode_progress(json: &str) -> ProgressMap {
    if json.trim().is_empty() {
        return ProgressMap::new();
    }
    match serde_json::from_str::<ProgressMap>(json) {
        Ok(map) => map
            .into_iter()
            .map(|(word, mut progress)| {
                progress.current_missing = progress.current_missing.max(1);
                (word.to_lowercase(), progress)
            })
            .collect(),
        Err(e) => {
            tracing::warn!("saved progress is corrupt, starting fresh: {e}");
            ProgressMap::new()
        }
    }
}

/// Encode progress for storage.
pub fn encode_progress(map: &ProgressMap) -> serde_json::Result<String> {
    serde_json::to_string(map)
}
