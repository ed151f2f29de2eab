//! Answer checking, rewards, and difficulty updates.
//!
//! Everything here is a pure function over the session counters and one
//! word's progress. The engine wraps these with persistence.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{ProgressEntry, SessionState, VocabEntry};
use crate::progress::clamp_missing;

/// Letters used for multiple-choice distractors.
pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Number of options offered in multiple-choice mode.
pub const CHOICE_COUNT: usize = 4;

/// Base points for any correct answer.
pub const BASE_REWARD: u64 = 10;

/// Extra points per hidden letter.
pub const REWARD_PER_LETTER: u64 = 2;

/// Points earned for a correct answer with `masked_count` hidden letters.
pub fn reward(masked_count: usize) -> u64 {
    BASE_REWARD + REWARD_PER_LETTER * masked_count as u64
}

/// Exact-match check for typed answers.
pub fn is_exact_match(input: &str, word: &str) -> bool {
    input.trim().to_lowercase() == word.to_lowercase()
}

/// Multiple-choice check against the hidden letters.
pub fn is_choice_match(option: &str, missing_letters: &str) -> bool {
    option.to_lowercase() == missing_letters.to_lowercase()
}

/// Build the shuffled option list for `correct`.
///
/// Always returns exactly [`CHOICE_COUNT`] distinct lowercase strings of the
/// same length, with the correct answer present once. An empty answer
/// produces no options.
pub fn generate_choice_options<R: Rng + ?Sized>(correct: &str, rng: &mut R) -> Vec<String> {
    if correct.is_empty() {
        return Vec::new();
    }

    let correct = correct.to_lowercase();
    let length = correct.chars().count();
    let mut options = vec![correct.clone()];
    let mut seen: HashSet<String> = HashSet::from([correct]);

    while options.len() < CHOICE_COUNT {
        let candidate: String = (0..length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        if seen.insert(candidate.clone()) {
            options.push(candidate);
        }
    }

    options.shuffle(rng);
    options
}

/// Apply a correct answer. Returns the points earned.
pub fn apply_correct(
    session: &mut SessionState,
    progress: &mut ProgressEntry,
    entry: &VocabEntry,
    masked_count: usize,
) -> u64 {
    let points = reward(masked_count);
    session.score += points;
    session.streak += 1;
    session.total_correct += 1;

    progress.correct_count += 1;
    progress.current_missing = clamp_missing(
        entry
            .base_missing
            .saturating_add(progress.correct_count / 2),
        entry,
    );
    points
}

/// Apply a wrong answer: the streak breaks and the word gets one step easier.
pub fn apply_incorrect(session: &mut SessionState, progress: &mut ProgressEntry, entry: &VocabEntry) {
    session.streak = 0;
    progress.current_missing = clamp_missing(progress.current_missing.saturating_sub(1), entry);
}

/// Apply a reveal: the streak breaks, one credit of mastery is taken back,
/// and the word drops to its baseline difficulty.
pub fn apply_reveal(session: &mut SessionState, progress: &mut ProgressEntry, entry: &VocabEntry) {
    session.streak = 0;
    progress.correct_count = progress.correct_count.saturating_sub(1);
    progress.current_missing = clamp_missing(entry.base_missing, entry);
}
