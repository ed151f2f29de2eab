//! Word selection and letter masking.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{ProgressEntry, Question, VocabEntry};
use crate::progress::clamp_missing;

/// Character shown in place of a hidden letter.
pub const MASK_CHAR: char = '_';

/// Pick the next word uniformly at random.
///
/// The previous word (compared case-insensitively) is never repeated while
/// any other word exists. Returns `None` only for an empty vocabulary.
pub fn pick_next<'a, R: Rng + ?Sized>(
    vocabulary: &'a [VocabEntry],
    current: Option<&VocabEntry>,
    rng: &mut R,
) -> Option<&'a VocabEntry> {
    let Some(current) = current else {
        return vocabulary.choose(rng);
    };
    let current_key = current.key();
    let others: Vec<&VocabEntry> = vocabulary
        .iter()
        .filter(|e| e.key() != current_key)
        .collect();
    match others.choose(rng) {
        Some(next) => Some(*next),
        None => vocabulary.choose(rng),
    }
}

/// Interior, ASCII-alphabetic character positions of `word`.
pub fn eligible_positions(word: &str) -> Vec<usize> {
    let len = word.chars().count();
    word.chars()
        .enumerate()
        .filter(|&(i, c)| i != 0 && i + 1 != len && c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .collect()
}

/// Choose which character positions to hide.
///
/// Never hides the first or last character or anything non-alphabetic.
/// At least one position is hidden whenever one is eligible; an empty result
/// means the word has nothing to guess.
pub fn select_mask_positions<R: Rng + ?Sized>(
    word: &str,
    missing_count: u32,
    rng: &mut R,
) -> Vec<usize> {
    let mut eligible = eligible_positions(word);
    if eligible.is_empty() {
        return Vec::new();
    }

    let take = (missing_count as usize).min(eligible.len()).max(1);
    let (picked, _) = eligible.partial_shuffle(rng, take);
    let mut indices = picked.to_vec();
    indices.sort_unstable();
    indices
}

/// Render `word` with the given positions replaced by [`MASK_CHAR`].
pub fn mask_word(word: &str, masked: &[usize]) -> String {
    let chars: Vec<String> = word
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if masked.binary_search(&i).is_ok() {
                MASK_CHAR.to_string()
            } else {
                c.to_string()
            }
        })
        .collect();
    chars.join(" ")
}

/// Render `word` fully revealed, one space between characters.
pub fn spaced_word(word: &str) -> String {
    mask_word(word, &[])
}

/// Build the question for `entry` at its current difficulty.
pub fn build_question<R: Rng + ?Sized>(
    entry: &VocabEntry,
    progress: ProgressEntry,
    rng: &mut R,
) -> Question {
    let missing_count = clamp_missing(progress.current_missing, entry);
    let masked_indices = select_mask_positions(&entry.word, missing_count, rng);

    let chars: Vec<char> = entry.word.chars().collect();
    let missing_letters: String = masked_indices.iter().map(|&i| chars[i]).collect();

    let display = if missing_letters.is_empty() {
        spaced_word(&entry.word)
    } else {
        mask_word(&entry.word, &masked_indices)
    };

    tracing::debug!(
        word = %entry.word,
        missing = missing_count,
        masked = masked_indices.len(),
        "built question"
    );

    Question {
        entry: entry.clone(),
        progress,
        masked_indices,
        missing_letters,
        display,
    }
}
