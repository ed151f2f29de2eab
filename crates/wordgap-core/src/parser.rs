//! Vocabulary text parser.
//!
//! Turns `word | meaning | base_missing` lines into [`VocabEntry`] values.
//! Malformed lines never fail the parse; they are dropped and, when asked
//! for, reported as diagnostics.

use std::collections::HashMap;
use std::fmt;

use crate::model::VocabEntry;

/// Built-in vocabulary used when no other source is available.
pub const BUNDLED_VOCABULARY: &str = "# 預設題庫
elaborate | 詳細說明；精心製作 | 1
brisk | 活潑的；輕快的 | 1
curious | 好奇的 | 1
adventure | 冒險；奇遇 | 1
carefree | 無憂無慮的 | 1
harmony | 和諧；融洽 | 1
marvelous | 令人驚嘆的；不可思議的 | 1
resourceful | 足智多謀的 | 1
sprinkle | 灑落；點綴 | 1
whisper | 低聲說；耳語 | 1";

/// Why a line was left out of the parsed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewFields,
    EmptyWord,
    EmptyMeaning,
    /// Same word (ignoring case) already defined on an earlier line.
    Duplicate { first_line: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields => write!(f, "expected `word | meaning`"),
            SkipReason::EmptyWord => write!(f, "word is empty"),
            SkipReason::EmptyMeaning => write!(f, "meaning is empty"),
            SkipReason::Duplicate { first_line } => {
                write!(f, "duplicate of line {first_line}")
            }
        }
    }
}

/// A dropped line and the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Result of parsing with diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub entries: Vec<VocabEntry>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse vocabulary text, silently dropping malformed and duplicate lines.
///
/// An empty result is a valid outcome meaning "no vocabulary available".
pub fn parse_vocabulary(text: &str) -> Vec<VocabEntry> {
    parse_vocabulary_with_diagnostics(text).entries
}

/// Parse vocabulary text and report every non-comment line that was dropped.
pub fn parse_vocabulary_with_diagnostics(text: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 2 {
            report.skipped.push(SkippedLine {
                line_number,
                reason: SkipReason::TooFewFields,
            });
            continue;
        }

        let word = parts[0];
        let meaning = parts[1];
        if word.is_empty() {
            report.skipped.push(SkippedLine {
                line_number,
                reason: SkipReason::EmptyWord,
            });
            continue;
        }
        if meaning.is_empty() {
            report.skipped.push(SkippedLine {
                line_number,
                reason: SkipReason::EmptyMeaning,
            });
            continue;
        }

        let key = word.to_lowercase();
        if let Some(&first_line) = seen.get(&key) {
            report.skipped.push(SkippedLine {
                line_number,
                reason: SkipReason::Duplicate { first_line },
            });
            continue;
        }
        seen.insert(key, line_number);

        let base_missing = coerce_base_missing(parts.get(2).copied());
        report.entries.push(VocabEntry {
            word: word.to_string(),
            meaning: meaning.to_string(),
            base_missing,
        });
    }

    if !report.skipped.is_empty() {
        tracing::debug!(
            kept = report.entries.len(),
            skipped = report.skipped.len(),
            "dropped malformed vocabulary lines"
        );
    }

    report
}

/// Lenient difficulty coercion: anything missing, non-numeric, or below one
/// becomes 1. Fractions truncate toward zero.
fn coerce_base_missing(field: Option<&str>) -> u32 {
    let Some(raw) = field.filter(|f| !f.is_empty()) else {
        return 1;
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => value.min(u32::MAX as f64) as u32,
        _ => 1,
    }
}

/// Write entries back out in the line format accepted by [`parse_vocabulary`].
pub fn serialize_vocabulary(entries: &[VocabEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{} | {} | {}\n",
            entry.word, entry.meaning, entry.base_missing
        ));
    }
    out
}
