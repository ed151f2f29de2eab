//! File-backed repository.
//!
//! Player state lives in a single data directory:
//!
//! | File               | Contents |
//! |--------------------|----------|
//! | `progress.json`    | word → `{ correctCount, currentMissing }` |
//! | `totals.json`      | `{ highScore, totalCorrect }` |
//! | `custom_vocab.txt` | uploaded vocabulary overriding the default |
//!
//! Writes go through a temp file in the same directory and are renamed into
//! place, so a crash never leaves a half-written file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::NamedTempFile;

use wordgap_core::model::{ProgressMap, Totals};
use wordgap_core::progress::{decode_progress, encode_progress};
use wordgap_core::traits::{Repository, VocabularySource};

use crate::error::StoreError;

pub const PROGRESS_FILE: &str = "progress.json";
pub const TOTALS_FILE: &str = "totals.json";
pub const CUSTOM_VOCAB_FILE: &str = "custom_vocab.txt";

/// A [`Repository`] that keeps state as files in one directory.
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    /// Open (creating if needed) the data directory at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!("using data directory {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read a state file. Missing files and read errors both yield `None`.
    fn read(&self, name: &str) -> Option<String> {
        let path = self.path(name);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("failed to read {}, ignoring it: {e}", path.display());
                None
            }
        }
    }

    fn write_atomic(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.path(name);
        let write_err = |source: io::Error| StoreError::Write {
            path: path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp.write_all(contents.as_bytes()).map_err(write_err)?;
        temp.persist(&path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove { path, source }),
        }
    }

    fn save_totals(&self, totals: &Totals) -> Result<(), StoreError> {
        let json = serde_json::to_string(totals)
            .map_err(|source| StoreError::Encode {
                what: "totals",
                source,
            })?;
        self.write_atomic(TOTALS_FILE, &json)
    }
}

impl Repository for FileRepository {
    fn load_progress(&self) -> ProgressMap {
        self.read(PROGRESS_FILE)
            .map(|json| decode_progress(&json))
            .unwrap_or_default()
    }

    fn save_progress(&mut self, progress: &ProgressMap) -> Result<()> {
        let json = encode_progress(progress).map_err(|source| StoreError::Encode {
            what: "progress",
            source,
        })?;
        self.write_atomic(PROGRESS_FILE, &json)?;
        Ok(())
    }

    fn load_totals(&self) -> Totals {
        let Some(json) = self.read(TOTALS_FILE) else {
            return Totals::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("saved totals are corrupt, starting from zero: {e}");
            Totals::default()
        })
    }

    fn save_high_score(&mut self, high_score: u64) -> Result<()> {
        let mut totals = self.load_totals();
        totals.high_score = high_score;
        self.save_totals(&totals)?;
        Ok(())
    }

    fn save_total_correct(&mut self, total_correct: u64) -> Result<()> {
        let mut totals = self.load_totals();
        totals.total_correct = total_correct;
        self.save_totals(&totals)?;
        Ok(())
    }

    fn clear_progress(&mut self) -> Result<()> {
        self.remove(PROGRESS_FILE)?;
        let high_score = self.load_totals().high_score;
        self.save_totals(&Totals {
            high_score,
            total_correct: 0,
        })?;
        Ok(())
    }

    fn load_custom_vocabulary(&self) -> Option<String> {
        self.read(CUSTOM_VOCAB_FILE)
    }

    fn save_custom_vocabulary(&mut self, text: &str) -> Result<()> {
        self.write_atomic(CUSTOM_VOCAB_FILE, text)?;
        Ok(())
    }
}

/// Default vocabulary read from a text file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VocabularySource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_default_text(&self) -> Result<String> {
        use anyhow::Context;

        fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read vocabulary file: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordgap_core::model::ProgressEntry;

    fn sample_progress() -> ProgressMap {
        let mut map = ProgressMap::new();
        map.insert(
            "harmony".into(),
            ProgressEntry {
                correct_count: 3,
                current_missing: 2,
            },
        );
        map
    }

    #[test]
    fn fresh_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path().join("nested/data")).unwrap();
        assert!(repo.dir().is_dir());
        assert!(repo.load_progress().is_empty());
        assert_eq!(repo.load_totals(), Totals::default());
        assert!(repo.load_custom_vocabulary().is_none());
    }

    #[test]
    fn progress_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FileRepository::open(dir.path()).unwrap();
        repo.save_progress(&sample_progress()).unwrap();

        let reopened = FileRepository::open(dir.path()).unwrap();
        assert_eq!(reopened.load_progress(), sample_progress());

        let raw = fs::read_to_string(dir.path().join(PROGRESS_FILE)).unwrap();
        assert!(raw.contains("\"correctCount\":3"));
    }

    #[test]
    fn corrupt_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROGRESS_FILE), "{\"harmony\": 12").unwrap();
        fs::write(dir.path().join(TOTALS_FILE), "NaN").unwrap();

        let repo = FileRepository::open(dir.path()).unwrap();
        assert!(repo.load_progress().is_empty());
        assert_eq!(repo.load_totals(), Totals::default());
    }

    #[test]
    fn totals_are_saved_independently() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FileRepository::open(dir.path()).unwrap();
        repo.save_high_score(120).unwrap();
        repo.save_total_correct(9).unwrap();
        assert_eq!(
            repo.load_totals(),
            Totals {
                high_score: 120,
                total_correct: 9
            }
        );
    }

    #[test]
    fn clear_keeps_high_score_and_custom_vocab() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FileRepository::open(dir.path()).unwrap();
        repo.save_progress(&sample_progress()).unwrap();
        repo.save_high_score(40).unwrap();
        repo.save_total_correct(4).unwrap();
        repo.save_custom_vocabulary("brisk | 輕快的").unwrap();

        repo.clear_progress().unwrap();
        assert!(!dir.path().join(PROGRESS_FILE).exists());
        assert_eq!(repo.load_totals().high_score, 40);
        assert_eq!(repo.load_totals().total_correct, 0);
        assert_eq!(
            repo.load_custom_vocabulary().as_deref(),
            Some("brisk | 輕快的")
        );

        // Clearing twice is fine
        repo.clear_progress().unwrap();
    }

    #[test]
    fn file_source_reads_and_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        fs::write(&path, "curious | 好奇的 | 1\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(
            source.fetch_default_text().unwrap(),
            "curious | 好奇的 | 1\n"
        );

        let missing = FileSource::new(dir.path().join("nope.txt"));
        let err = missing.fetch_default_text().unwrap_err();
        assert!(format!("{err:#}").contains("nope.txt"));
    }
}
