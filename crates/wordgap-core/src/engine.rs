//! The game engine.
//!
//! [`GameEngine`] owns every piece of mutable game state: the vocabulary,
//! per-word progress, session counters, and the live round. Collaborators
//! drive it through a small set of entry points, each returning a
//! [`GameView`] snapshot to render.
//!
//! Exactly one round is live at a time. Once a round is locked (answered,
//! revealed, or auto-resolved) further submissions against it are ignored,
//! so duplicate or late input can never score twice.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::{Result, UploadError};
use crate::model::{AnswerMode, Question, SessionState, VocabEntry};
use crate::parser::{parse_vocabulary, BUNDLED_VOCABULARY};
use crate::progress::ProgressStore;
use crate::question::{build_question, pick_next, spaced_word};
use crate::scoring::{
    apply_correct, apply_incorrect, apply_reveal, generate_choice_options, is_choice_match,
    is_exact_match,
};
use crate::traits::{Repository, VocabularySource};

/// Configuration for the game engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// How answers are submitted.
    pub mode: AnswerMode,
    /// Fixed RNG seed for reproducible sessions. `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Message for the player after the last action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    None,
    Correct { reward: u64 },
    Incorrect,
    Revealed { word: String },
    /// The word has no letters that can be hidden; it is shown in full.
    NothingToGuess,
    /// The vocabulary is empty. A new one has to be loaded.
    NoVocabulary,
    /// The default source failed and the bundled list is in use.
    FallbackVocabulary,
    VocabularyLoaded { count: usize },
    ProgressReset,
}

/// One multiple-choice option as it should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub text: String,
    pub disabled: bool,
    /// Set on the correct option once the round is resolved.
    pub highlighted: bool,
}

/// Everything a front end needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub mode: AnswerMode,
    pub meaning: Option<String>,
    /// Masked (or revealed) word, characters separated by spaces.
    pub display: String,
    pub choices: Vec<ChoiceView>,
    pub feedback: Feedback,
    pub score: u64,
    pub high_score: u64,
    pub streak: u32,
    pub total_correct: u64,
    pub can_answer: bool,
    pub can_reveal: bool,
    pub can_advance: bool,
}

#[derive(Debug, Clone)]
struct Choice {
    text: String,
    disabled: bool,
}

#[derive(Debug, Clone)]
struct Round {
    question: Question,
    choices: Vec<Choice>,
    locked: bool,
}

/// The adaptive vocabulary game.
pub struct GameEngine<R: Repository> {
    repo: R,
    mode: AnswerMode,
    rng: StdRng,
    vocabulary: Vec<VocabEntry>,
    raw_text: String,
    progress: ProgressStore,
    session: SessionState,
    high_score: u64,
    round: Option<Round>,
    feedback: Feedback,
}

impl<R: Repository> GameEngine<R> {
    /// Start a session over `vocabulary_text`, restoring saved state from
    /// `repo`. The first question is prepared immediately if any words parse.
    pub fn new(vocabulary_text: impl Into<String>, repo: R, config: EngineConfig) -> Self {
        let raw_text = vocabulary_text.into();
        let totals = repo.load_totals();
        let progress = ProgressStore::from_map(repo.load_progress());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut engine = Self {
            mode: config.mode,
            rng,
            vocabulary: parse_vocabulary(&raw_text),
            raw_text,
            progress,
            session: SessionState {
                score: 0,
                streak: 0,
                total_correct: totals.total_correct,
            },
            high_score: totals.high_score,
            round: None,
            feedback: Feedback::None,
            repo,
        };

        tracing::debug!(
            words = engine.vocabulary.len(),
            known = engine.progress.snapshot().len(),
            mode = %engine.mode,
            "starting session"
        );
        engine.next_round();
        engine
    }

    /// Start a session, choosing the vocabulary the way a fresh launch does.
    ///
    /// A saved custom vocabulary wins. Otherwise the default source is
    /// fetched; if that fails the bundled list is used and the player is
    /// told so.
    pub fn bootstrap(source: &dyn VocabularySource, repo: R, config: EngineConfig) -> Self {
        let custom = repo.load_custom_vocabulary().filter(|t| !t.is_empty());
        let (text, fell_back) = match custom {
            Some(text) => (text, false),
            None => match source.fetch_default_text() {
                Ok(text) => (text, false),
                Err(e) => {
                    tracing::warn!(
                        "failed to load vocabulary from {}, using bundled list: {e:#}",
                        source.name()
                    );
                    (BUNDLED_VOCABULARY.to_string(), true)
                }
            },
        };

        let mut engine = Self::new(text, repo, config);
        if fell_back {
            engine.announce(Feedback::FallbackVocabulary);
        }
        engine
    }

    // -- observers ----------------------------------------------------------

    /// The live question, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.round.as_ref().map(|r| &r.question)
    }

    /// Whether the live round has been resolved.
    pub fn is_locked(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.locked)
    }

    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn vocabulary(&self) -> &[VocabEntry] {
        &self.vocabulary
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Raw text of the vocabulary in use, for exporting.
    pub fn export_vocabulary(&self) -> Option<&str> {
        if self.raw_text.is_empty() {
            None
        } else {
            Some(&self.raw_text)
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Snapshot of everything a front end shows.
    pub fn view(&self) -> GameView {
        let (meaning, display, choices) = match &self.round {
            Some(round) => {
                let correct = round.question.missing_letters.to_lowercase();
                let display = if round.locked {
                    spaced_word(&round.question.entry.word)
                } else {
                    round.question.display.clone()
                };
                let choices = round
                    .choices
                    .iter()
                    .map(|c| ChoiceView {
                        text: c.text.clone(),
                        disabled: c.disabled || round.locked,
                        highlighted: round.locked && c.text == correct,
                    })
                    .collect();
                (Some(round.question.entry.meaning.clone()), display, choices)
            }
            None => (None, "--".to_string(), Vec::new()),
        };

        let live = self.round.as_ref().is_some_and(|r| !r.locked);
        GameView {
            mode: self.mode,
            meaning,
            display,
            choices,
            feedback: self.feedback.clone(),
            score: self.session.score,
            high_score: self.high_score,
            streak: self.session.streak,
            total_correct: self.session.total_correct,
            can_answer: live,
            can_reveal: live,
            can_advance: !live,
        }
    }

    // -- player actions -----------------------------------------------------

    /// Submit a typed answer: the full word. Ignored in choice mode and on
    /// resolved rounds.
    pub fn submit_answer(&mut self, text: &str) -> Result<GameView> {
        if self.mode != AnswerMode::Typed {
            return Ok(self.view());
        }
        let Some(round) = self.round.as_ref().filter(|r| !r.locked) else {
            return Ok(self.view());
        };

        if is_exact_match(text, &round.question.entry.word) {
            self.score_correct()?;
        } else {
            self.score_incorrect()?;
        }
        Ok(self.view())
    }

    /// Submit one of the offered options. Ignored in typed mode, on resolved
    /// rounds, and for options that are unknown or already ruled out.
    pub fn submit_choice(&mut self, option: &str) -> Result<GameView> {
        if self.mode != AnswerMode::Choice {
            return Ok(self.view());
        }
        let Some(round) = self.round.as_mut().filter(|r| !r.locked) else {
            return Ok(self.view());
        };

        let option = option.to_lowercase();
        let Some(choice) = round
            .choices
            .iter_mut()
            .find(|c| c.text == option && !c.disabled)
        else {
            return Ok(self.view());
        };

        if is_choice_match(&option, &round.question.missing_letters) {
            self.score_correct()?;
        } else {
            choice.disabled = true;
            self.score_incorrect()?;
        }
        Ok(self.view())
    }

    /// Give up on the live round and show the word.
    pub fn reveal(&mut self) -> Result<GameView> {
        let Some(round) = self.round.as_mut().filter(|r| !r.locked) else {
            return Ok(self.view());
        };
        round.locked = true;
        let entry = round.question.entry.clone();

        apply_reveal(&mut self.session, self.progress.entry_mut(&entry), &entry);
        tracing::debug!(word = %entry.word, "revealed");
        self.feedback = Feedback::Revealed {
            word: entry.word.clone(),
        };

        self.repo.save_progress(self.progress.snapshot())?;
        Ok(self.view())
    }

    /// Move to the next word. Only allowed once the live round is resolved.
    pub fn advance(&mut self) -> GameView {
        if self.round.as_ref().is_some_and(|r| !r.locked) {
            return self.view();
        }
        self.next_round();
        self.view()
    }

    /// Wipe progress, the lifetime counter, and the session score. The high
    /// score is kept.
    pub fn reset_all(&mut self) -> Result<GameView> {
        self.session = SessionState::default();
        self.progress.clear();
        self.next_round();
        self.announce(Feedback::ProgressReset);
        tracing::info!("progress reset");

        self.repo.clear_progress()?;
        Ok(self.view())
    }

    /// Replace the vocabulary with uploaded text.
    ///
    /// Rejected uploads leave all state untouched. Accepted ones are saved
    /// as the new default and reset progress like [`reset_all`](Self::reset_all).
    pub fn load_custom_vocabulary(&mut self, file_name: &str, text: &str) -> Result<GameView> {
        if !file_name.ends_with(".txt") {
            return Err(UploadError::WrongExtension(file_name.to_string()).into());
        }
        let parsed = parse_vocabulary(text);
        if parsed.is_empty() {
            return Err(UploadError::NoEntries.into());
        }

        let count = parsed.len();
        self.vocabulary = parsed;
        self.raw_text = text.to_string();
        self.session = SessionState::default();
        self.progress.clear();
        self.next_round();
        self.announce(Feedback::VocabularyLoaded { count });
        tracing::info!(words = count, file = file_name, "loaded custom vocabulary");

        self.repo.save_custom_vocabulary(text)?;
        self.repo.clear_progress()?;
        Ok(self.view())
    }

    // -- internals ----------------------------------------------------------

    fn next_round(&mut self) {
        let current = self.round.as_ref().map(|r| &r.question.entry);
        let Some(entry) = pick_next(&self.vocabulary, current, &mut self.rng).cloned() else {
            self.round = None;
            self.feedback = Feedback::NoVocabulary;
            return;
        };

        let progress = self.progress.ensure_entry(&entry);
        let question = build_question(&entry, progress, &mut self.rng);

        if question.is_trivial() {
            self.feedback = Feedback::NothingToGuess;
            self.round = Some(Round {
                question,
                choices: Vec::new(),
                locked: true,
            });
            return;
        }

        let choices = match self.mode {
            AnswerMode::Choice => generate_choice_options(&question.missing_letters, &mut self.rng)
                .into_iter()
                .map(|text| Choice {
                    text,
                    disabled: false,
                })
                .collect(),
            AnswerMode::Typed => Vec::new(),
        };

        self.feedback = Feedback::None;
        self.round = Some(Round {
            question,
            choices,
            locked: false,
        });
    }

    /// Show `feedback` unless preparing the round already produced a message.
    fn announce(&mut self, feedback: Feedback) {
        if self.feedback == Feedback::None {
            self.feedback = feedback;
        }
    }

    fn score_correct(&mut self) -> Result<()> {
        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };
        round.locked = true;
        let entry = round.question.entry.clone();
        let masked = round.question.masked_indices.len();

        let reward = apply_correct(
            &mut self.session,
            self.progress.entry_mut(&entry),
            &entry,
            masked,
        );
        tracing::debug!(word = %entry.word, reward, streak = self.session.streak, "correct");
        self.feedback = Feedback::Correct { reward };

        let raised = self.session.score > self.high_score;
        if raised {
            self.high_score = self.session.score;
        }

        // Every save is attempted; the first failure is reported.
        let progress = self.repo.save_progress(self.progress.snapshot());
        let total = self.repo.save_total_correct(self.session.total_correct);
        let high = if raised {
            self.repo.save_high_score(self.high_score)
        } else {
            Ok(())
        };
        progress.and(total).and(high)?;
        Ok(())
    }

    fn score_incorrect(&mut self) -> Result<()> {
        let Some(round) = self.round.as_ref() else {
            return Ok(());
        };
        let entry = round.question.entry.clone();

        apply_incorrect(&mut self.session, self.progress.entry_mut(&entry), &entry);
        tracing::debug!(word = %entry.word, "incorrect");
        self.feedback = Feedback::Incorrect;

        self.repo.save_progress(self.progress.snapshot())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::model::{ProgressEntry, ProgressMap, Totals};
    use crate::traits::{MemoryRepository, StaticSource};

    fn typed(seed: u64) -> EngineConfig {
        EngineConfig {
            mode: AnswerMode::Typed,
            seed: Some(seed),
        }
    }

    fn choice(seed: u64) -> EngineConfig {
        EngineConfig {
            mode: AnswerMode::Choice,
            seed: Some(seed),
        }
    }

    fn curious_only(config: EngineConfig) -> GameEngine<MemoryRepository> {
        GameEngine::new("curious | 好奇的 | 1", MemoryRepository::new(), config)
    }

    fn correct_option(engine: &GameEngine<MemoryRepository>) -> String {
        engine
            .current_question()
            .unwrap()
            .missing_letters
            .to_lowercase()
    }

    fn wrong_option(view: &GameView, correct: &str) -> String {
        view.choices
            .iter()
            .find(|c| c.text != correct && !c.disabled)
            .unwrap()
            .text
            .clone()
    }

    #[test]
    fn first_question_is_ready() {
        let engine = curious_only(typed(1));
        let view = engine.view();
        assert_eq!(view.meaning.as_deref(), Some("好奇的"));
        assert_eq!(view.display.matches('_').count(), 1);
        assert!(view.can_answer);
        assert!(!view.can_advance);
        assert!(view.choices.is_empty());
    }

    #[test]
    fn typed_correct_scores_once() {
        let mut engine = curious_only(typed(1));
        let view = engine.submit_answer("  CURIOUS ").unwrap();
        assert_eq!(view.feedback, Feedback::Correct { reward: 12 });
        assert_eq!(view.score, 12);
        assert_eq!(view.streak, 1);
        assert_eq!(view.total_correct, 1);
        assert_eq!(view.high_score, 12);
        assert_eq!(view.display, "c u r i o u s");
        assert!(view.can_advance);

        let again = engine.submit_answer("curious").unwrap();
        assert_eq!(again, view);
        assert_eq!(engine.reveal().unwrap(), view);

        let repo = engine.repository();
        assert_eq!(repo.totals.high_score, 12);
        assert_eq!(repo.totals.total_correct, 1);
        assert_eq!(repo.progress["curious"].correct_count, 1);
    }

    #[test]
    fn typed_incorrect_keeps_round_open() {
        let mut map = ProgressMap::new();
        map.insert(
            "adventure".into(),
            ProgressEntry {
                correct_count: 4,
                current_missing: 3,
            },
        );
        let repo = MemoryRepository {
            progress: map,
            ..Default::default()
        };
        let mut engine = GameEngine::new("adventure | 冒險 | 1", repo, typed(3));
        assert_eq!(engine.current_question().unwrap().masked_indices.len(), 3);

        let view = engine.submit_answer("adventur").unwrap();
        assert_eq!(view.feedback, Feedback::Incorrect);
        assert_eq!(view.streak, 0);
        assert_eq!(view.score, 0);
        assert!(view.can_answer);
        let progress = engine.repository().progress["adventure"];
        assert_eq!(progress.current_missing, 2);
        assert_eq!(progress.correct_count, 4);

        let view = engine.submit_answer("adventure").unwrap();
        assert_eq!(view.feedback, Feedback::Correct { reward: 16 });
    }

    #[test]
    fn choice_wrong_option_is_disabled() {
        let mut engine = curious_only(choice(5));
        let correct = correct_option(&engine);
        let view = engine.view();
        assert_eq!(view.choices.len(), 4);

        let wrong = wrong_option(&view, &correct);
        let view = engine.submit_choice(&wrong).unwrap();
        assert_eq!(view.feedback, Feedback::Incorrect);
        assert!(view.choices.iter().any(|c| c.text == wrong && c.disabled));
        let saves = engine.repository().progress_saves;

        let repeat = engine.submit_choice(&wrong).unwrap();
        assert_eq!(repeat, view);
        assert_eq!(engine.repository().progress_saves, saves);

        let view = engine.submit_choice(&correct.to_uppercase()).unwrap();
        assert_eq!(view.feedback, Feedback::Correct { reward: 12 });
        assert!(view.choices.iter().all(|c| c.disabled));
        assert!(view
            .choices
            .iter()
            .any(|c| c.highlighted && c.text == correct));

        let after = engine.submit_choice(&correct).unwrap();
        assert_eq!(after, view);
    }

    #[test]
    fn modes_ignore_the_other_entry_point() {
        let mut typed_engine = curious_only(typed(1));
        let before = typed_engine.view();
        assert_eq!(typed_engine.submit_choice("u").unwrap(), before);

        let mut choice_engine = curious_only(choice(1));
        let before = choice_engine.view();
        assert_eq!(choice_engine.submit_answer("curious").unwrap(), before);
    }

    #[test]
    fn reveal_locks_and_penalizes() {
        let mut map = ProgressMap::new();
        map.insert(
            "curious".into(),
            ProgressEntry {
                correct_count: 5,
                current_missing: 3,
            },
        );
        let repo = MemoryRepository {
            progress: map,
            ..Default::default()
        };
        let mut engine = GameEngine::new("curious | 好奇的 | 1", repo, typed(2));
        let view = engine.reveal().unwrap();
        assert_eq!(
            view.feedback,
            Feedback::Revealed {
                word: "curious".into()
            }
        );
        assert!(!view.can_answer);
        assert!(view.can_advance);
        let progress = engine.repository().progress["curious"];
        assert_eq!(progress.correct_count, 4);
        assert_eq!(progress.current_missing, 1);

        assert_eq!(engine.submit_answer("curious").unwrap(), view);
    }

    #[test]
    fn reveal_from_zero_stays_at_zero() {
        let mut engine = curious_only(typed(2));
        engine.reveal().unwrap();
        let word = VocabEntry::new("curious", "好奇的", 1);
        assert_eq!(engine.progress().get(&word).unwrap().correct_count, 0);
    }

    #[test]
    fn advance_waits_for_resolution() {
        let mut engine = GameEngine::new(
            "brisk | 輕快的\nharmony | 和諧",
            MemoryRepository::new(),
            typed(9),
        );
        let first = engine.current_question().unwrap().entry.word.clone();
        let view = engine.advance();
        assert_eq!(engine.current_question().unwrap().entry.word, first);
        assert!(view.can_answer);

        engine.reveal().unwrap();
        engine.advance();
        assert_ne!(engine.current_question().unwrap().entry.word, first);
        assert!(!engine.is_locked());
    }

    #[test]
    fn difficulty_grows_with_repeated_success() {
        let mut engine = curious_only(typed(4));
        for _ in 0..2 {
            engine.submit_answer("curious").unwrap();
            engine.advance();
        }
        assert_eq!(engine.current_question().unwrap().masked_indices.len(), 2);
        let view = engine.submit_answer("curious").unwrap();
        assert_eq!(view.feedback, Feedback::Correct { reward: 14 });
        assert_eq!(view.score, 12 + 12 + 14);
        assert_eq!(view.streak, 3);
    }

    #[test]
    fn word_without_hidden_letters_resolves_itself() {
        let mut engine = GameEngine::new("go | 去", MemoryRepository::new(), choice(1));
        let view = engine.view();
        assert_eq!(view.feedback, Feedback::NothingToGuess);
        assert_eq!(view.display, "g o");
        assert!(view.choices.is_empty());
        assert!(view.can_advance);
        assert_eq!(engine.submit_choice("o").unwrap(), view);
    }

    #[test]
    fn empty_vocabulary_has_no_round() {
        let mut engine = GameEngine::new("# nothing here", MemoryRepository::new(), typed(1));
        let view = engine.view();
        assert_eq!(view.feedback, Feedback::NoVocabulary);
        assert_eq!(view.display, "--");
        assert!(view.meaning.is_none());
        assert!(engine.current_question().is_none());
        assert_eq!(engine.advance().feedback, Feedback::NoVocabulary);
        assert_eq!(engine.submit_answer("x").unwrap(), view);
    }

    #[test]
    fn reset_keeps_high_score() {
        let mut engine = curious_only(typed(1));
        engine.submit_answer("curious").unwrap();
        let view = engine.reset_all().unwrap();
        assert_eq!(view.score, 0);
        assert_eq!(view.streak, 0);
        assert_eq!(view.total_correct, 0);
        assert_eq!(view.high_score, 12);
        assert_eq!(view.feedback, Feedback::ProgressReset);
        assert!(view.can_answer);
        let repo = engine.repository();
        assert!(repo.progress.is_empty());
        assert_eq!(repo.totals.total_correct, 0);
        assert_eq!(repo.totals.high_score, 12);
    }

    #[test]
    fn invalid_upload_leaves_state_alone() {
        let mut engine = curious_only(typed(1));
        engine.submit_answer("curious").unwrap();
        let before = engine.view();

        let err = engine.load_custom_vocabulary("words.csv", "cat | 貓").unwrap_err();
        assert!(matches!(
            err,
            GameError::Upload(UploadError::WrongExtension(_))
        ));
        let err = engine
            .load_custom_vocabulary("words.txt", "# empty\nnope")
            .unwrap_err();
        assert!(matches!(err, GameError::Upload(UploadError::NoEntries)));
        assert!(err.is_upload());

        assert_eq!(engine.view(), before);
        assert_eq!(engine.vocabulary().len(), 1);
        assert!(engine.repository().custom_vocabulary.is_none());
    }

    #[test]
    fn valid_upload_replaces_vocabulary() {
        let mut engine = curious_only(typed(1));
        engine.submit_answer("curious").unwrap();

        let text = "whisper | 耳語 | 2\nsprinkle | 灑落";
        let view = engine.load_custom_vocabulary("mine.txt", text).unwrap();
        assert_eq!(view.feedback, Feedback::VocabularyLoaded { count: 2 });
        assert_eq!(view.score, 0);
        assert_eq!(view.total_correct, 0);
        assert_eq!(view.high_score, 12);
        assert_eq!(engine.vocabulary().len(), 2);
        assert_eq!(engine.export_vocabulary(), Some(text));

        let repo = engine.repository();
        assert_eq!(repo.custom_vocabulary.as_deref(), Some(text));
        assert!(repo.progress.is_empty());
    }

    struct Unavailable;

    impl VocabularySource for Unavailable {
        fn name(&self) -> String {
            "unavailable".into()
        }

        fn fetch_default_text(&self) -> anyhow::Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    #[test]
    fn bootstrap_falls_back_to_bundled_list() {
        let engine = GameEngine::bootstrap(&Unavailable, MemoryRepository::new(), typed(1));
        assert_eq!(engine.vocabulary().len(), 10);
        assert_eq!(engine.view().feedback, Feedback::FallbackVocabulary);
        assert!(engine.current_question().is_some());
    }

    #[test]
    fn bootstrap_prefers_saved_custom_vocabulary() {
        let repo = MemoryRepository {
            custom_vocabulary: Some("brisk | 輕快的".into()),
            totals: Totals {
                high_score: 50,
                total_correct: 7,
            },
            ..Default::default()
        };
        let source = StaticSource::new("curious | 好奇的");
        let engine = GameEngine::bootstrap(&source, repo, typed(1));
        assert_eq!(engine.vocabulary()[0].word, "brisk");
        let view = engine.view();
        assert_eq!(view.high_score, 50);
        assert_eq!(view.total_correct, 7);
        assert_eq!(view.score, 0);
        assert_eq!(view.feedback, Feedback::None);
    }

    struct BrokenDisk(MemoryRepository);

    impl Repository for BrokenDisk {
        fn load_progress(&self) -> ProgressMap {
            self.0.load_progress()
        }
        fn save_progress(&mut self, _: &ProgressMap) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
        fn load_totals(&self) -> Totals {
            self.0.load_totals()
        }
        fn save_high_score(&mut self, v: u64) -> anyhow::Result<()> {
            self.0.save_high_score(v)
        }
        fn save_total_correct(&mut self, v: u64) -> anyhow::Result<()> {
            self.0.save_total_correct(v)
        }
        fn clear_progress(&mut self) -> anyhow::Result<()> {
            self.0.clear_progress()
        }
        fn load_custom_vocabulary(&self) -> Option<String> {
            self.0.load_custom_vocabulary()
        }
        fn save_custom_vocabulary(&mut self, text: &str) -> anyhow::Result<()> {
            self.0.save_custom_vocabulary(text)
        }
    }

    #[test]
    fn storage_failure_still_locks_round() {
        let mut engine = GameEngine::new(
            "curious | 好奇的",
            BrokenDisk(MemoryRepository::new()),
            typed(1),
        );
        let err = engine.submit_answer("curious").unwrap_err();
        assert!(matches!(err, GameError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
        assert!(engine.is_locked());
        assert_eq!(engine.session().score, 12);

        assert_eq!(engine.high_score(), 12);
        assert_eq!(engine.session().total_correct, 1);

        let view = engine.submit_answer("curious").unwrap();
        assert_eq!(view.score, 12);
        assert_eq!(view.high_score, 12);

        // The other counters were still written.
        let repo = &engine.repository().0;
        assert_eq!(repo.totals.high_score, 12);
        assert_eq!(repo.totals.total_correct, 1);
    }

    #[test]
    fn high_score_kept_when_score_stays_below_it() {
        let repo = MemoryRepository {
            totals: Totals {
                high_score: 50,
                total_correct: 3,
            },
            ..Default::default()
        };
        let mut engine = GameEngine::new("curious | 好奇的", repo, typed(1));

        let view = engine.submit_answer("curious").unwrap();
        assert_eq!(view.score, 12);
        assert_eq!(view.high_score, 50);
        assert_eq!(view.total_correct, 4);

        let repo = engine.repository();
        assert_eq!(repo.totals.high_score, 50);
        assert_eq!(repo.totals.total_correct, 4);
    }
}
