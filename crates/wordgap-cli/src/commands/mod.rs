//! Subcommand implementations and the helpers they share.

pub mod export;
pub mod init;
pub mod load;
pub mod play;
pub mod reset;
pub mod stats;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use wordgap_core::engine::{Feedback, GameEngine};
use wordgap_store::{load_config_from, FileRepository, FileSource, WordgapConfig};

/// Where to find config, saved state, and the default vocabulary.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for saved progress
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Default vocabulary file
    #[arg(long)]
    pub vocab: Option<PathBuf>,
}

impl StoreArgs {
    /// Load the config file and apply command-line overrides.
    pub fn resolve(&self) -> Result<WordgapConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(vocab) = &self.vocab {
            config.vocab_path = vocab.clone();
        }
        Ok(config)
    }
}

/// Start an engine over the configured store and vocabulary.
pub fn open_engine(config: &WordgapConfig) -> Result<GameEngine<FileRepository>> {
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        vocab = %config.vocab_path.display(),
        "opening store"
    );
    let repo = FileRepository::open(&config.data_dir)?;
    let source = FileSource::new(&config.vocab_path);
    Ok(GameEngine::bootstrap(&source, repo, config.engine_config()))
}

/// Player-facing text for a feedback value.
pub fn describe_feedback(feedback: &Feedback) -> Option<String> {
    let text = match feedback {
        Feedback::None => return None,
        Feedback::Correct { reward } => format!("Correct! +{reward} points"),
        Feedback::Incorrect => "Not quite, try again.".to_string(),
        Feedback::Revealed { word } => format!("Answer: {word}"),
        Feedback::NothingToGuess => {
            "Nothing to fill in for this word, so it is shown in full.".to_string()
        }
        Feedback::NoVocabulary => {
            "No vocabulary available. Load one with `wordgap load --file <path>`.".to_string()
        }
        Feedback::FallbackVocabulary => {
            "Vocabulary file not found, using the built-in word list.".to_string()
        }
        Feedback::VocabularyLoaded { count } => format!("Loaded {count} words."),
        Feedback::ProgressReset => "Progress reset.".to_string(),
    };
    Some(text)
}
