//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wordgap_core::engine::EngineConfig;
use wordgap_core::model::AnswerMode;

/// Top-level wordgap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordgapConfig {
    /// Default vocabulary file.
    #[serde(default = "default_vocab_path")]
    pub vocab_path: PathBuf,
    /// Directory holding saved progress and totals.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// How answers are entered.
    #[serde(default)]
    pub mode: AnswerMode,
    /// Fixed RNG seed for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_vocab_path() -> PathBuf {
    PathBuf::from("vocab.txt")
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".wordgap")
}

impl Default for WordgapConfig {
    fn default() -> Self {
        Self {
            vocab_path: default_vocab_path(),
            data_dir: default_data_dir(),
            mode: AnswerMode::default(),
            seed: None,
        }
    }
}

impl WordgapConfig {
    /// Engine settings derived from this config.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            mode: self.mode,
            seed: self.seed,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `wordgap.toml` in the current directory
/// 2. `~/.config/wordgap/config.toml`
///
/// Environment variable overrides: `WORDGAP_DATA_DIR`, `WORDGAP_VOCAB`.
pub fn load_config_from(path: Option<&Path>) -> Result<WordgapConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("wordgap.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<WordgapConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => WordgapConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("WORDGAP_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(vocab) = std::env::var("WORDGAP_VOCAB") {
        config.vocab_path = PathBuf::from(vocab);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.vocab_path = resolve_path(&config.vocab_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("wordgap"))
}
