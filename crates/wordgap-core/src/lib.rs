//! wordgap-core — adaptive masking, scoring, and progress engine.
//!
//! This crate defines the data model, the vocabulary parser, the masking
//! and scoring rules, and the [`GameEngine`](engine::GameEngine) that ties
//! them together behind the [`Repository`](traits::Repository) and
//! [`VocabularySource`](traits::VocabularySource) capabilities.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod progress;
pub mod question;
pub mod scoring;
pub mod traits;

pub use engine::{EngineConfig, Feedback, GameEngine, GameView};
pub use error::{GameError, UploadError};
pub use model::{AnswerMode, ProgressEntry, Question, SessionState, VocabEntry};
