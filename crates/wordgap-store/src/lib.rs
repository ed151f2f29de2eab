//! wordgap-store — persistence and configuration.
//!
//! Implements the `Repository` and `VocabularySource` traits from
//! `wordgap-core` on top of the local filesystem, and loads `wordgap.toml`.

pub mod config;
pub mod error;
pub mod file;

pub use config::{load_config_from, WordgapConfig};
pub use error::StoreError;
pub use file::{FileRepository, FileSource};
