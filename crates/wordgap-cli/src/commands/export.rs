//! The `wordgap export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{open_engine, StoreArgs};

pub fn execute(store: StoreArgs, output: Option<PathBuf>) -> Result<()> {
    let config = store.resolve()?;
    let engine = open_engine(&config)?;
    let Some(text) = engine.export_vocabulary() else {
        anyhow::bail!("no vocabulary to export");
    };

    match output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Vocabulary written to: {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
