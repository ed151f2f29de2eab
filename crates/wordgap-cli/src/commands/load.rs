//! The `wordgap load` command.

use std::path::PathBuf;

use anyhow::Result;

use wordgap_core::error::UploadError;

use super::{open_engine, StoreArgs};

pub fn execute(store: StoreArgs, file: PathBuf) -> Result<()> {
    let config = store.resolve()?;
    let text = std::fs::read_to_string(&file)
        .map_err(|e| UploadError::Read(format!("{}: {e}", file.display())))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut engine = open_engine(&config)?;
    engine.load_custom_vocabulary(&file_name, &text)?;

    println!(
        "Loaded {} words from {}. Progress has been reset.",
        engine.vocabulary().len(),
        file.display()
    );
    Ok(())
}
