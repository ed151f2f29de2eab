//! The `wordgap validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use wordgap_core::parser::parse_vocabulary_with_diagnostics;

pub fn execute(vocab_path: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&vocab_path)
        .with_context(|| format!("failed to read vocabulary file: {}", vocab_path.display()))?;
    let report = parse_vocabulary_with_diagnostics(&text);

    println!(
        "Vocabulary: {} ({} entries)",
        vocab_path.display(),
        report.entries.len()
    );

    for skipped in &report.skipped {
        println!(
            "  [line {}] WARNING: {}",
            skipped.line_number, skipped.reason
        );
    }

    if report.entries.is_empty() {
        anyhow::bail!("no valid `word | meaning` lines in {}", vocab_path.display());
    }

    if report.skipped.is_empty() {
        println!("All lines valid.");
    } else {
        println!("\n{} line(s) skipped.", report.skipped.len());
    }

    Ok(())
}
