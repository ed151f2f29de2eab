//! The `wordgap stats` command.

use anyhow::Result;
use serde::Serialize;

use wordgap_core::traits::Repository;

use super::{open_engine, StoreArgs};

#[derive(Serialize)]
struct StatsReport {
    high_score: u64,
    total_correct: u64,
    words: Vec<WordStats>,
}

#[derive(Serialize)]
struct WordStats {
    word: String,
    meaning: String,
    base_missing: u32,
    /// `None` until the word has been asked at least once.
    correct_count: Option<u32>,
    current_missing: Option<u32>,
}

pub fn execute(store: StoreArgs, format: String) -> Result<()> {
    let config = store.resolve()?;
    let engine = open_engine(&config)?;
    // Saved progress only: the engine has already touched whichever word it
    // picked for its first question.
    let saved = engine.repository().load_progress();

    let report = StatsReport {
        high_score: engine.high_score(),
        total_correct: engine.session().total_correct,
        words: engine
            .vocabulary()
            .iter()
            .map(|entry| {
                let progress = saved.get(&entry.key());
                WordStats {
                    word: entry.word.clone(),
                    meaning: entry.meaning.clone(),
                    base_missing: entry.base_missing,
                    correct_count: progress.map(|p| p.correct_count),
                    current_missing: progress.map(|p| p.current_missing),
                }
            })
            .collect(),
    };

    match format.as_str() {
        "table" => print_table(&report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }
    Ok(())
}

fn print_table(report: &StatsReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Word", "Meaning", "Correct", "Hidden letters"]);

    for word in &report.words {
        table.add_row(vec![
            Cell::new(&word.word),
            Cell::new(&word.meaning),
            Cell::new(
                word.correct_count
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(
                word.current_missing
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} (new)", word.base_missing)),
            ),
        ]);
    }

    println!("{table}");
    println!("High score: {}", report.high_score);
    println!("Total correct: {}", report.total_correct);
}
