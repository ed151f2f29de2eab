//! The `wordgap reset` command.

use anyhow::Result;

use super::{open_engine, StoreArgs};

pub fn execute(store: StoreArgs, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("refusing to reset without --yes (this erases all per-word progress)");
    }

    let config = store.resolve()?;
    let mut engine = open_engine(&config)?;
    let view = engine.reset_all()?;

    println!("Progress reset. High score kept: {}", view.high_score);
    Ok(())
}
