//! The `wordgap init` command.

use std::path::Path;

use anyhow::Result;

use wordgap_core::parser::BUNDLED_VOCABULARY;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("wordgap.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("vocab.txt"), BUNDLED_VOCABULARY)?;

    println!("\nNext steps:");
    println!("  1. Add your own words to vocab.txt (word | meaning | hidden letters)");
    println!("  2. Run: wordgap validate --vocab vocab.txt");
    println!("  3. Run: wordgap play");

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, contents)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# wordgap configuration

# Vocabulary used when no custom list has been loaded.
vocab_path = "vocab.txt"

# Saved progress, totals and the custom vocabulary live here.
data_dir = ".wordgap"

# "typed" or "choice"
mode = "typed"

# Uncomment for a reproducible word order.
# seed = 42
"#;
