//! The `wordgap play` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use wordgap_core::engine::{GameEngine, GameView};
use wordgap_core::model::AnswerMode;
use wordgap_core::traits::Repository;

use super::{describe_feedback, open_engine, StoreArgs};

const HELP: &str = "\
Commands:
  <answer>        submit an answer (the full word, or 1-4 / the letters in choice mode)
  :reveal, ?      show the word
  :next, <enter>  next word (once the current one is answered or revealed)
  :reset          erase all progress
  :help           show this help
  :quit           leave";

pub fn execute(store: StoreArgs, mode: Option<AnswerMode>, seed: Option<u64>) -> Result<()> {
    let mut config = store.resolve()?;
    if let Some(mode) = mode {
        config.mode = mode;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    let mut engine = open_engine(&config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut engine, stdin.lock(), stdout.lock())
}

/// Drive `engine` from line-oriented input until `:quit` or end of input.
pub fn run_session<R, I, W>(engine: &mut GameEngine<R>, input: I, mut out: W) -> Result<()>
where
    R: Repository,
    I: BufRead,
    W: Write,
{
    writeln!(out, "wordgap ({} mode). Type :help for commands.", engine.mode())?;
    render(&engine.view(), &mut out)?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();

        let view = match command {
            ":quit" | ":q" => break,
            ":help" | ":h" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ":reveal" | "?" => engine.reveal()?,
            ":reset" => engine.reset_all()?,
            ":next" | "" => {
                let before = engine.view();
                if !before.can_advance {
                    writeln!(out, "Answer first, or type :reveal to see the word.")?;
                    continue;
                }
                engine.advance()
            }
            answer => match engine.mode() {
                AnswerMode::Typed => engine.submit_answer(answer)?,
                AnswerMode::Choice => {
                    let option = choice_from_input(&engine.view(), answer);
                    engine.submit_choice(&option)?
                }
            },
        };
        render(&view, &mut out)?;
    }

    let session = engine.session();
    writeln!(
        out,
        "Session over. Score: {}  High score: {}  Total correct: {}",
        session.score,
        engine.high_score(),
        session.total_correct
    )?;
    Ok(())
}

/// Map `1`-`4` to the option text; anything else is taken literally.
fn choice_from_input(view: &GameView, input: &str) -> String {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| view.choices.get(i))
        .map(|c| c.text.clone())
        .unwrap_or_else(|| input.to_string())
}

fn render(view: &GameView, out: &mut impl Write) -> io::Result<()> {
    if let Some(message) = describe_feedback(&view.feedback) {
        writeln!(out, "{message}")?;
    }

    if let Some(meaning) = &view.meaning {
        writeln!(out)?;
        writeln!(out, "Meaning: {meaning}")?;
        writeln!(out, "Word:    {}", view.display)?;
        if !view.choices.is_empty() {
            let options: Vec<String> = view
                .choices
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let text = c.text.to_uppercase();
                    if c.highlighted {
                        format!("{}) [{text}]", i + 1)
                    } else if c.disabled {
                        format!("{}) ({text})", i + 1)
                    } else {
                        format!("{}) {text}", i + 1)
                    }
                })
                .collect();
            writeln!(out, "Options: {}", options.join("  "))?;
        }
    }

    writeln!(
        out,
        "Score: {}  Streak: {}  High score: {}  Total correct: {}",
        view.score, view.streak, view.high_score, view.total_correct
    )?;
    if view.can_answer {
        write!(out, "> ")?;
    } else if view.meaning.is_some() {
        write!(out, "(enter for the next word) > ")?;
    }
    out.flush()
}
