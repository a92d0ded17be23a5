//! `chat` command handler.
//!
//! Loads a previously pulled model and runs a line-oriented chat loop.
//! Turn failures are printed and the loop continues; only setup failures
//! abort the command.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::bootstrap::CliContext;

/// Run the interactive chat loop against one model file.
pub async fn execute(ctx: &CliContext, format: &str, file: &str) -> Result<()> {
    ctx.core().select_format(format)?;

    println!("Loading {file}...");
    ctx.core().load_artifact(file).await?;
    println!("Model ready. Type a message, or Ctrl-D to leave.");

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);
                match ctx.core().submit_turn(&line).await {
                    Ok(reply) => println!("{reply}"),
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    ctx.core().unload().await;
    Ok(())
}
