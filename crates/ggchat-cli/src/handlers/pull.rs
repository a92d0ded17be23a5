//! `pull` command handler.

use std::sync::Arc;

use anyhow::Result;
use ggchat_core::ProgressObserver;
use indicatif::{ProgressBar, ProgressStyle};

use crate::bootstrap::CliContext;

/// Download one model file, rendering progress as a terminal bar.
pub async fn execute(ctx: &CliContext, format: &str, file: &str) -> Result<()> {
    ctx.core().select_format(format)?;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {percent:>3}%")?.progress_chars("=> "),
    );
    bar.set_message(file.to_string());

    let observer: ProgressObserver = {
        let bar = bar.clone();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Arc::new(move |fraction: f32| {
            bar.set_position((fraction * 100.0) as u64);
        })
    };

    let path = ctx.core().download_artifact(file, observer).await?;
    bar.finish_and_clear();
    println!("Saved to {}", path.display());
    Ok(())
}
