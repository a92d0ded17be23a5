//! `formats` command handler.

use crate::bootstrap::CliContext;

/// Print the catalog, one format per line.
pub fn execute(ctx: &CliContext) {
    for format in ctx.core().catalog().formats() {
        println!("{:<36} {}", format.label, format.repository_id);
    }
}
