//! `wg migrate` - apply pending schema migrations

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::context::AppContext;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = AppContext::new(global)?;

    println!("Running migrations for {}.{}", ctx.catalog, ctx.schema);

    let summary = ctx
        .runner()
        .run()
        .await
        .context("Migration run failed")?;

    println!(
        "Migration run complete: {} applied, {} skipped",
        summary.applied, summary.skipped
    );
    Ok(())
}
