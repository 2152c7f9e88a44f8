//! `wg status` - show the recorded migration history

use anyhow::Result;
use serde_json::Value;

use wg_db::{is_missing_relation, Row};

use crate::cli::GlobalArgs;
use crate::context::AppContext;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = AppContext::new(global)?;
    let table = ctx.tracking_table();

    let sql = format!(
        "SELECT version, description, status, applied_at, execution_time_seconds, error_message \
         FROM {table} ORDER BY version"
    );

    let rows = match ctx.executor.execute(&sql).await {
        Ok(rows) => rows,
        Err(err) if is_missing_relation(&err.to_string()) => {
            println!("No migration history: {table} does not exist yet. Run `wg migrate` first.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if rows.is_empty() {
        println!("Migration table {table} is empty.");
        return Ok(());
    }

    println!("Migration history for {table}:");
    println!(
        "{:<8} {:<9} {:<20} {:>8}  {}",
        "version", "status", "applied_at", "secs", "description"
    );
    for row in &rows {
        println!(
            "{:<8} {:<9} {:<20} {:>8}  {}",
            cell(row, "version"),
            cell(row, "status"),
            cell(row, "applied_at"),
            cell(row, "execution_time_seconds"),
            cell(row, "description"),
        );
        let error = cell(row, "error_message");
        if !error.is_empty() {
            println!("         note: {error}");
        }
    }

    Ok(())
}

fn cell(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
