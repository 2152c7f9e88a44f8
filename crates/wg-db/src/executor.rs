//! SQL executor
//!
//! Submits a statement, waits for it to reach a terminal state within a
//! bounded window, and decodes the columnar result payload into row maps.
//! Retry policy belongs to callers; the executor never retries.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::classify::{classify, ErrorClass};
use crate::error::{DbError, DbResult};
use crate::protocol::{StatementResponse, StatementState};
use crate::traits::StatementClient;

/// Bounded wait for a statement to reach a terminal state.
const WAIT_TIMEOUT_SECS: u64 = 30;

/// Pause between status polls once the server-side wait has elapsed.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// How much SQL to attach to diagnostics.
const SQL_DIAGNOSTIC_LEN: usize = 200;

/// One decoded result row, keyed by column name.
pub type Row = BTreeMap<String, Value>;

/// Executes SQL statements against a warehouse through a statement client.
#[derive(Clone)]
pub struct SqlExecutor {
    client: Arc<dyn StatementClient>,
    warehouse_id: String,
}

impl SqlExecutor {
    pub fn new(client: Arc<dyn StatementClient>, warehouse_id: impl Into<String>) -> Self {
        Self {
            client,
            warehouse_id: warehouse_id.into(),
        }
    }

    /// Execute a statement and return its decoded rows.
    ///
    /// Pure DDL yields an empty vec. A terminal failed state maps to
    /// [`DbError::StatementFailed`]; transport and decode failures are
    /// classified for log severity and wrapped with the truncated SQL.
    pub async fn execute(&self, sql: &str) -> DbResult<Vec<Row>> {
        log::debug!(
            "executing on warehouse {}: {}",
            self.warehouse_id,
            truncate(sql, 100)
        );

        match self.execute_inner(sql).await {
            Ok(rows) => Ok(rows),
            Err(err @ DbError::StatementFailed(_)) => Err(err),
            Err(err) => {
                let message = err.to_string();
                match classify(&message) {
                    ErrorClass::Benign => {
                        log::debug!("statement hit expected condition: {}", truncate(&message, 200));
                    }
                    ErrorClass::Fatal => {
                        log::error!("statement execution failed: {message}");
                    }
                }
                Err(DbError::Execution {
                    message,
                    sql: truncate(sql, SQL_DIAGNOSTIC_LEN).to_string(),
                })
            }
        }
    }

    async fn execute_inner(&self, sql: &str) -> DbResult<Vec<Row>> {
        let mut response = self
            .client
            .submit(&self.warehouse_id, sql, WAIT_TIMEOUT_SECS)
            .await?;

        let deadline = Instant::now() + Duration::from_secs(WAIT_TIMEOUT_SECS);
        while !response.status.state.is_terminal() {
            if Instant::now() >= deadline {
                return Err(DbError::Timeout(WAIT_TIMEOUT_SECS));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
            response = self.client.poll(&response.statement_id).await?;
        }

        match response.status.state {
            StatementState::Succeeded => Ok(decode_rows(&response)),
            StatementState::Failed | StatementState::Canceled | StatementState::Closed => {
                let message = response
                    .status
                    .error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "Unknown error".to_string());
                Err(DbError::StatementFailed(message))
            }
            // Loop invariant: only terminal states reach this match.
            StatementState::Pending | StatementState::Running => Ok(Vec::new()),
        }
    }
}

/// Decode the result payload using the manifest's column list.
///
/// Every value arrives as a string or null. Columns declared BOOLEAN are
/// coerced to native booleans; everything else passes through untouched.
fn decode_rows(response: &StatementResponse) -> Vec<Row> {
    let Some(manifest) = &response.manifest else {
        return Vec::new();
    };
    let Some(result) = &response.result else {
        return Vec::new();
    };

    let columns = &manifest.schema.columns;
    let mut rows = Vec::with_capacity(result.data_array.len());

    for raw in &result.data_array {
        let mut row = Row::new();
        for (column, cell) in columns.iter().zip(raw) {
            let value = match cell {
                None => Value::Null,
                Some(text) => {
                    if column.type_name.to_ascii_uppercase().contains("BOOLEAN") {
                        Value::Bool(text.eq_ignore_ascii_case("true"))
                    } else {
                        Value::String(text.clone())
                    }
                }
            };
            row.insert(column.name.clone(), value);
        }
        rows.push(row);
    }

    log::debug!("decoded {} row(s) from statement result", rows.len());
    rows
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
