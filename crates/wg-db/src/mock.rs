//! Scripted in-memory statement client for tests
//!
//! Rules map SQL substrings to canned outcomes; the first matching rule
//! wins and unmatched statements succeed with no payload, which is what
//! pure DDL returns. Every submitted statement is recorded so tests can
//! assert on exactly what SQL was sent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{DbError, DbResult};
use crate::protocol::{
    ColumnInfo, ResultData, ResultManifest, ResultSchema, StatementError, StatementResponse,
    StatementState, StatementStatus,
};
use crate::traits::StatementClient;

/// Canned outcome for a matched statement.
#[derive(Clone)]
pub enum MockOutcome {
    /// Terminal SUCCEEDED with no result payload
    Success,
    /// Terminal SUCCEEDED with a columnar payload
    Rows {
        /// `(name, type_name)` pairs
        columns: Vec<(String, String)>,
        data: Vec<Vec<Option<String>>>,
    },
    /// Terminal FAILED with the given warehouse message
    Failed(String),
    /// Transport-level error before any terminal state
    Transport(String),
}

impl MockOutcome {
    /// Convenience constructor for a row payload.
    pub fn rows(columns: &[(&str, &str)], data: Vec<Vec<Option<&str>>>) -> Self {
        MockOutcome::Rows {
            columns: columns
                .iter()
                .map(|(n, t)| (n.to_string(), t.to_string()))
                .collect(),
            data: data
                .into_iter()
                .map(|row| row.into_iter().map(|c| c.map(str::to_string)).collect())
                .collect(),
        }
    }
}

struct Rule {
    needle: String,
    outcome: MockOutcome,
}

/// Scripted statement client.
#[derive(Default)]
pub struct MockStatementClient {
    rules: Mutex<Vec<Rule>>,
    executed: Mutex<Vec<String>>,
    counter: AtomicU64,
}

impl MockStatementClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the outcome for statements containing `needle`.
    pub fn on(&self, needle: &str, outcome: MockOutcome) {
        let mut rules = self.rules.lock().unwrap();
        if let Some(rule) = rules.iter_mut().find(|r| r.needle == needle) {
            rule.outcome = outcome;
        } else {
            rules.push(Rule {
                needle: needle.to_string(),
                outcome,
            });
        }
    }

    /// Every statement submitted so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    /// Submitted statements containing the given substring.
    pub fn executed_matching(&self, needle: &str) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .filter(|sql| sql.contains(needle))
            .cloned()
            .collect()
    }

    /// Clear the execution log (rules are kept).
    pub fn reset_log(&self) {
        self.executed.lock().unwrap().clear();
    }

    fn respond(&self, sql: &str) -> DbResult<StatementResponse> {
        let statement_id = format!("stmt-{}", self.counter.fetch_add(1, Ordering::Relaxed));
        let outcome = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|r| sql.contains(&r.needle))
            .map(|r| r.outcome.clone())
            .unwrap_or(MockOutcome::Success);

        match outcome {
            MockOutcome::Success => Ok(succeeded(statement_id, None)),
            MockOutcome::Rows { columns, data } => {
                let manifest = ResultManifest {
                    schema: ResultSchema {
                        columns: columns
                            .into_iter()
                            .map(|(name, type_name)| ColumnInfo { name, type_name })
                            .collect(),
                    },
                };
                Ok(StatementResponse {
                    statement_id,
                    status: StatementStatus {
                        state: StatementState::Succeeded,
                        error: None,
                    },
                    manifest: Some(manifest),
                    result: Some(ResultData { data_array: data }),
                })
            }
            MockOutcome::Failed(message) => Ok(StatementResponse {
                statement_id,
                status: StatementStatus {
                    state: StatementState::Failed,
                    error: Some(StatementError {
                        error_code: None,
                        message: Some(message),
                    }),
                },
                manifest: None,
                result: None,
            }),
            MockOutcome::Transport(message) => Err(DbError::Connection(message)),
        }
    }
}

fn succeeded(statement_id: String, manifest: Option<ResultManifest>) -> StatementResponse {
    StatementResponse {
        statement_id,
        status: StatementStatus {
            state: StatementState::Succeeded,
            error: None,
        },
        manifest,
        result: None,
    }
}

#[async_trait]
impl StatementClient for MockStatementClient {
    async fn submit(
        &self,
        _warehouse_id: &str,
        sql: &str,
        _wait_timeout_secs: u64,
    ) -> DbResult<StatementResponse> {
        self.executed.lock().unwrap().push(sql.to_string());
        self.respond(sql)
    }

    async fn poll(&self, statement_id: &str) -> DbResult<StatementResponse> {
        // Scripted responses are always terminal, so polls mean a bug in
        // the calling test.
        Err(DbError::Connection(format!(
            "unexpected poll for {statement_id}"
        )))
    }
}
