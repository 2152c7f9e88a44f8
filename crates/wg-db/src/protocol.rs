//! Wire types for the warehouse statement-execution API
//!
//! Statements are submitted to a stateless REST endpoint and polled until
//! they reach a terminal state. Result values are transported as strings
//! (or null); the declared column types in the manifest are the only type
//! information available to the decoder.

use serde::{Deserialize, Serialize};

/// Response from submitting or polling a statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementResponse {
    /// Identifier for subsequent polls
    #[serde(default)]
    pub statement_id: String,

    /// Current execution status
    pub status: StatementStatus,

    /// Result schema; present once a result payload exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<ResultManifest>,

    /// Result payload; absent for pure DDL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultData>,
}

/// Execution status of a statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementStatus {
    pub state: StatementState,

    /// Populated when `state` is `Failed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StatementError>,
}

/// Lifecycle states reported by the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
    Closed,
}

impl StatementState {
    /// Whether this state is terminal (no further polling useful).
    pub fn is_terminal(self) -> bool {
        !matches!(self, StatementState::Pending | StatementState::Running)
    }
}

/// Error details attached to a failed statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Manifest describing the shape of a result payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultManifest {
    pub schema: ResultSchema,
}

/// Ordered column list for a result payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSchema {
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

/// Name and declared type of one result column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,

    #[serde(default)]
    pub type_name: String,
}

/// Row-oriented result data; every cell arrives as a string or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultData {
    #[serde(default)]
    pub data_array: Vec<Vec<Option<String>>>,
}
