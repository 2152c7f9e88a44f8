//! Error types for wg-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Transport-level failure reaching the warehouse (D001)
    #[error("[D001] Warehouse connection failed: {0}")]
    Connection(String),

    /// Statement reached a terminal failed state on the warehouse (D002)
    #[error("[D002] SQL execution failed: {0}")]
    StatementFailed(String),

    /// Execution error wrapped with the offending SQL for diagnostics (D003)
    #[error("[D003] SQL execution error: {message} (sql: {sql})")]
    Execution { message: String, sql: String },

    /// Statement response could not be decoded (D004)
    #[error("[D004] Malformed statement response: {0}")]
    Decode(String),

    /// Statement never reached a terminal state (D005)
    #[error("[D005] Statement did not complete within {0}s")]
    Timeout(u64),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
