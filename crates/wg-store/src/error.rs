//! Error types for wg-store

use thiserror::Error;
use wg_db::DbError;

/// Approval store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// A001: Approval upsert failed
    #[error("[A001] Failed to approve resource '{resource}': {message}")]
    Approval { resource: String, message: String },

    /// A002: Revocation update failed
    #[error("[A002] Failed to revoke approval for resource '{resource}': {message}")]
    Revocation { resource: String, message: String },

    /// A003: Request data failed validation
    #[error("[A003] Validation failed: {0}")]
    Validation(String),

    /// A004: Underlying statement execution failed
    #[error("[A004] Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;
