//! wg-db - Statement execution layer for Workspace Guardian
//!
//! This crate provides the `StatementClient` trait describing the remote
//! warehouse statement endpoint, a REST implementation of it, and the
//! `SqlExecutor` that submits SQL, waits for a terminal state, and decodes
//! columnar results into row maps. It also owns the free-text error
//! classification shared with the migration runner.

pub mod classify;
pub mod error;
pub mod executor;
pub mod mock;
pub mod protocol;
pub mod rest;
pub mod traits;

pub use classify::{classify, is_already_exists, is_missing_relation, ErrorClass};
pub use error::{DbError, DbResult};
pub use executor::{Row, SqlExecutor};
pub use protocol::{StatementResponse, StatementState};
pub use rest::RestStatementClient;
pub use traits::StatementClient;
