//! Statement client trait definition

use crate::error::DbResult;
use crate::protocol::StatementResponse;
use async_trait::async_trait;

/// Transport abstraction over the warehouse statement endpoint.
///
/// Implementations must be Send + Sync; the production implementation is
/// [`crate::rest::RestStatementClient`], tests use
/// [`crate::mock::MockStatementClient`].
#[async_trait]
pub trait StatementClient: Send + Sync {
    /// Submit a statement to the given warehouse, asking the server to
    /// hold the request open for up to `wait_timeout_secs` seconds.
    async fn submit(
        &self,
        warehouse_id: &str,
        sql: &str,
        wait_timeout_secs: u64,
    ) -> DbResult<StatementResponse>;

    /// Fetch the current status of a previously submitted statement.
    async fn poll(&self, statement_id: &str) -> DbResult<StatementResponse>;
}
