//! Approval store operations
//!
//! Every write goes through a single interpolated statement against the
//! stateless warehouse endpoint: approvals are one MERGE keyed on
//! `(resource_id, workspace_id)`, revocations are one targeted UPDATE.
//! There is no cross-statement transaction, so each operation must be
//! individually atomic at the warehouse.

use chrono::{DateTime, NaiveTime, Utc};

use wg_core::{format_sql_timestamp, quote_literal};
use wg_db::{Row, SqlExecutor};

use crate::error::{StoreError, StoreResult};
use crate::model::{ApprovalRequest, ApprovedResource};

/// CRUD operations for the approval table.
#[derive(Clone)]
pub struct ApprovalStore {
    executor: SqlExecutor,
    table: String,
}

impl ApprovalStore {
    pub fn new(executor: SqlExecutor, catalog: &str, schema: &str) -> Self {
        Self {
            executor,
            table: format!("{catalog}.{schema}.approved_resources"),
        }
    }

    /// List rows that are approved and not revoked, optionally scoped to
    /// one workspace. Expiration depends on the caller's "now" and is
    /// checked by the caller, not by this query.
    pub async fn list_approved(
        &self,
        workspace_id: Option<&str>,
    ) -> StoreResult<Vec<ApprovedResource>> {
        let mut sql = format!(
            "SELECT * FROM {} WHERE is_approved = true AND revoked_date IS NULL",
            self.table
        );
        if let Some(ws) = workspace_id {
            sql.push_str(&format!(" AND workspace_id = {}", quote_literal(ws)));
        }

        let rows = self.executor.execute(&sql).await?;
        log::debug!("list_approved returned {} row(s)", rows.len());
        Ok(rows.iter().map(ApprovedResource::from_row).collect())
    }

    /// Approve a resource, replacing any existing row for the same
    /// identity. One MERGE both inserts and overwrites, so re-approving
    /// clears any prior revocation in the same atomic statement.
    pub async fn approve(&self, request: &ApprovalRequest) -> StoreResult<()> {
        request.validate()?;

        let approval_date = request.approval_date.unwrap_or_else(Utc::now);
        let expiration = match request.expiration_date {
            Some(date) => format!("TIMESTAMP '{}'", format_sql_timestamp(midnight_utc(date))),
            None => "NULL".to_string(),
        };
        let updated_at = format_sql_timestamp(Utc::now());

        let merge = format!(
            r#"MERGE INTO {table} AS target
USING (
    SELECT
        {resource_name} AS resource_name,
        {resource_id} AS resource_id,
        {workspace_id} AS workspace_id,
        {workspace_name} AS workspace_name,
        {resource_creator} AS resource_creator,
        {approved_by} AS approved_by,
        TIMESTAMP '{approval_date}' AS approval_date,
        {expiration} AS expiration_date,
        {justification} AS justification,
        true AS is_approved,
        NULL AS revoked_date,
        NULL AS revoked_by,
        NULL AS revoked_reason,
        TIMESTAMP '{updated_at}' AS updated_at
) AS source
ON target.resource_id = source.resource_id AND target.workspace_id = source.workspace_id
WHEN MATCHED THEN UPDATE SET *
WHEN NOT MATCHED THEN INSERT *"#,
            table = self.table,
            resource_name = quote_literal(&request.resource_name),
            resource_id = quote_literal(&request.resource_id),
            workspace_id = quote_literal(&request.workspace_id),
            workspace_name = quote_literal(&request.workspace_name),
            resource_creator = quote_literal(&request.resource_creator),
            approved_by = quote_literal(&request.approved_by),
            approval_date = format_sql_timestamp(approval_date),
            justification = quote_literal(&request.justification),
        );

        self.executor
            .execute(&merge)
            .await
            .map_err(|err| StoreError::Approval {
                resource: request.resource_name.clone(),
                message: err.to_string(),
            })?;

        log::info!(
            "approved resource '{}' in workspace {}",
            request.resource_name,
            request.workspace_id
        );
        Ok(())
    }

    /// Revoke an approval: logical delete that keeps the row for audit.
    ///
    /// No existence precheck is made; revoking a missing identity is a
    /// zero-row UPDATE the warehouse reports as success.
    pub async fn revoke(
        &self,
        resource_id: &str,
        workspace_id: &str,
        revoked_by: &str,
        reason: &str,
    ) -> StoreResult<()> {
        let revoked_at = format_sql_timestamp(Utc::now());

        let update = format!(
            "UPDATE {table} SET \
             is_approved = FALSE, \
             revoked_date = TIMESTAMP '{revoked_at}', \
             revoked_by = {revoked_by}, \
             revoked_reason = {reason}, \
             updated_at = CURRENT_TIMESTAMP() \
             WHERE resource_id = {resource_id} AND workspace_id = {workspace_id}",
            table = self.table,
            revoked_by = quote_literal(revoked_by),
            reason = quote_literal(reason),
            resource_id = quote_literal(resource_id),
            workspace_id = quote_literal(workspace_id),
        );

        self.executor
            .execute(&update)
            .await
            .map_err(|err| StoreError::Revocation {
                resource: resource_id.to_string(),
                message: err.to_string(),
            })?;

        log::info!("revoked approval for resource {resource_id} in workspace {workspace_id}");
        Ok(())
    }

    /// Check whether a resource is currently approved, including the
    /// expiration comparison against the current time.
    ///
    /// Callers use this as a gate, so it never raises: every internal
    /// error degrades to `(false, None)`.
    pub async fn is_approved(
        &self,
        resource_id: &str,
        workspace_id: &str,
    ) -> (bool, Option<ApprovedResource>) {
        let sql = format!(
            "SELECT * FROM {table} WHERE resource_id = {resource_id} \
             AND workspace_id = {workspace_id} \
             AND is_approved = true AND revoked_date IS NULL",
            table = self.table,
            resource_id = quote_literal(resource_id),
            workspace_id = quote_literal(workspace_id),
        );

        let rows: Vec<Row> = match self.executor.execute(&sql).await {
            Ok(rows) => rows,
            Err(err) => {
                log::error!("approval check failed for {resource_id}: {err}");
                return (false, None);
            }
        };

        match rows.first() {
            Some(row) => {
                let resource = ApprovedResource::from_row(row);
                if let Some(expiration) = resource.expiration_date {
                    if expiration < Utc::now() {
                        return (false, None);
                    }
                }
                (true, Some(resource))
            }
            None => (false, None),
        }
    }
}

/// Normalize a date-granularity expiration to midnight UTC.
fn midnight_utc(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
