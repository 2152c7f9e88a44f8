//! Approval row model and request DTO

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wg_db::Row;

use crate::error::{StoreError, StoreResult};

/// Minimum trimmed length of an approval justification.
const MIN_JUSTIFICATION_LEN: usize = 10;

/// One approval row, reconstructed from a warehouse result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedResource {
    pub resource_name: String,
    pub resource_id: String,
    pub workspace_id: String,
    pub workspace_name: String,
    pub resource_creator: String,
    pub approved_by: String,
    pub approval_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub justification: String,
    pub is_approved: bool,
    pub revoked_date: Option<DateTime<Utc>>,
    pub revoked_by: Option<String>,
    pub revoked_reason: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApprovedResource {
    /// Build a resource from a decoded row map. Missing string columns
    /// become empty strings, missing or unparseable timestamps become
    /// `None`; booleans are already native after executor decoding.
    pub fn from_row(row: &Row) -> Self {
        Self {
            resource_name: str_field(row, "resource_name"),
            resource_id: str_field(row, "resource_id"),
            workspace_id: str_field(row, "workspace_id"),
            workspace_name: str_field(row, "workspace_name"),
            resource_creator: str_field(row, "resource_creator"),
            approved_by: str_field(row, "approved_by"),
            approval_date: ts_field(row, "approval_date"),
            expiration_date: ts_field(row, "expiration_date"),
            justification: str_field(row, "justification"),
            is_approved: bool_field(row, "is_approved"),
            revoked_date: ts_field(row, "revoked_date"),
            revoked_by: opt_str_field(row, "revoked_by"),
            revoked_reason: opt_str_field(row, "revoked_reason"),
            updated_at: ts_field(row, "updated_at"),
        }
    }

    /// The validity predicate: approved, not revoked, and not expired as
    /// of `now`. Expiration is re-evaluated on every read.
    pub fn currently_approved(&self, now: DateTime<Utc>) -> bool {
        self.is_approved
            && self.revoked_date.is_none()
            && self.expiration_date.map_or(true, |exp| exp >= now)
    }
}

/// Validated input for an approval upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub resource_name: String,
    pub resource_id: String,
    pub workspace_id: String,
    pub workspace_name: String,
    pub resource_creator: String,
    pub approved_by: String,
    /// Defaults to the current time when absent
    pub approval_date: Option<DateTime<Utc>>,
    /// Date-granularity; normalized to midnight UTC when written
    pub expiration_date: Option<DateTime<Utc>>,
    pub justification: String,
}

impl ApprovalRequest {
    /// Validate request data before any SQL is built.
    pub fn validate(&self) -> StoreResult<()> {
        if self.resource_id.trim().is_empty() {
            return Err(StoreError::Validation("resource_id is required".to_string()));
        }
        if self.workspace_id.trim().is_empty() {
            return Err(StoreError::Validation("workspace_id is required".to_string()));
        }
        if self.justification.trim().chars().count() < MIN_JUSTIFICATION_LEN {
            return Err(StoreError::Validation(format!(
                "Justification must be at least {MIN_JUSTIFICATION_LEN} characters"
            )));
        }
        Ok(())
    }
}

fn str_field(row: &Row, key: &str) -> String {
    opt_str_field(row, key).unwrap_or_default()
}

fn opt_str_field(row: &Row, key: &str) -> Option<String> {
    match row.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn bool_field(row: &Row, key: &str) -> bool {
    match row.get(key) {
        Some(Value::Bool(b)) => *b,
        // Executor coercion only covers columns declared BOOLEAN; a
        // boolean read through a differently-declared column is text.
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn ts_field(row: &Row, key: &str) -> Option<DateTime<Utc>> {
    match row.get(key) {
        Some(Value::String(s)) => parse_timestamp(s),
        _ => None,
    }
}

/// Parse the timestamp shapes the warehouse emits: space-separated with
/// optional fractional seconds, RFC 3339, or a bare date.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
