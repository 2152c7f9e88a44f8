use std::sync::Arc;

use chrono::{Duration, TimeZone};

use wg_db::mock::{MockOutcome, MockStatementClient};
use wg_db::SqlExecutor;

use super::*;
use crate::model::ApprovalRequest;

fn new_store() -> (ApprovalStore, Arc<MockStatementClient>) {
    let client = Arc::new(MockStatementClient::new());
    let executor = SqlExecutor::new(client.clone(), "wh-test");
    (ApprovalStore::new(executor, "main", "wg"), client)
}

fn request() -> ApprovalRequest {
    ApprovalRequest {
        resource_name: "churn-model".to_string(),
        resource_id: "res-123".to_string(),
        workspace_id: "ws-9".to_string(),
        workspace_name: "analytics".to_string(),
        resource_creator: "dana@example.com".to_string(),
        approved_by: "lee@example.com".to_string(),
        approval_date: None,
        expiration_date: None,
        justification: "needed for production scoring".to_string(),
    }
}

fn resource_columns() -> Vec<(&'static str, &'static str)> {
    vec![
        ("resource_name", "STRING"),
        ("resource_id", "STRING"),
        ("workspace_id", "STRING"),
        ("is_approved", "BOOLEAN"),
        ("expiration_date", "TIMESTAMP"),
        ("justification", "STRING"),
    ]
}

fn approved_row<'a>(resource_id: &'a str, expiration: Option<&'a str>) -> Vec<Option<&'a str>> {
    vec![
        Some("churn-model"),
        Some(resource_id),
        Some("ws-9"),
        Some("true"),
        expiration,
        Some("production scoring"),
    ]
}

#[tokio::test]
async fn test_approve_issues_single_merge() {
    let (store, client) = new_store();

    store.approve(&request()).await.unwrap();

    let executed = client.executed();
    assert_eq!(executed.len(), 1);
    let merge = &executed[0];
    assert!(merge.starts_with("MERGE INTO main.wg.approved_resources AS target"));
    assert!(merge.contains("'res-123' AS resource_id"));
    assert!(merge.contains("ON target.resource_id = source.resource_id AND target.workspace_id = source.workspace_id"));
    assert!(merge.contains("WHEN MATCHED THEN UPDATE SET *"));
    assert!(merge.contains("WHEN NOT MATCHED THEN INSERT *"));
    assert!(merge.contains("NULL AS expiration_date"));
    // Re-approval clears any prior revocation in the same statement.
    assert!(merge.contains("NULL AS revoked_date"));
    assert!(merge.contains("NULL AS revoked_by"));
    assert!(merge.contains("NULL AS revoked_reason"));
    assert!(merge.contains("true AS is_approved"));
}

#[tokio::test]
async fn test_approve_normalizes_expiration_to_midnight() {
    let (store, client) = new_store();
    let mut req = request();
    req.expiration_date = Some(Utc.with_ymd_and_hms(2025, 6, 15, 13, 45, 12).unwrap());

    store.approve(&req).await.unwrap();

    let merge = &client.executed()[0];
    assert!(merge.contains("TIMESTAMP '2025-06-15 00:00:00' AS expiration_date"));
}

#[tokio::test]
async fn test_approve_escapes_justification() {
    let (store, client) = new_store();
    let mut req = request();
    req.justification = "it's required; can't run without it".to_string();

    store.approve(&req).await.unwrap();

    let merge = &client.executed()[0];
    assert!(merge.contains("'it''s required; can''t run without it' AS justification"));
}

#[tokio::test]
async fn test_approve_rejects_short_justification_before_sql() {
    let (store, client) = new_store();
    let mut req = request();
    req.justification = "too short".to_string(); // 9 chars

    let err = store.approve(&req).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(client.executed().is_empty());
}

#[tokio::test]
async fn test_approve_failure_maps_to_approval_error() {
    let (store, client) = new_store();
    client.on("MERGE INTO", MockOutcome::Failed("DELTA_CONCURRENT_WRITE".to_string()));

    let err = store.approve(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Approval { ref resource, .. } if resource == "churn-model"
    ));
}

#[tokio::test]
async fn test_revoke_issues_targeted_update() {
    let (store, client) = new_store();

    store
        .revoke("res-123", "ws-9", "sec-ops@example.com", "model deprecated; it's stale")
        .await
        .unwrap();

    let executed = client.executed();
    assert_eq!(executed.len(), 1);
    let update = &executed[0];
    assert!(update.starts_with("UPDATE main.wg.approved_resources SET"));
    assert!(update.contains("is_approved = FALSE"));
    assert!(update.contains("revoked_by = 'sec-ops@example.com'"));
    assert!(update.contains("revoked_reason = 'model deprecated; it''s stale'"));
    assert!(update.contains("updated_at = CURRENT_TIMESTAMP()"));
    assert!(update.contains("WHERE resource_id = 'res-123' AND workspace_id = 'ws-9'"));
}

#[tokio::test]
async fn test_revoke_failure_maps_to_revocation_error() {
    let (store, client) = new_store();
    client.on("UPDATE", MockOutcome::Transport("connection reset".to_string()));

    let err = store.revoke("res-123", "ws-9", "ops", "reason text").await.unwrap_err();
    assert!(matches!(err, StoreError::Revocation { .. }));
}

#[tokio::test]
async fn test_list_approved_filters_revoked_in_sql() {
    let (store, client) = new_store();
    client.on(
        "SELECT * FROM",
        MockOutcome::rows(
            &resource_columns(),
            vec![approved_row("res-1", None), approved_row("res-2", None)],
        ),
    );

    let resources = store.list_approved(None).await.unwrap();
    assert_eq!(resources.len(), 2);
    assert!(resources.iter().all(|r| r.is_approved));

    let sql = &client.executed()[0];
    assert!(sql.contains("WHERE is_approved = true AND revoked_date IS NULL"));
    assert!(!sql.contains("workspace_id ="));
}

#[tokio::test]
async fn test_list_approved_workspace_filter() {
    let (store, client) = new_store();

    store.list_approved(Some("ws-9")).await.unwrap();

    assert!(client.executed()[0].contains("AND workspace_id = 'ws-9'"));
}

#[tokio::test]
async fn test_list_approved_propagates_db_errors() {
    let (store, client) = new_store();
    client.on("SELECT * FROM", MockOutcome::Transport("gateway timeout".to_string()));

    let err = store.list_approved(None).await.unwrap_err();
    assert!(matches!(err, StoreError::Db(_)));
}

#[tokio::test]
async fn test_is_approved_true_without_expiration() {
    let (store, client) = new_store();
    client.on(
        "SELECT * FROM",
        MockOutcome::rows(&resource_columns(), vec![approved_row("res-123", None)]),
    );

    let (approved, details) = store.is_approved("res-123", "ws-9").await;
    assert!(approved);
    assert_eq!(details.unwrap().resource_id, "res-123");
}

#[tokio::test]
async fn test_is_approved_expired_yesterday_is_false() {
    let (store, client) = new_store();
    let yesterday = (Utc::now() - Duration::days(1))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    client.on(
        "SELECT * FROM",
        MockOutcome::rows(
            &resource_columns(),
            vec![approved_row("res-123", Some(yesterday.as_str()))],
        ),
    );

    let (approved, details) = store.is_approved("res-123", "ws-9").await;
    assert!(!approved);
    assert!(details.is_none());
}

#[tokio::test]
async fn test_is_approved_expiring_tomorrow_is_true() {
    let (store, client) = new_store();
    let tomorrow = (Utc::now() + Duration::days(1))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    client.on(
        "SELECT * FROM",
        MockOutcome::rows(
            &resource_columns(),
            vec![approved_row("res-123", Some(tomorrow.as_str()))],
        ),
    );

    let (approved, _) = store.is_approved("res-123", "ws-9").await;
    assert!(approved);
}

#[tokio::test]
async fn test_is_approved_no_row_is_false() {
    let (store, _client) = new_store();
    let (approved, details) = store.is_approved("res-404", "ws-9").await;
    assert!(!approved);
    assert!(details.is_none());
}

#[tokio::test]
async fn test_is_approved_swallows_errors() {
    let (store, client) = new_store();
    client.on("SELECT * FROM", MockOutcome::Transport("warehouse unavailable".to_string()));

    // The gate must never raise.
    let (approved, details) = store.is_approved("res-123", "ws-9").await;
    assert!(!approved);
    assert!(details.is_none());
}

#[tokio::test]
async fn test_is_approved_scopes_query_to_identity() {
    let (store, client) = new_store();

    store.is_approved("res-123", "ws-9").await;

    let sql = &client.executed()[0];
    assert!(sql.contains("resource_id = 'res-123'"));
    assert!(sql.contains("workspace_id = 'ws-9'"));
    assert!(sql.contains("is_approved = true AND revoked_date IS NULL"));
}
