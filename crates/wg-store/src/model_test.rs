use super::*;
use chrono::{Duration, TimeZone};

fn row(entries: &[(&str, Value)]) -> Row {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn base_request() -> ApprovalRequest {
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

#[test]
fn test_from_row_full() {
    let r = row(&[
        ("resource_name", Value::String("churn-model".into())),
        ("resource_id", Value::String("res-123".into())),
        ("workspace_id", Value::String("ws-9".into())),
        ("workspace_name", Value::String("analytics".into())),
        ("resource_creator", Value::String("dana@example.com".into())),
        ("approved_by", Value::String("lee@example.com".into())),
        ("approval_date", Value::String("2025-06-01 08:30:00".into())),
        ("expiration_date", Value::Null),
        ("justification", Value::String("production scoring".into())),
        ("is_approved", Value::Bool(true)),
        ("revoked_date", Value::Null),
        ("revoked_by", Value::Null),
        ("revoked_reason", Value::Null),
        ("updated_at", Value::String("2025-06-01 08:30:00".into())),
    ]);

    let resource = ApprovedResource::from_row(&r);
    assert_eq!(resource.resource_id, "res-123");
    assert!(resource.is_approved);
    assert_eq!(
        resource.approval_date,
        Some(Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap())
    );
    assert_eq!(resource.expiration_date, None);
    assert_eq!(resource.revoked_by, None);
}

#[test]
fn test_from_row_missing_columns_are_lenient() {
    let r = row(&[("resource_id", Value::String("res-1".into()))]);
    let resource = ApprovedResource::from_row(&r);
    assert_eq!(resource.resource_id, "res-1");
    assert_eq!(resource.resource_name, "");
    assert!(!resource.is_approved);
    assert_eq!(resource.approval_date, None);
}

#[test]
fn test_boolean_tolerates_string_transport() {
    let r = row(&[("is_approved", Value::String("True".into()))]);
    assert!(ApprovedResource::from_row(&r).is_approved);
}

#[test]
fn test_parse_timestamp_variants() {
    assert_eq!(
        parse_timestamp("2025-06-01 08:30:00"),
        Some(Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap())
    );
    assert_eq!(
        parse_timestamp("2025-06-01 08:30:00.123"),
        Some(
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
                + Duration::milliseconds(123)
        )
    );
    assert_eq!(
        parse_timestamp("2025-06-01T08:30:00Z"),
        Some(Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap())
    );
    assert_eq!(
        parse_timestamp("2025-06-01"),
        Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_timestamp("not a date"), None);
}

#[test]
fn test_currently_approved_predicate() {
    let now = Utc::now();
    let mut resource = ApprovedResource::from_row(&row(&[("is_approved", Value::Bool(true))]));
    assert!(resource.currently_approved(now));

    resource.expiration_date = Some(now + Duration::days(1));
    assert!(resource.currently_approved(now));

    resource.expiration_date = Some(now - Duration::days(1));
    assert!(!resource.currently_approved(now));

    resource.expiration_date = None;
    resource.revoked_date = Some(now);
    assert!(!resource.currently_approved(now));

    resource.revoked_date = None;
    resource.is_approved = false;
    assert!(!resource.currently_approved(now));
}

#[test]
fn test_justification_length_boundary() {
    let mut request = base_request();

    request.justification = "8 chars!".to_string();
    assert!(matches!(
        request.validate(),
        Err(StoreError::Validation(ref msg)) if msg.contains("at least 10")
    ));

    request.justification = "10 chars!!".to_string();
    request.validate().unwrap();

    // Surrounding whitespace does not count toward the minimum.
    request.justification = "   8 chars!   ".to_string();
    assert!(request.validate().is_err());
}

#[test]
fn test_identity_fields_required() {
    let mut request = base_request();
    request.resource_id = String::new();
    assert!(request.validate().is_err());

    let mut request = base_request();
    request.workspace_id = "  ".to_string();
    assert!(request.validate().is_err());
}
