use super::*;
use chrono::TimeZone;

#[test]
fn test_escape_literal_doubles_quotes() {
    assert_eq!(escape_literal("no quotes"), "no quotes");
    assert_eq!(escape_literal("it's fine"), "it''s fine");
    assert_eq!(escape_literal("''"), "''''");
    assert_eq!(escape_literal(""), "");
}

#[test]
fn test_quote_literal_wraps_and_escapes() {
    assert_eq!(quote_literal("abc"), "'abc'");
    assert_eq!(quote_literal("o'brien"), "'o''brien'");
}

#[test]
fn test_quote_literal_injection_attempt() {
    // A classic injection payload must come out as inert literal content.
    let payload = "x'; DROP TABLE approved_resources; --";
    assert_eq!(
        quote_literal(payload),
        "'x''; DROP TABLE approved_resources; --'"
    );
}

#[test]
fn test_sql_opt_literal() {
    assert_eq!(sql_opt_literal(Some("reason")), "'reason'");
    assert_eq!(sql_opt_literal(None), "NULL");
}

#[test]
fn test_format_sql_timestamp_second_granularity() {
    let ts = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
    assert_eq!(format_sql_timestamp(ts), "2025-03-14 09:26:53");
}
