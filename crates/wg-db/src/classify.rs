//! Free-text error classification
//!
//! The warehouse reports several routine conditions only through message
//! text, not structured codes. This module is the single source of truth
//! for interpreting those messages; the executor uses it to pick log
//! severity and the migration runner uses it to decide whether a failure
//! is actually the expected steady state. Both must agree, so neither
//! side does its own substring matching.

/// Marker substrings for conditions that are expected during normal
/// operation (idempotent DDL re-runs, first-run probes of absent tables).
pub const EXPECTED_MARKERS: &[&str] = &[
    "ALREADY_EXISTS",
    "FIELD_ALREADY_EXISTS",
    "TABLE_OR_VIEW_NOT_FOUND",
    "SCHEMA_NOT_FOUND",
];

/// Classification of a warehouse error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// An expected condition; log quietly and let the caller decide.
    Benign,
    /// Anything else; logged at error severity.
    Fatal,
}

/// Classify an error message against the expected-condition markers.
pub fn classify(message: &str) -> ErrorClass {
    if EXPECTED_MARKERS.iter().any(|m| message.contains(m)) {
        ErrorClass::Benign
    } else {
        ErrorClass::Fatal
    }
}

/// Whether the message indicates the migration target already exists.
///
/// Re-applying a migration against a resource that already exists is a
/// successful no-op, not an error.
pub fn is_already_exists(message: &str) -> bool {
    message.contains("ALREADY_EXISTS")
        || message.contains("FIELD_ALREADY_EXISTS")
        || message.to_lowercase().contains("already exists")
}

/// Whether the message indicates a table or schema is simply absent.
///
/// Reading the migration audit table before the first bootstrap hits this;
/// it means "empty history", not a failure.
pub fn is_missing_relation(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("not found")
        || lower.contains("does not exist")
        || lower.contains("table_or_view_not_found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_markers_are_benign() {
        for marker in EXPECTED_MARKERS {
            assert_eq!(classify(&format!("error: {marker} for table x")), ErrorClass::Benign);
        }
    }

    #[test]
    fn test_unknown_errors_are_fatal() {
        assert_eq!(classify("PERMISSION_DENIED: no access"), ErrorClass::Fatal);
        assert_eq!(classify("connection reset by peer"), ErrorClass::Fatal);
    }

    #[test]
    fn test_is_already_exists() {
        assert!(is_already_exists("[ALREADY_EXISTS] table exists"));
        assert!(is_already_exists("FIELD_ALREADY_EXISTS: column revoked_reason"));
        assert!(is_already_exists("Column revoked_reason already exists in schema"));
        assert!(!is_already_exists("TABLE_OR_VIEW_NOT_FOUND"));
    }

    #[test]
    fn test_is_missing_relation() {
        assert!(is_missing_relation("[TABLE_OR_VIEW_NOT_FOUND] cannot resolve"));
        assert!(is_missing_relation("Table main.wg.migration_definitions does not exist"));
        assert!(is_missing_relation("schema not found: wg"));
        assert!(!is_missing_relation("ALREADY_EXISTS"));
    }
}
