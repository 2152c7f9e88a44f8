//! SQL literal quoting utilities
//!
//! The warehouse statement endpoint accepts a single SQL string and offers
//! no parameterized-statement channel, so every value interpolated into a
//! statement must pass through these helpers. Keeping the escaping in one
//! place makes the injection-safety contract auditable.

use chrono::{DateTime, Utc};

/// Escape a value for use inside a single-quoted SQL string literal.
///
/// Doubles embedded single quotes, following the SQL standard.
///
/// # Examples
/// ```
/// use wg_core::sql_utils::escape_literal;
/// assert_eq!(escape_literal("plain"), "plain");
/// assert_eq!(escape_literal("it's"), "it''s");
/// ```
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escape and wrap a value in single quotes, producing a complete literal.
///
/// # Examples
/// ```
/// use wg_core::sql_utils::quote_literal;
/// assert_eq!(quote_literal("it's"), "'it''s'");
/// ```
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_literal(value))
}

/// Render an optional value as a quoted literal or the keyword `NULL`.
pub fn sql_opt_literal(value: Option<&str>) -> String {
    match value {
        Some(v) => quote_literal(v),
        None => "NULL".to_string(),
    }
}

/// Format a UTC timestamp at second granularity for SQL interpolation.
///
/// The warehouse accepts `TIMESTAMP 'YYYY-MM-DD HH:MM:SS'` literals; all
/// timestamps written by this system use this shape.
pub fn format_sql_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
