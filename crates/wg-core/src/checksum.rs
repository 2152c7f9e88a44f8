//! SHA-256 checksum utility for migration integrity tracking.

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of a SQL statement.
///
/// Stored alongside each migration record so that drift between the
/// catalog and what was actually executed can be detected after the fact.
pub fn compute_checksum(sql: &str) -> String {
    format!("{:x}", Sha256::digest(sql.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        let a = compute_checksum("CREATE TABLE t (id INT)");
        let b = compute_checksum("CREATE TABLE t (id INT)");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_checksum_detects_drift() {
        assert_ne!(
            compute_checksum("CREATE TABLE t (id INT)"),
            compute_checksum("CREATE TABLE t (id BIGINT)")
        );
    }
}
