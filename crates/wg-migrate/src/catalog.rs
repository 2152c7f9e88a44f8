//! Migration catalog
//!
//! All schema migrations are defined here, versioned and idempotent where
//! the warehouse dialect allows it. The catalog is validated before any
//! SQL runs: versions must be exactly `1..=N`, unique, and already listed
//! in ascending order.

use crate::error::{MigrateError, MigrateResult};

/// One statically defined migration.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Positive, contiguous, globally unique version
    pub version: u32,

    /// Human-readable description, stored verbatim in the audit table
    pub description: String,

    /// A single DDL/DML statement
    pub sql: String,
}

/// DDL for the migration tracking table - the first table created in any
/// new schema. It cannot record itself, so no version or checksum applies
/// to this bootstrap statement.
pub fn tracking_table_ddl(catalog: &str, schema: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {catalog}.{schema}.migration_definitions (
    version INT NOT NULL COMMENT 'Migration version number (must be unique)',
    description STRING NOT NULL COMMENT 'Human-readable migration description',
    sql_statement STRING NOT NULL COMMENT 'SQL statement executed',
    checksum STRING NOT NULL COMMENT 'SHA-256 checksum of SQL statement',
    status STRING NOT NULL COMMENT 'Migration status: applied, failed',
    applied_at TIMESTAMP COMMENT 'When migration was applied',
    execution_time_seconds DOUBLE COMMENT 'How long migration took to execute',
    error_message STRING COMMENT 'Error message if migration failed',
    created_at TIMESTAMP NOT NULL COMMENT 'Record creation timestamp',
    updated_at TIMESTAMP NOT NULL COMMENT 'Record last update timestamp',
    created_by STRING NOT NULL COMMENT 'User/service who created record',
    updated_by STRING NOT NULL COMMENT 'User/service who last updated record'
)
USING DELTA
COMMENT 'Migration audit trail - append-only, version uniqueness enforced by application logic'"#
    )
}

/// The ordered migration catalog for the approval schema.
pub fn builtin_migrations(catalog: &str, schema: &str) -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "Create approved_resources table for resource approval tracking"
                .to_string(),
            sql: format!(
                r#"CREATE TABLE IF NOT EXISTS {catalog}.{schema}.approved_resources (
    resource_name STRING COMMENT 'Name of the resource',
    resource_id STRING COMMENT 'Unique resource identifier',
    workspace_id STRING COMMENT 'Workspace identifier',
    workspace_name STRING COMMENT 'Workspace display name',
    resource_creator STRING COMMENT 'User who created the resource',
    approved_by STRING COMMENT 'User who approved the resource',
    approval_date TIMESTAMP COMMENT 'Timestamp of approval',
    expiration_date TIMESTAMP COMMENT 'Optional expiration date',
    justification STRING COMMENT 'Reason for approval',
    is_approved BOOLEAN COMMENT 'Current approval status',
    revoked_date TIMESTAMP COMMENT 'Timestamp when revoked',
    revoked_by STRING COMMENT 'User who revoked approval',
    updated_at TIMESTAMP COMMENT 'Last update timestamp'
)
USING DELTA
COMMENT 'Approved resources with audit trail'"#
            ),
        },
        Migration {
            version: 2,
            description: "Add revoked_reason column to track why approvals were revoked"
                .to_string(),
            sql: format!(
                "ALTER TABLE {catalog}.{schema}.approved_resources \
                 ADD COLUMN revoked_reason STRING COMMENT 'Reason for revocation'"
            ),
        },
    ]
}

/// Validate the whole catalog before anything executes.
///
/// All-or-nothing: any violation aborts the run before the first
/// statement is sent to the warehouse.
pub fn validate(migrations: &[Migration]) -> MigrateResult<()> {
    if migrations.is_empty() {
        return Err(MigrateError::EmptyCatalog);
    }

    for migration in migrations {
        if migration.description.trim().is_empty() {
            return Err(MigrateError::EmptyField {
                version: migration.version,
                field: "description",
            });
        }
        if migration.sql.trim().is_empty() {
            return Err(MigrateError::EmptyField {
                version: migration.version,
                field: "sql",
            });
        }
    }

    let versions: Vec<u32> = migrations.iter().map(|m| m.version).collect();

    let mut sorted = versions.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != versions.len() {
        return Err(MigrateError::DuplicateVersions {
            versions: format!("{versions:?}"),
        });
    }

    let expected: Vec<u32> = (1..=versions.len() as u32).collect();
    if sorted != expected {
        return Err(MigrateError::NonSequential {
            versions: format!("{sorted:?}"),
        });
    }

    if versions != expected {
        return Err(MigrateError::OutOfOrder {
            versions: format!("{versions:?}"),
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
