//! Error types for wg-migrate

use thiserror::Error;

/// Migration subsystem errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// M001: Target catalog is absent or inaccessible. Catalogs are an
    /// administrative resource this subsystem never creates.
    #[error("[M001] Catalog '{catalog}' does not exist or is not accessible; it must be pre-created by a warehouse admin")]
    CatalogMissing { catalog: String },

    /// M002: Schema could not be created
    #[error("[M002] Schema bootstrap failed for {schema}: {message}")]
    Schema { schema: String, message: String },

    /// M003: The migration tracking table could not be created
    #[error("[M003] Failed to create migration tracking table: {message}")]
    Bootstrap { message: String },

    /// M004: A structural migration failed; nothing downstream can proceed
    #[error("[M004] Critical migration {version} failed: {message}")]
    Critical { version: u32, message: String },

    /// M005: Catalog validation - no migrations defined
    #[error("[M005] No migrations defined")]
    EmptyCatalog,

    /// M006: Catalog validation - a migration is missing required content
    #[error("[M006] Migration {version} has an empty {field}")]
    EmptyField { version: u32, field: &'static str },

    /// M007: Catalog validation - duplicate versions
    #[error("[M007] Duplicate migration versions: {versions}")]
    DuplicateVersions { versions: String },

    /// M008: Catalog validation - versions are not exactly 1..=N
    #[error("[M008] Migration versions must be sequential starting from 1, got: {versions}")]
    NonSequential { versions: String },

    /// M009: Catalog validation - definitions not listed in version order
    #[error("[M009] Migrations must be listed in ascending version order, got: {versions}")]
    OutOfOrder { versions: String },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
