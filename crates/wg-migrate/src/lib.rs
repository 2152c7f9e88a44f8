//! wg-migrate - Schema migration subsystem for Workspace Guardian
//!
//! Migrations are a statically defined, contiguously versioned catalog of
//! idempotent DDL statements, applied in order against the warehouse and
//! recorded in an append-only audit table. The runner tolerates concurrent
//! bootstrap from multiple application instances: racing processes issue
//! the same idempotent DDL and "already exists" failures are treated as
//! successful no-ops.

pub mod catalog;
pub mod error;
pub mod runner;

pub use catalog::{builtin_migrations, tracking_table_ddl, validate, Migration};
pub use error::{MigrateError, MigrateResult};
pub use runner::{MigrationRunner, MigrationSummary};
