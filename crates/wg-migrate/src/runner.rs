//! Migration runner
//!
//! Orchestrates one migration pass: verify the catalog exists, ensure the
//! schema, bootstrap the tracking table, diff the static catalog against
//! recorded versions, and apply the difference. Designed to be safe under
//! partial failure and under concurrent startup of multiple instances:
//! every step is idempotent and "already exists" failures are recorded as
//! successful no-ops.

use std::collections::HashSet;
use std::env;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;

use wg_core::{compute_checksum, format_sql_timestamp, quote_literal, sql_opt_literal};
use wg_db::{is_already_exists, is_missing_relation, SqlExecutor};

use crate::catalog::{builtin_migrations, tracking_table_ddl, validate, Migration};
use crate::error::{MigrateError, MigrateResult};

/// Synthetic audit note for the already-exists no-op path.
const ALREADY_EXISTS_NOTE: &str = "Target already exists (expected)";

/// Outcome counts for one runner invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Migrations newly recorded as applied this run
    pub applied: usize,
    /// Migrations skipped because they were already applied
    pub skipped: usize,
}

/// Applies pending migrations and records each attempt.
pub struct MigrationRunner {
    executor: SqlExecutor,
    catalog: String,
    schema: String,
}

impl MigrationRunner {
    pub fn new(executor: SqlExecutor, catalog: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            executor,
            catalog: catalog.into(),
            schema: schema.into(),
        }
    }

    fn tracking_table(&self) -> String {
        format!("{}.{}.migration_definitions", self.catalog, self.schema)
    }

    /// Run all pending migrations.
    ///
    /// Idempotent: a second invocation against the same schema reproduces
    /// the same applied set, and a fully migrated schema short-circuits
    /// after the applied-version read.
    pub async fn run(&self) -> MigrateResult<MigrationSummary> {
        log::info!(
            "starting schema migrations for {}.{}",
            self.catalog,
            self.schema
        );

        self.verify_catalog().await?;
        self.ensure_schema().await?;
        self.bootstrap_tracking_table().await?;

        let applied = self.applied_versions().await;

        let migrations = builtin_migrations(&self.catalog, &self.schema);
        validate(&migrations)?;

        if migrations.iter().all(|m| applied.contains(&m.version)) {
            log::info!(
                "all {} migration(s) already applied, nothing to do",
                migrations.len()
            );
            return Ok(MigrationSummary {
                applied: 0,
                skipped: migrations.len(),
            });
        }

        let summary = self.apply(&migrations, &applied).await?;
        log::info!(
            "migration run complete: {} applied, {} skipped",
            summary.applied,
            summary.skipped
        );
        Ok(summary)
    }

    /// Fail fast if the catalog is absent. Catalog creation is an
    /// administrative act outside this subsystem's authority.
    async fn verify_catalog(&self) -> MigrateResult<()> {
        let sql = format!("USE CATALOG {}", self.catalog);
        match self.executor.execute(&sql).await {
            Ok(_) => {
                log::debug!("catalog '{}' verified", self.catalog);
                Ok(())
            }
            Err(err) => {
                log::error!(
                    "catalog '{}' is not accessible; it must be pre-created: {err}",
                    self.catalog
                );
                Err(MigrateError::CatalogMissing {
                    catalog: self.catalog.clone(),
                })
            }
        }
    }

    /// Probe the schema; create it if the probe fails or comes back empty.
    /// `CREATE SCHEMA IF NOT EXISTS` is unconditionally safe to re-issue.
    async fn ensure_schema(&self) -> MigrateResult<()> {
        let qualified = format!("{}.{}", self.catalog, self.schema);

        match self.executor.execute(&format!("DESCRIBE SCHEMA {qualified}")).await {
            Ok(rows) if !rows.is_empty() => {
                log::debug!("schema {qualified} already exists");
                return Ok(());
            }
            Ok(_) => log::info!("schema probe returned nothing, creating {qualified}"),
            Err(err) => log::info!("schema {qualified} not found ({err}), creating it"),
        }

        self.executor
            .execute(&format!("CREATE SCHEMA IF NOT EXISTS {qualified}"))
            .await
            .map_err(|err| MigrateError::Schema {
                schema: qualified.clone(),
                message: err.to_string(),
            })?;

        log::info!("schema created: {qualified}");
        Ok(())
    }

    /// Create the tracking table before anything else; without an audit
    /// trail nothing else may proceed.
    async fn bootstrap_tracking_table(&self) -> MigrateResult<()> {
        let ddl = tracking_table_ddl(&self.catalog, &self.schema);
        self.executor
            .execute(&ddl)
            .await
            .map_err(|err| MigrateError::Bootstrap {
                message: err.to_string(),
            })?;

        // Best-effort visibility check, never fatal.
        let count_sql = format!("SELECT COUNT(*) AS cnt FROM {}", self.tracking_table());
        match self.executor.execute(&count_sql).await {
            Ok(rows) => {
                if let Some(cnt) = rows.first().and_then(|r| r.get("cnt")) {
                    log::info!("migration table holds {cnt} record(s)");
                }
            }
            Err(err) => log::warn!("could not count migration records: {err}"),
        }

        Ok(())
    }

    /// Read the set of versions already recorded as applied.
    ///
    /// Never fails: a missing table means first run, and any other read
    /// failure degrades to an empty set because an audit-read problem must
    /// not block forward progress on an append-only log.
    async fn applied_versions(&self) -> HashSet<u32> {
        let sql = format!(
            "SELECT version, description, applied_at, status FROM {} \
             WHERE status = 'applied' ORDER BY version",
            self.tracking_table()
        );

        let rows = match self.executor.execute(&sql).await {
            Ok(rows) => rows,
            Err(err) => {
                let message = err.to_string();
                if is_missing_relation(&message) {
                    log::info!("migration table not present yet, treating as first run");
                } else {
                    log::error!(
                        "could not read applied migrations, continuing with empty set: {message}"
                    );
                }
                return HashSet::new();
            }
        };

        let mut versions = HashSet::new();
        for row in &rows {
            // The warehouse does not guarantee a stable wire type for
            // `version` across calls; coerce and skip what won't parse.
            match row.get("version").and_then(parse_version) {
                Some(version) => {
                    versions.insert(version);
                }
                None => log::warn!(
                    "ignoring migration row with unparseable version: {:?}",
                    row.get("version")
                ),
            }
        }

        log::info!("found {} applied migration(s)", versions.len());
        versions
    }

    async fn apply(
        &self,
        migrations: &[Migration],
        applied: &HashSet<u32>,
    ) -> MigrateResult<MigrationSummary> {
        let mut summary = MigrationSummary::default();

        for migration in migrations {
            if applied.contains(&migration.version) {
                log::info!(
                    "[skip] migration {} already applied: {}",
                    migration.version,
                    migration.description
                );
                summary.skipped += 1;
                continue;
            }

            log::info!(
                "[apply] migration {}: {}",
                migration.version,
                migration.description
            );

            let started = Instant::now();
            match self.executor.execute(&migration.sql).await {
                Ok(_) => {
                    let secs = started.elapsed().as_secs_f64();
                    self.record(migration, "applied", secs, None).await;
                    summary.applied += 1;
                    log::info!(
                        "[done] migration {} completed in {secs:.2}s",
                        migration.version
                    );
                }
                Err(err) => {
                    let secs = started.elapsed().as_secs_f64();
                    let message = err.to_string();

                    if is_already_exists(&message) {
                        // Racing instances and re-runs land here; the
                        // steady state, not an error.
                        log::info!(
                            "[done] migration {} target already exists",
                            migration.version
                        );
                        self.record(migration, "applied", secs, Some(ALREADY_EXISTS_NOTE))
                            .await;
                        summary.applied += 1;
                    } else {
                        log::error!("[failed] migration {}: {message}", migration.version);
                        self.record(migration, "failed", secs, Some(&message)).await;

                        // Only structural failures abort the run; later
                        // migrations may be independent of this one.
                        if migration.sql.contains("CREATE TABLE") {
                            return Err(MigrateError::Critical {
                                version: migration.version,
                                message,
                            });
                        }
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Append one audit row for an attempt. A re-attempted version gets a
    /// fresh row rather than an update. Recording failures are logged and
    /// swallowed; the audit trail never blocks the run itself.
    async fn record(
        &self,
        migration: &Migration,
        status: &str,
        execution_secs: f64,
        error_message: Option<&str>,
    ) {
        let now = format_sql_timestamp(Utc::now());
        let checksum = compute_checksum(&migration.sql);
        let actor = env::var("DATABRICKS_USER").unwrap_or_else(|_| "system".to_string());

        let insert = format!(
            "INSERT INTO {table} \
             (version, description, sql_statement, checksum, status, applied_at, \
              execution_time_seconds, error_message, created_at, updated_at, created_by, updated_by) \
             VALUES ({version}, {description}, {sql}, '{checksum}', '{status}', \
              TIMESTAMP '{now}', {execution_secs}, {error}, \
              TIMESTAMP '{now}', TIMESTAMP '{now}', {actor}, {actor})",
            table = self.tracking_table(),
            version = migration.version,
            description = quote_literal(&migration.description),
            sql = quote_literal(&migration.sql),
            error = sql_opt_literal(error_message),
            actor = quote_literal(&actor),
        );

        match self.executor.execute(&insert).await {
            Ok(_) => log::debug!("recorded migration {} as {status}", migration.version),
            Err(err) => log::error!(
                "failed to record migration {}: {err}",
                migration.version
            ),
        }
    }
}

fn parse_version(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
