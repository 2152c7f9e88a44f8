//! Runtime context for CLI commands
//!
//! The dependency graph is built here, once, and handed to commands:
//! config -> REST client -> executor -> runner/store. No globals.

use std::sync::Arc;

use anyhow::{Context, Result};

use wg_core::Config;
use wg_db::{RestStatementClient, SqlExecutor, StatementClient};
use wg_migrate::MigrationRunner;
use wg_store::ApprovalStore;

use crate::cli::GlobalArgs;

/// Runtime context containing configuration and the shared executor
pub struct AppContext {
    pub executor: SqlExecutor,
    pub catalog: String,
    pub schema: String,
}

impl AppContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let config = Config::from_env().context("Failed to load configuration from environment")?;

        let catalog = args.catalog.clone().unwrap_or_else(|| config.catalog.clone());
        let schema = args.schema.clone().unwrap_or_else(|| config.schema.clone());

        let client: Arc<dyn StatementClient> = Arc::new(
            RestStatementClient::new(&config.host, &config.token)
                .context("Failed to build warehouse client")?,
        );
        let executor = SqlExecutor::new(client, config.warehouse_id);

        log::debug!("Context ready for {catalog}.{schema} on {}", config.host);

        Ok(Self {
            executor,
            catalog,
            schema,
        })
    }

    /// Migration runner bound to the configured namespace
    pub fn runner(&self) -> MigrationRunner {
        MigrationRunner::new(self.executor.clone(), self.catalog.clone(), self.schema.clone())
    }

    /// Approval store bound to the configured namespace
    pub fn store(&self) -> ApprovalStore {
        ApprovalStore::new(self.executor.clone(), &self.catalog, &self.schema)
    }

    /// Fully qualified migration tracking table name
    pub fn tracking_table(&self) -> String {
        format!("{}.{}.migration_definitions", self.catalog, self.schema)
    }
}
