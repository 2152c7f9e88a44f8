//! Environment-driven configuration
//!
//! Workspace Guardian is deployed both as a hosted platform app (where the
//! warehouse credentials are injected by the platform) and locally (where
//! they come from a `.env` file). Either way the configuration is read once
//! at startup and passed down explicitly; there is no global settings
//! object.

use std::env;

use crate::error::{CoreError, CoreResult};

/// Connection and namespace configuration for the warehouse.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the workspace, e.g. `https://acme.cloud.databricks.com`
    pub host: String,

    /// Bearer token used to authenticate against the statement API
    pub token: String,

    /// SQL warehouse identifier statements are routed to
    pub warehouse_id: String,

    /// Top-level catalog holding the application schema (never created by us)
    pub catalog: String,

    /// Schema holding the approval and migration tables
    pub schema: String,
}

const DEFAULT_CATALOG: &str = "main";
const DEFAULT_SCHEMA: &str = "workspace_guardian";

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `DATABRICKS_HOST`, `DATABRICKS_TOKEN` and `DATABRICKS_WAREHOUSE_ID`
    /// are required; `APP_CATALOG` and `APP_SCHEMA` fall back to defaults.
    pub fn from_env() -> CoreResult<Self> {
        Ok(Self {
            host: require("DATABRICKS_HOST")?,
            token: require("DATABRICKS_TOKEN")?,
            warehouse_id: require("DATABRICKS_WAREHOUSE_ID")?,
            catalog: env_or("APP_CATALOG", DEFAULT_CATALOG),
            schema: env_or("APP_SCHEMA", DEFAULT_SCHEMA),
        })
    }

    /// The fully qualified `catalog.schema` pair tables live under.
    pub fn qualified_schema(&self) -> String {
        format!("{}.{}", self.catalog, self.schema)
    }
}

fn require(name: &str) -> CoreResult<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(CoreError::MissingEnv { name: name.to_string() })
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
