//! Error types for wg-core

use thiserror::Error;

/// Core error type for Workspace Guardian
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Required environment variable missing or empty
    #[error("[C001] Missing required environment variable: {name}")]
    MissingEnv { name: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config value for {name}: {message}")]
    InvalidConfig { name: String, message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
