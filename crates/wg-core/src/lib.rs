//! wg-core - Core library for Workspace Guardian
//!
//! This crate provides the shared plumbing used by every other Workspace
//! Guardian component: environment-driven configuration, the SHA-256
//! checksum helper used for migration integrity, and the SQL quoting
//! utilities that make string-interpolated statements safe to build.

pub mod checksum;
pub mod config;
pub mod error;
pub mod sql_utils;

pub use checksum::compute_checksum;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use sql_utils::{escape_literal, format_sql_timestamp, quote_literal, sql_opt_literal};
