//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Workspace Guardian - approval tracking for warehouse resources
#[derive(Parser, Debug)]
#[command(name = "wg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the target catalog (defaults to APP_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Override the target schema (defaults to APP_SCHEMA)
    #[arg(long, global = true)]
    pub schema: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Show the recorded migration history
    Status,

    /// List currently approved resources
    Approvals(ApprovalsArgs),
}

/// Arguments for the approvals command
#[derive(Args, Debug)]
pub struct ApprovalsArgs {
    /// Limit the listing to one workspace
    #[arg(short, long)]
    pub workspace_id: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
