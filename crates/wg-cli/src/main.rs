//! Workspace Guardian CLI - operator tooling for the approval schema

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG still wins; --verbose only raises the default.
    let default_level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        Commands::Migrate => commands::migrate::execute(&cli.global).await,
        Commands::Status => commands::status::execute(&cli.global).await,
        Commands::Approvals(args) => commands::approvals::execute(args, &cli.global).await,
    }
}
