//! CLI module for the accounts service
//!
//! - `serve`: run the HTTP API
//! - `migrate`: apply database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Comics accounts service - user registration API
#[derive(Parser)]
#[command(name = "comics-accounts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,

    /// Apply database migrations to the configured PostgreSQL store
    Migrate,
}
