//! CLI module - Command-line interface for the account service
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};

/// User account REST service
#[derive(Parser)]
#[command(name = "user-accounts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "run")]
    Serve,

    /// Create a default config.toml with a random token secret
    #[command(alias = "--init")]
    Init,

    /// Load and validate the configuration, then exit
    CheckConfig,
}
