//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for confbind using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// confbind - bind configuration schemas to configuration sources
#[derive(Parser, Debug)]
#[command(name = "confbind")]
#[command(version, about, long_about = None)]
#[command(author = "confbind Contributors")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CONFBIND_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format (text, json)
    #[arg(long, default_value = "text", env = "CONFBIND_LOG_FORMAT")]
    pub log_format: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bind a schema against a store and print the bound configuration
    Bind(commands::bind::BindArgs),

    /// Check whether a store satisfies a schema
    Check(commands::check::CheckArgs),
}
