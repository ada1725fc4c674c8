// confbind - Configuration schema binding
// Copyright (c) 2025 confbind Contributors
// Licensed under the MIT License

use clap::Parser;
use confbind::cli::{Cli, Commands};
use confbind::logging::{init_logging, LogFormat};
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("warn");
    let initialized = cli
        .log_format
        .parse::<LogFormat>()
        .and_then(|format| init_logging(log_level, format));
    if let Err(e) = initialized {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "confbind");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Bind(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    }
}
