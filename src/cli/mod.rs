//! CLI module for productdb
//!
//! Provides command-line interface for:
//! - init: Create the data file
//! - serve: Run the HTTP server
//! - list: One-shot listing / filtering

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, ConfigArgs};
pub use commands::{init, list, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments, start a runtime, and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to start runtime: {}", e)))?;
    runtime.block_on(run_command(cli.command))
}
