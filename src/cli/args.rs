//! CLI argument definitions using clap
//!
//! Commands:
//! - productdb init  [--config <path>] [--data-dir <dir>]
//! - productdb serve [--config <path>] [--data-dir <dir>] [--host <host>] [--port <port>]
//! - productdb list  [--config <path>] [--data-dir <dir>] [--category <c> | --query <q>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// productdb - product catalogue backed by a JSON file
#[derive(Parser, Debug)]
#[command(name = "productdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(long, default_value = "./productdb.json")]
    pub config: PathBuf,

    /// Override the data directory from the config file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data file, seeding it from the sample dataset if present
    Init {
        #[command(flatten)]
        args: ConfigArgs,
    },

    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        args: ConfigArgs,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print products as a JSON result envelope
    List {
        #[command(flatten)]
        args: ConfigArgs,

        /// Only products in this category (case-insensitive)
        #[arg(long, conflicts_with = "query")]
        category: Option<String>,

        /// Only products whose name contains this text (case-insensitive)
        #[arg(long, short)]
        query: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
