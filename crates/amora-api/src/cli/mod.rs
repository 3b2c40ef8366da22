//! CLI argument definitions for the `amora` binary.

pub mod seed;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// Amora: relationship coaching chat backend.
#[derive(Parser)]
#[command(name = "amora", version, about = "Relationship coaching chat backend")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Bind address (overrides config.toml)
        #[arg(long, env = "AMORA_HOST")]
        host: Option<String>,

        /// Bind port (overrides config.toml)
        #[arg(long, env = "AMORA_PORT")]
        port: Option<u16>,

        /// Export spans via OpenTelemetry (stdout exporter)
        #[arg(long)]
        otel: bool,
    },

    /// Load or refresh the ritual pack catalog from a TOML file
    SeedPacks {
        /// Path to the pack catalog file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
