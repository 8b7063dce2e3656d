// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod menu;
pub mod handlers;

pub use commands::{CliCommand, PolicyArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate secure passwords from a character-class policy", long_about = None)]
pub struct Args {
    /// Use JSON for input/output (for API use)
    #[arg(long)]
    pub json: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// API server port
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Run the HTTP API only (no CLI)
    #[arg(long)]
    pub api_only: bool,
}
