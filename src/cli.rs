//! CLI interface for commit-gate.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod config;

pub use check::CheckCommand;
pub use config::ConfigCommand;

/// commit-gate: validates branch, author, message and file conventions.
#[derive(Parser)]
#[command(name = "commit-gate")]
#[command(about = "Pre-commit and CI gate for repository conventions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Runs the configured checks against the repository.
    Check(CheckCommand),
    /// Shows or initializes the configuration.
    Config(ConfigCommand),
}

impl Cli {
    /// Executes the CLI command and returns the process exit code.
    pub fn execute(self) -> Result<i32> {
        match self.command {
            Commands::Check(check_cmd) => check_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute().map(|()| 0),
        }
    }
}
