//! Configuration-related CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::data::config::{Configuration, CONFIG_FILE_NAME, DEFAULT_CONFIG_YAML};
use crate::data::yaml;
use crate::engine::CheckError;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Prints the effective configuration.
    Show(ShowCommand),
    /// Writes the default configuration to .commit-check.yml.
    Init(InitCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Path to the configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Directory searched for .commit-check.yml.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,
}

/// Init command options.
#[derive(Parser)]
pub struct InitCommand {
    /// Where to write the configuration.
    #[arg(long, value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    pub path: PathBuf,

    /// Overwrites an existing file.
    #[arg(long)]
    pub force: bool,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
            ConfigSubcommands::Init(init_cmd) => init_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    /// Renders the effective configuration with its source.
    pub fn render(&self) -> Result<String> {
        let (config, source) = Configuration::resolve(self.config.as_deref(), &self.dir)?;
        Ok(format!("# source: {source}\n{}", yaml::to_yaml(&config)?))
    }
}

impl InitCommand {
    /// Executes the init command.
    pub fn execute(self) -> Result<()> {
        write_default_config(&self.path, self.force)?;
        println!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Writes the built-in configuration, refusing to clobber unless `force`.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CheckError::ConfigExists(path.to_path_buf()).into());
    }
    fs::write(path, DEFAULT_CONFIG_YAML)
        .with_context(|| format!("Failed to write {}", path.display()))
}
