//! Check configuration loading.
//!
//! The configuration is resolved once per invocation from, in order: an
//! explicit `--config` path, `.commit-check.yml` in the repository directory,
//! `$HOME/.commit-gate/config.yml`, and finally the built-in defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::check::{CheckKind, CheckSpec};
use crate::data::yaml;
use crate::engine::CheckError;

/// File name looked up in the repository directory.
pub const CONFIG_FILE_NAME: &str = ".commit-check.yml";

/// Built-in configuration used when no file is found.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../templates/default-config.yml");

/// Ordered list of configured checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Checks in configuration order.
    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file on disk.
    File(PathBuf),
    /// The embedded defaults.
    BuiltIn,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => write!(f, "built-in defaults"),
        }
    }
}

impl Configuration {
    /// Creates a configuration from specs.
    pub fn new(checks: Vec<CheckSpec>) -> Self {
        Self { checks }
    }

    /// Parses the embedded default configuration.
    pub fn built_in() -> Result<Self> {
        yaml::from_yaml(DEFAULT_CONFIG_YAML).context("Built-in configuration is invalid")
    }

    /// Loads a configuration file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        yaml::read_yaml_file(path.as_ref())
    }

    /// Resolves and loads the effective configuration.
    pub fn resolve(explicit: Option<&Path>, base_dir: &Path) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CheckError::ConfigNotFound(path.to_path_buf()).into());
            }
            let config = Self::load_from_path(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        for candidate in Self::search_paths(base_dir) {
            if candidate.is_file() {
                tracing::debug!("Loading configuration from {}", candidate.display());
                let config = Self::load_from_path(&candidate)?;
                return Ok((config, ConfigSource::File(candidate)));
            }
        }

        tracing::debug!("No configuration file found, using built-in defaults");
        Ok((Self::built_in()?, ConfigSource::BuiltIn))
    }

    /// Candidate configuration files in lookup order.
    pub fn search_paths(base_dir: &Path) -> Vec<PathBuf> {
        let mut paths = vec![base_dir.join(CONFIG_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".commit-gate").join("config.yml"));
        }
        paths
    }

    /// Kinds with at least one spec, in evaluation order.
    pub fn configured_kinds(&self) -> Vec<CheckKind> {
        CheckKind::ALL
            .into_iter()
            .filter(|kind| self.checks.iter().any(|spec| spec.kind == *kind))
            .collect()
    }
}
