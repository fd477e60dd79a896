//! Fatal check-engine errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an evaluation.
///
/// Match failures are not errors; they are reported and folded into the
/// aggregate result.
#[derive(Error, Debug)]
pub enum CheckError {
    /// A configured pattern is not a valid regex.
    #[error("Invalid regex {pattern:?}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser error.
        #[source]
        source: regex::Error,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Refusing to overwrite an existing configuration file.
    #[error("Configuration file already exists: {} (use --force to overwrite)", .0.display())]
    ConfigExists(PathBuf),
}
