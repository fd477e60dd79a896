//! Configuration and result data types.

pub mod check;
pub mod config;
pub mod yaml;

pub use check::*;
pub use config::{ConfigSource, Configuration, CONFIG_FILE_NAME};
