//! # commit-gate
//!
//! A pre-commit and CI gate that validates repository state (branch name,
//! author identity, commit message, signoff, committed file names and merge
//! base) against configured regular expressions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use commit_gate::data::Configuration;
//! use commit_gate::engine::{self, EvalContext, RegexMatcher, TerminalReporter};
//! use commit_gate::git::{GitMetadata, GitRepository};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Configuration::built_in()?;
//! let provider = GitMetadata::new(GitRepository::open()?);
//! let matcher = RegexMatcher::new();
//! let mut reporter = TerminalReporter::stdout();
//! let mut ctx = EvalContext::new(&provider, &matcher, &mut reporter);
//!
//! let report = engine::evaluate(&config, &[], &mut ctx)?;
//! std::process::exit(report.exit_code(false));
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod data;
pub mod engine;
pub mod git;

pub use crate::cli::Cli;

/// The current version of commit-gate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
