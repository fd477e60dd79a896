//! Check command — validates repository state against the configured checks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::data::check::{CheckKind, CheckReport, OutputFormat};
use crate::data::config::Configuration;
use crate::data::yaml;
use crate::engine::{self, CollectingReporter, EvalContext, RegexMatcher, Reporter, TerminalReporter};
use crate::git::{GitMetadata, GitRepository};

/// Check command options.
#[derive(Parser, Debug, Default)]
pub struct CheckCommand {
    /// Path to the configuration file (defaults to .commit-check.yml).
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Path to the repository (defaults to the current directory).
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Checks the branch name.
    #[arg(long)]
    pub branch: bool,

    /// Checks the author name.
    #[arg(long)]
    pub author_name: bool,

    /// Checks the author email.
    #[arg(long)]
    pub author_email: bool,

    /// Checks the commit message.
    #[arg(long)]
    pub message: bool,

    /// Checks the Signed-off-by trailer.
    #[arg(long, alias = "commit-signoff")]
    pub signoff: bool,

    /// Checks the names of committed files.
    #[arg(long)]
    pub file_name: bool,

    /// Checks that the branch is based on the configured branches.
    #[arg(long)]
    pub merge_base: bool,

    /// Checks an existing commit instead of the staged state (e.g. HEAD in CI).
    #[arg(long, value_name = "REV")]
    pub rev: Option<String>,

    /// Reads the commit message from a file (the commit-msg hook argument).
    #[arg(long, value_name = "PATH")]
    pub message_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Runs and reports every check but always exits with 0.
    #[arg(long)]
    pub dry_run: bool,
}

impl CheckCommand {
    /// Executes the check command and returns the process exit code.
    pub fn execute(self) -> Result<i32> {
        let report = match self.format {
            OutputFormat::Text => {
                let mut reporter = TerminalReporter::stdout();
                self.run(&mut reporter)?
            }
            OutputFormat::Json | OutputFormat::Yaml => {
                let mut reporter = CollectingReporter::new();
                let mut report = self.run(&mut reporter)?;
                report.diagnostics = reporter.into_diagnostics();
                let rendered = if self.format == OutputFormat::Json {
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?
                } else {
                    yaml::to_yaml(&report)?
                };
                println!("{rendered}");
                report
            }
        };

        Ok(report.exit_code(self.dry_run))
    }

    /// Kinds selected by flags; empty means every configured kind.
    pub fn selection(&self) -> Vec<CheckKind> {
        let flags = [
            (self.branch, CheckKind::BranchName),
            (self.author_name, CheckKind::AuthorName),
            (self.author_email, CheckKind::AuthorEmail),
            (self.message, CheckKind::CommitMessage),
            (self.signoff, CheckKind::CommitSignoff),
            (self.file_name, CheckKind::FileName),
            (self.merge_base, CheckKind::MergeBase),
        ];
        flags
            .into_iter()
            .filter_map(|(selected, kind)| selected.then_some(kind))
            .collect()
    }

    /// Opens the repository, loads the configuration and evaluates it.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<CheckReport> {
        let repo_dir = self.repo.as_deref().unwrap_or_else(|| Path::new("."));
        let repo = GitRepository::open_at(repo_dir)
            .context("Failed to open git repository. Make sure you're in a git repository.")?;
        let base_dir = repo.workdir().unwrap_or(repo_dir).to_path_buf();

        let (config, source) = Configuration::resolve(self.config.as_deref(), &base_dir)?;
        tracing::info!("Using configuration from {source}");

        let provider = GitMetadata::new(repo)
            .with_revision(self.rev.clone())
            .with_message_file(self.message_file.clone());
        let matcher = RegexMatcher::new();
        let mut ctx = EvalContext::new(&provider, &matcher, reporter);

        engine::evaluate(&config, &self.selection(), &mut ctx)
    }
}
