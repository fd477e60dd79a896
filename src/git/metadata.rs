//! Repository metadata consumed by the checks.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::git::GitRepository;

/// Commit field read by the identity and message checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    /// Author name.
    AuthorName,
    /// Author email.
    AuthorEmail,
    /// Full commit message.
    Message,
}

/// Read-only source of repository facts.
///
/// Every call is a fresh read; errors mean the environment cannot answer
/// (for example, not inside a repository) and abort the evaluation.
pub trait MetadataProvider {
    /// Short name of the current branch, empty on a detached HEAD.
    fn branch_name(&self) -> Result<String>;

    /// A field of the commit being checked.
    fn commit_field(&self, field: CommitField) -> Result<String>;

    /// Paths of the files being committed.
    fn changed_files(&self) -> Result<Vec<String>>;

    /// `Signed-off-by:` trailer lines of the commit message.
    ///
    /// An empty list means the commit is not signed off.
    fn signoff_trailers(&self) -> Result<Vec<String>>;

    /// Branches whose tip is HEAD or an ancestor of HEAD.
    fn merge_base_candidates(&self) -> Result<Vec<String>>;
}

const SIGNOFF_PREFIX: &str = "Signed-off-by:";

/// Extracts the signoff trailer lines from a commit message.
pub fn signoff_lines(message: &str) -> Vec<String> {
    message
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(SIGNOFF_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Strips `#` comment lines the way git does for `COMMIT_EDITMSG`.
pub fn strip_comment_lines(message: &str) -> String {
    let kept: Vec<&str> = message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect();
    kept.join("\n").trim_end().to_string()
}

/// [`MetadataProvider`] reading a local git repository.
///
/// Without a revision it describes the commit being created: the configured
/// identity, the staged files and (when given) the message file written by
/// the `commit-msg` hook. With a revision it describes that commit, which is
/// what a CI job checks.
pub struct GitMetadata {
    repo: GitRepository,
    revision: Option<String>,
    message_file: Option<PathBuf>,
}

impl GitMetadata {
    /// Creates a provider for the commit being created.
    pub fn new(repo: GitRepository) -> Self {
        Self {
            repo,
            revision: None,
            message_file: None,
        }
    }

    /// Checks an existing commit instead of the staged state.
    pub fn with_revision(mut self, revision: Option<String>) -> Self {
        self.revision = revision;
        self
    }

    /// Reads the commit message from a file.
    pub fn with_message_file(mut self, message_file: Option<PathBuf>) -> Self {
        self.message_file = message_file;
        self
    }

    fn message(&self) -> Result<String> {
        if let Some(path) = &self.message_file {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read commit message file: {}", path.display()))?;
            return Ok(strip_comment_lines(&raw));
        }

        let commit = self.repo.find_commit(self.revision.as_deref())?;
        Ok(commit
            .map(|c| c.message().unwrap_or_default().to_string())
            .unwrap_or_default())
    }

    fn author(&self, field: CommitField) -> Result<String> {
        if self.revision.is_none() {
            let key = match field {
                CommitField::AuthorName => "user.name",
                _ => "user.email",
            };
            if let Some(value) = self.repo.config_value(key)? {
                return Ok(value);
            }
            tracing::debug!("{key} is not configured, falling back to HEAD author");
        }

        let commit = self.repo.find_commit(self.revision.as_deref())?;
        Ok(commit
            .map(|c| {
                let author = c.author();
                let value = match field {
                    CommitField::AuthorName => author.name(),
                    _ => author.email(),
                };
                value.unwrap_or_default().to_string()
            })
            .unwrap_or_default())
    }
}

impl MetadataProvider for GitMetadata {
    fn branch_name(&self) -> Result<String> {
        self.repo.get_current_branch()
    }

    fn commit_field(&self, field: CommitField) -> Result<String> {
        match field {
            CommitField::AuthorName | CommitField::AuthorEmail => self.author(field),
            CommitField::Message => self.message(),
        }
    }

    fn changed_files(&self) -> Result<Vec<String>> {
        match &self.revision {
            Some(rev) => self.repo.files_in_commit(rev),
            None => self.repo.staged_files(),
        }
    }

    fn signoff_trailers(&self) -> Result<Vec<String>> {
        Ok(signoff_lines(&self.message()?))
    }

    fn merge_base_candidates(&self) -> Result<Vec<String>> {
        self.repo.branches_contained_in_head()
    }
}
