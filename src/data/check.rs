//! Check definitions and result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category of repository property a check validates.
///
/// Declaration order is the evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Current branch name.
    #[serde(alias = "branch")]
    BranchName,
    /// Commit author name.
    AuthorName,
    /// Commit author email.
    AuthorEmail,
    /// Commit message text.
    #[serde(alias = "message")]
    CommitMessage,
    /// `Signed-off-by:` trailer of the commit message.
    #[serde(alias = "signoff")]
    CommitSignoff,
    /// Paths of committed files.
    FileName,
    /// Branches the current work is based on.
    MergeBase,
}

impl CheckKind {
    /// Every kind, in evaluation order.
    pub const ALL: [Self; 7] = [
        Self::BranchName,
        Self::AuthorName,
        Self::AuthorEmail,
        Self::CommitMessage,
        Self::CommitSignoff,
        Self::FileName,
        Self::MergeBase,
    ];

    /// Returns the configuration name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BranchName => "branch_name",
            Self::AuthorName => "author_name",
            Self::AuthorEmail => "author_email",
            Self::CommitMessage => "commit_message",
            Self::CommitSignoff => "commit_signoff",
            Self::FileName => "file_name",
            Self::MergeBase => "merge_base",
        }
    }

    /// Human-readable label used in the skip notice.
    pub fn description(self) -> &'static str {
        match self {
            Self::BranchName => "branch naming",
            Self::AuthorName => "author_name",
            Self::AuthorEmail => "author_email",
            Self::CommitMessage => "commit message",
            Self::CommitSignoff => "commit signoff",
            Self::FileName => "file name",
            Self::MergeBase => "merge base",
        }
    }

    /// Whether the kind validates a git-config identity value.
    ///
    /// These kinds always print a remediation suggestion on failure.
    pub fn is_git_config(self) -> bool {
        matches!(self, Self::AuthorName | Self::AuthorEmail)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a subject must match the pattern or must not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSense {
    /// The subject must match.
    #[default]
    Require,
    /// The subject must not match.
    Forbid,
}

impl MatchSense {
    fn is_require(&self) -> bool {
        *self == Self::Require
    }
}

/// A single configured check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSpec {
    /// Which property is checked.
    #[serde(rename = "check")]
    pub kind: CheckKind,
    /// Pattern to apply. Empty disables the check.
    #[serde(default)]
    pub regex: String,
    /// Message shown when the check fails.
    #[serde(default)]
    pub error: String,
    /// Remediation hint shown when the check fails.
    #[serde(default)]
    pub suggest: String,
    /// Match sense, relevant for list subjects.
    #[serde(default, skip_serializing_if = "MatchSense::is_require")]
    pub sense: MatchSense,
}

impl CheckSpec {
    /// Creates a spec requiring `regex` to match.
    pub fn new(kind: CheckKind, regex: impl Into<String>) -> Self {
        Self {
            kind,
            regex: regex.into(),
            error: String::new(),
            suggest: String::new(),
            sense: MatchSense::Require,
        }
    }

    /// Sets the error text.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    /// Sets the suggestion text.
    pub fn with_suggest(mut self, suggest: impl Into<String>) -> Self {
        self.suggest = suggest.into();
        self
    }

    /// Sets the match sense.
    pub fn with_sense(mut self, sense: MatchSense) -> Self {
        self.sense = sense;
        self
    }

    /// A spec with an empty regex is declared but disabled.
    pub fn is_disabled(&self) -> bool {
        self.regex.is_empty()
    }
}

/// Outcome of evaluating one check kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckResult {
    /// Every evaluated spec matched.
    Pass,
    /// A spec did not match.
    Fail,
    /// Every spec of the kind was disabled.
    Skip,
}

impl CheckResult {
    /// `Skip` counts as passing.
    pub fn is_pass(self) -> bool {
        !matches!(self, Self::Fail)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
            Self::Skip => write!(f, "SKIP"),
        }
    }
}

/// Result recorded for one evaluated kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindOutcome {
    /// The evaluated kind.
    pub check: CheckKind,
    /// Its result.
    pub result: CheckResult,
}

/// A diagnostic emitted during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Diagnostic {
    /// A check failed.
    Error {
        /// Failing kind.
        check: CheckKind,
        /// Configured pattern.
        regex: String,
        /// Configured error text.
        error: String,
        /// Offending value.
        actual: String,
    },
    /// Remediation hint for a failure.
    Suggestion {
        /// Failing kind.
        check: CheckKind,
        /// Configured hint.
        suggest: String,
    },
    /// A kind was declared with an empty regex.
    Skip {
        /// Skipped kind.
        check: CheckKind,
    },
}

/// Aggregate report for one invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckReport {
    /// Per-kind outcomes in evaluation order.
    pub outcomes: Vec<KindOutcome>,
    /// Diagnostics, filled in for structured output.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Records an outcome.
    pub fn push(&mut self, check: CheckKind, result: CheckResult) {
        self.outcomes.push(KindOutcome { check, result });
    }

    /// True unless some kind failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_pass())
    }

    /// Kinds that failed, in evaluation order.
    pub fn failed_kinds(&self) -> Vec<CheckKind> {
        self.outcomes
            .iter()
            .filter(|o| !o.result.is_pass())
            .map(|o| o.check)
            .collect()
    }

    /// Determines the process exit code.
    pub fn exit_code(&self, dry_run: bool) -> i32 {
        if dry_run || self.passed() {
            0
        } else {
            1
        }
    }
}

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}
