//! Shared test doubles for the `engine` module.

use std::cell::Cell;

use anyhow::{bail, Result};

use crate::data::check::{CheckKind, CheckReport, CheckResult, CheckSpec, Diagnostic};
use crate::data::config::Configuration;
use crate::engine::matcher::{PatternMatcher, RegexMatcher};
use crate::engine::reporter::Reporter;
use crate::engine::{aggregator, evaluator, EvalContext};
use crate::git::metadata::signoff_lines;
use crate::git::{CommitField, MetadataProvider};

/// In-memory [`MetadataProvider`] that counts every fetch.
///
/// A provider built with [`failing`](Self::failing) returns the given error
/// from every call, like a provider run outside a repository.
pub(crate) struct FakeProvider {
    branch: String,
    author_name: String,
    author_email: String,
    message: String,
    files: Vec<String>,
    merge_bases: Vec<String>,
    failure: Option<String>,
    fetches: Cell<usize>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            branch: "main".to_string(),
            author_name: "Test User".to_string(),
            author_email: "test@example.com".to_string(),
            message: "feat: initial commit".to_string(),
            files: Vec::new(),
            merge_bases: Vec::new(),
            failure: None,
            fetches: Cell::new(0),
        }
    }
}

impl FakeProvider {
    pub(crate) fn branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    pub(crate) fn author_name(mut self, name: &str) -> Self {
        self.author_name = name.to_string();
        self
    }

    pub(crate) fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub(crate) fn files(mut self, files: &[&str]) -> Self {
        self.files = files.iter().map(|f| (*f).to_string()).collect();
        self
    }

    pub(crate) fn merge_bases(mut self, branches: &[&str]) -> Self {
        self.merge_bases = branches.iter().map(|b| (*b).to_string()).collect();
        self
    }

    pub(crate) fn failing(mut self, error: &str) -> Self {
        self.failure = Some(error.to_string());
        self
    }

    /// Number of metadata reads so far.
    pub(crate) fn fetches(&self) -> usize {
        self.fetches.get()
    }

    fn record(&self) -> Result<()> {
        self.fetches.set(self.fetches.get() + 1);
        if let Some(error) = &self.failure {
            bail!("{error}");
        }
        Ok(())
    }
}

impl MetadataProvider for FakeProvider {
    fn branch_name(&self) -> Result<String> {
        self.record()?;
        Ok(self.branch.clone())
    }

    fn commit_field(&self, field: CommitField) -> Result<String> {
        self.record()?;
        Ok(match field {
            CommitField::AuthorName => self.author_name.clone(),
            CommitField::AuthorEmail => self.author_email.clone(),
            CommitField::Message => self.message.clone(),
        })
    }

    fn changed_files(&self) -> Result<Vec<String>> {
        self.record()?;
        Ok(self.files.clone())
    }

    fn signoff_trailers(&self) -> Result<Vec<String>> {
        self.record()?;
        Ok(signoff_lines(&self.message))
    }

    fn merge_base_candidates(&self) -> Result<Vec<String>> {
        self.record()?;
        Ok(self.merge_bases.clone())
    }
}

/// How a [`CountingMatcher`] answers.
pub(crate) enum MatcherStub {
    /// Delegate to the real regex matcher.
    Regex,
    /// Return a fixed answer regardless of input.
    Always(bool),
}

/// [`PatternMatcher`] that counts calls.
pub(crate) struct CountingMatcher {
    stub: MatcherStub,
    inner: RegexMatcher,
    calls: Cell<usize>,
}

impl CountingMatcher {
    pub(crate) fn new(stub: MatcherStub) -> Self {
        Self {
            stub,
            inner: RegexMatcher::new(),
            calls: Cell::new(0),
        }
    }

    /// Number of match attempts so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PatternMatcher for CountingMatcher {
    fn matches(&self, pattern: &str, subject: &str) -> Result<bool> {
        self.calls.set(self.calls.get() + 1);
        match self.stub {
            MatcherStub::Regex => self.inner.matches(pattern, subject),
            MatcherStub::Always(answer) => Ok(answer),
        }
    }
}

/// [`Reporter`] that records every diagnostic.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl RecordingReporter {
    pub(crate) fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Recorded failures as `(kind, regex, error, actual)`.
    pub(crate) fn errors(&self) -> Vec<(CheckKind, String, String, String)> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::Error {
                    check,
                    regex,
                    error,
                    actual,
                } => Some((*check, regex.clone(), error.clone(), actual.clone())),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors().len()
    }

    pub(crate) fn suggestion_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Suggestion { .. }))
            .count()
    }

    pub(crate) fn skip_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Skip { .. }))
            .count()
    }
}

impl Reporter for RecordingReporter {
    fn error_message(
        &mut self,
        kind: CheckKind,
        regex: &str,
        error: &str,
        actual: &str,
    ) -> Result<()> {
        self.diagnostics.push(Diagnostic::Error {
            check: kind,
            regex: regex.to_string(),
            error: error.to_string(),
            actual: actual.to_string(),
        });
        Ok(())
    }

    fn suggestion(&mut self, kind: CheckKind, suggest: &str) -> Result<()> {
        self.diagnostics.push(Diagnostic::Suggestion {
            check: kind,
            suggest: suggest.to_string(),
        });
        Ok(())
    }

    fn skip_notice(&mut self, kind: CheckKind) -> Result<()> {
        self.diagnostics.push(Diagnostic::Skip { check: kind });
        Ok(())
    }
}

/// Provider, matcher and reporter wired together for one test.
pub(crate) struct TestHarness {
    pub(crate) provider: FakeProvider,
    pub(crate) matcher: CountingMatcher,
    pub(crate) reporter: RecordingReporter,
}

impl TestHarness {
    /// Uses the real regex matcher.
    pub(crate) fn new(provider: FakeProvider) -> Self {
        Self::with_matcher(provider, MatcherStub::Regex)
    }

    pub(crate) fn with_matcher(provider: FakeProvider, stub: MatcherStub) -> Self {
        Self {
            provider,
            matcher: CountingMatcher::new(stub),
            reporter: RecordingReporter::default(),
        }
    }

    pub(crate) fn evaluate_kind(
        &mut self,
        kind: CheckKind,
        specs: &[CheckSpec],
    ) -> Result<CheckResult> {
        let mut ctx = EvalContext::new(&self.provider, &self.matcher, &mut self.reporter);
        evaluator::evaluate_kind(kind, specs, &mut ctx)
    }

    pub(crate) fn evaluate(
        &mut self,
        config: &Configuration,
        selection: &[CheckKind],
    ) -> Result<CheckReport> {
        let mut ctx = EvalContext::new(&self.provider, &self.matcher, &mut self.reporter);
        aggregator::evaluate(config, selection, &mut ctx)
    }
}
