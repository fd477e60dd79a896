//! Per-kind check evaluation.

use anyhow::Result;

use crate::data::check::{CheckKind, CheckResult, CheckSpec, MatchSense};
use crate::engine::matcher::PatternMatcher;
use crate::engine::reporter::Reporter;
use crate::engine::EvalContext;
use crate::git::{CommitField, MetadataProvider};

/// Metadata fetched for one spec.
#[derive(Debug)]
enum Subject {
    /// One value.
    Single(String),
    /// Every item is checked on its own.
    Each(Vec<String>),
    /// The check is satisfied by any one item.
    AnyOf(Vec<String>),
}

/// Evaluates every spec of `kind` in `specs`.
///
/// A spec with an empty regex disables the rest of the kind: the skip notice
/// is emitted and no later spec of the kind touches the provider or the
/// matcher. The first failing spec also ends the evaluation of this kind.
/// Returns [`CheckResult::Skip`] when the kind is disabled before any spec
/// ran, and [`CheckResult::Pass`] when there is nothing to evaluate.
pub fn evaluate_kind(
    kind: CheckKind,
    specs: &[CheckSpec],
    ctx: &mut EvalContext<'_>,
) -> Result<CheckResult> {
    let mut evaluated = false;

    for spec in specs.iter().filter(|spec| spec.kind == kind) {
        if spec.is_disabled() {
            tracing::debug!("{kind}: empty regex, skipping the rest of the kind");
            ctx.reporter.skip_notice(kind)?;
            return Ok(if evaluated {
                CheckResult::Pass
            } else {
                CheckResult::Skip
            });
        }
        evaluated = true;

        let subject = fetch_subject(kind, ctx.provider)?;
        tracing::debug!("{kind}: checking {subject:?} against {:?}", spec.regex);

        if let Some(actual) = find_violation(spec, &subject, ctx.matcher)? {
            tracing::debug!("{kind}: failed on {actual:?}");
            report_failure(spec, &actual, ctx.reporter)?;
            return Ok(CheckResult::Fail);
        }
    }

    Ok(CheckResult::Pass)
}

fn fetch_subject(kind: CheckKind, provider: &dyn MetadataProvider) -> Result<Subject> {
    let subject = match kind {
        CheckKind::BranchName => Subject::Single(provider.branch_name()?),
        CheckKind::AuthorName => Subject::Single(provider.commit_field(CommitField::AuthorName)?),
        CheckKind::AuthorEmail => {
            Subject::Single(provider.commit_field(CommitField::AuthorEmail)?)
        }
        CheckKind::CommitMessage => Subject::Single(provider.commit_field(CommitField::Message)?),
        CheckKind::CommitSignoff => Subject::Single(provider.signoff_trailers()?.join("\n")),
        CheckKind::FileName => Subject::Each(provider.changed_files()?),
        CheckKind::MergeBase => Subject::AnyOf(provider.merge_base_candidates()?),
    };
    Ok(subject)
}

/// Returns the offending value, or `None` when the spec is satisfied.
fn find_violation(
    spec: &CheckSpec,
    subject: &Subject,
    matcher: &dyn PatternMatcher,
) -> Result<Option<String>> {
    let violates = |value: &str| -> Result<bool> {
        let matched = matcher.matches(&spec.regex, value)?;
        Ok(match spec.sense {
            MatchSense::Require => !matched,
            MatchSense::Forbid => matched,
        })
    };

    match subject {
        Subject::Single(value) => Ok(violates(value)?.then(|| value.clone())),
        Subject::Each(values) => {
            for value in values {
                if violates(value)? {
                    return Ok(Some(value.clone()));
                }
            }
            Ok(None)
        }
        Subject::AnyOf(values) => match spec.sense {
            MatchSense::Require => {
                for value in values {
                    if matcher.matches(&spec.regex, value)? {
                        return Ok(None);
                    }
                }
                Ok(Some(values.join(", ")))
            }
            MatchSense::Forbid => {
                for value in values {
                    if violates(value)? {
                        return Ok(Some(value.clone()));
                    }
                }
                Ok(None)
            }
        },
    }
}

fn report_failure(spec: &CheckSpec, actual: &str, reporter: &mut dyn Reporter) -> Result<()> {
    reporter.error_message(spec.kind, &spec.regex, &spec.error, actual)?;
    if spec.kind.is_git_config() || !spec.suggest.is_empty() {
        reporter.suggestion(spec.kind, &spec.suggest)?;
    }
    Ok(())
}
