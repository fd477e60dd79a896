//! Runs every selected check kind and folds the outcomes.

use anyhow::Result;

use crate::data::check::{CheckKind, CheckReport};
use crate::data::config::Configuration;
use crate::engine::evaluator::evaluate_kind;
use crate::engine::EvalContext;

/// Evaluates the configuration.
///
/// Kinds run in [`CheckKind::ALL`] order, restricted to kinds present in the
/// configuration and, when `selection` is non-empty, to the selected kinds.
/// A failing kind never stops the kinds after it, so one run reports every
/// violated rule. Fatal errors (invalid regex, unreadable repository) abort
/// immediately.
pub fn evaluate(
    config: &Configuration,
    selection: &[CheckKind],
    ctx: &mut EvalContext<'_>,
) -> Result<CheckReport> {
    let mut report = CheckReport::default();

    for kind in config.configured_kinds() {
        if !selection.is_empty() && !selection.contains(&kind) {
            tracing::debug!("{kind}: not selected");
            continue;
        }

        let result = evaluate_kind(kind, &config.checks, ctx)?;
        tracing::debug!("{kind}: {result}");
        report.push(kind, result);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::check::{CheckResult, CheckSpec};
    use crate::engine::test_utils::{FakeProvider, TestHarness};

    #[test]
    fn empty_configuration_passes_without_calls() {
        let mut h = TestHarness::new(FakeProvider::default());

        let report = h.evaluate(&Configuration::default(), &[]).unwrap();

        assert!(report.passed());
        assert!(report.outcomes.is_empty());
        assert_eq!(h.provider.fetches(), 0);
        assert_eq!(h.matcher.calls(), 0);
        assert!(h.reporter.diagnostics().is_empty());
    }

    #[test]
    fn failing_kind_does_not_stop_later_kinds() {
        let mut h = TestHarness::new(
            FakeProvider::default()
                .branch("wip")
                .message("feat: add gate"),
        );
        let config = Configuration::new(vec![
            CheckSpec::new(CheckKind::CommitMessage, "^feat"),
            CheckSpec::new(CheckKind::BranchName, "^feature/").with_error("bad branch"),
        ]);

        let report = h.evaluate(&config, &[]).unwrap();

        assert!(!report.passed());
        assert_eq!(report.exit_code(false), 1);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].check, CheckKind::BranchName);
        assert_eq!(report.outcomes[0].result, CheckResult::Fail);
        assert_eq!(report.outcomes[1].check, CheckKind::CommitMessage);
        assert_eq!(report.outcomes[1].result, CheckResult::Pass);

        let errors = h.reporter.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, CheckKind::BranchName);
        assert_eq!(errors[0].2, "bad branch");
    }

    #[test]
    fn every_failing_kind_is_reported() {
        let mut h = TestHarness::new(
            FakeProvider::default()
                .branch("wip")
                .author_name("jane")
                .message("oops"),
        );
        let config = Configuration::new(vec![
            CheckSpec::new(CheckKind::BranchName, "^feature/"),
            CheckSpec::new(CheckKind::AuthorName, "^[A-Z]"),
            CheckSpec::new(CheckKind::CommitMessage, "^feat"),
        ]);

        let report = h.evaluate(&config, &[]).unwrap();

        assert_eq!(
            report.failed_kinds(),
            [
                CheckKind::BranchName,
                CheckKind::AuthorName,
                CheckKind::CommitMessage
            ]
        );
        assert_eq!(h.reporter.error_count(), 3);
        assert_eq!(h.reporter.suggestion_count(), 1);
    }

    #[test]
    fn disabled_branch_check_passes_with_notice() {
        let mut h = TestHarness::new(FakeProvider::default());
        let config = Configuration::new(vec![CheckSpec::new(CheckKind::BranchName, "")]);

        let report = h.evaluate(&config, &[]).unwrap();

        assert!(report.passed());
        assert_eq!(report.outcomes[0].result, CheckResult::Skip);
        assert_eq!(h.provider.fetches(), 0);
        assert_eq!(h.reporter.skip_count(), 1);
        assert!(crate::engine::reporter::skip_notice_text(CheckKind::BranchName)
            .contains("branch naming"));
    }

    #[test]
    fn selection_limits_kinds() {
        let mut h = TestHarness::new(FakeProvider::default().branch("wip"));
        let config = Configuration::new(vec![
            CheckSpec::new(CheckKind::BranchName, "^feature/"),
            CheckSpec::new(CheckKind::AuthorName, "^[A-Z]"),
        ]);

        let report = h.evaluate(&config, &[CheckKind::AuthorName]).unwrap();

        assert!(report.passed());
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].check, CheckKind::AuthorName);
        assert_eq!(h.provider.fetches(), 1);
    }

    #[test]
    fn selecting_an_unconfigured_kind_runs_nothing() {
        let mut h = TestHarness::new(FakeProvider::default());
        let config = Configuration::new(vec![CheckSpec::new(CheckKind::BranchName, "^main$")]);

        let report = h.evaluate(&config, &[CheckKind::MergeBase]).unwrap();

        assert!(report.outcomes.is_empty());
        assert_eq!(h.provider.fetches(), 0);
    }

    #[test]
    fn fatal_error_aborts_remaining_kinds() {
        let mut h = TestHarness::new(FakeProvider::default());
        let config = Configuration::new(vec![
            CheckSpec::new(CheckKind::BranchName, "(main"),
            CheckSpec::new(CheckKind::AuthorName, "^[A-Z]"),
        ]);

        assert!(h.evaluate(&config, &[]).is_err());
        assert_eq!(h.provider.fetches(), 1);
    }
}
