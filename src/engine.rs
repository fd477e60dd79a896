//! Check evaluation engine.
//!
//! Each check kind reads one piece of repository metadata through a
//! [`MetadataProvider`], applies a [`PatternMatcher`], and reports failures
//! through a [`Reporter`]. The aggregator runs every selected kind and folds
//! the outcomes into a [`CheckReport`](crate::data::CheckReport).

pub mod aggregator;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod reporter;

#[cfg(test)]
pub(crate) mod test_utils;

pub use aggregator::evaluate;
pub use error::CheckError;
pub use evaluator::evaluate_kind;
pub use matcher::{PatternMatcher, RegexMatcher};
pub use reporter::{CollectingReporter, Reporter, TerminalReporter};

use crate::git::MetadataProvider;

/// Collaborators used during one evaluation pass.
pub struct EvalContext<'a> {
    /// Source of repository facts.
    pub provider: &'a dyn MetadataProvider,
    /// Regex matcher.
    pub matcher: &'a dyn PatternMatcher,
    /// Diagnostic sink.
    pub reporter: &'a mut dyn Reporter,
}

impl<'a> EvalContext<'a> {
    /// Bundles the collaborators.
    pub fn new(
        provider: &'a dyn MetadataProvider,
        matcher: &'a dyn PatternMatcher,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            provider,
            matcher,
            reporter,
        }
    }
}
