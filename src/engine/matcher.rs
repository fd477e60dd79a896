//! Regex matching with start-anchored semantics.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;
use regex::Regex;

use crate::engine::CheckError;

/// Decides whether a pattern matches a subject.
pub trait PatternMatcher {
    /// Returns true when `pattern` matches a prefix of `subject`.
    ///
    /// An invalid pattern is an error, never a non-match.
    fn matches(&self, pattern: &str, subject: &str) -> Result<bool>;
}

/// [`PatternMatcher`] backed by the `regex` crate.
///
/// The pattern is anchored at the start of the subject but not at the end,
/// so `feat` matches `feature/x` while `^main$` does not match `main2`.
/// Compiled patterns are cached for the lifetime of the matcher.
#[derive(Debug, Default)]
pub struct RegexMatcher {
    cache: RefCell<HashMap<String, Regex>>,
}

impl RegexMatcher {
    /// Creates a matcher with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn compile(pattern: &str) -> Result<Regex, CheckError> {
        // `a)|(b` is invalid on its own but balanced once wrapped.
        Regex::new(pattern).map_err(|source| CheckError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Regex::new(&format!("^(?:{pattern})")).map_err(|source| CheckError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
    }
}

impl PatternMatcher for RegexMatcher {
    fn matches(&self, pattern: &str, subject: &str) -> Result<bool> {
        let mut cache = self.cache.borrow_mut();
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.is_match(subject));
        }

        let regex = Self::compile(pattern)?;
        let matched = regex.is_match(subject);
        cache.insert(pattern.to_string(), regex);
        Ok(matched)
    }
}
