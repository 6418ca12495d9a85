//! Regular-expression terminals

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::MatchFailure;

/// A leaf matched by a regular expression anchored at the cursor
///
/// The pattern is compiled on first use and cached, so building a grammar
/// never fails. An invalid pattern is reported when the terminal is first
/// matched or validated.
#[derive(Debug, Clone)]
pub struct Terminal {
    pattern: String,
    compiled: OnceCell<Result<Regex, String>>,
}

impl Terminal {
    /// Create a terminal from a pattern in `regex` crate syntax
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: OnceCell::new(),
        }
    }

    /// The pattern as written
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The anchored regex, compiling it on first call
    pub fn regex(&self) -> Result<&Regex, MatchFailure> {
        self.compiled
            .get_or_init(|| {
                Regex::new(&format!("^(?:{})", self.pattern)).map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(|reason| MatchFailure::InvalidPattern {
                pattern: self.pattern.clone(),
                reason: reason.clone(),
            })
    }

    /// Length in bytes of the match at the start of `input`
    pub fn match_len(&self, input: &str) -> Result<Option<usize>, MatchFailure> {
        Ok(self.regex()?.find(input).map(|m| m.end()))
    }
}
