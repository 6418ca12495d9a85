//! Match failures
//!
//! Failures fall in two groups. Recoverable ones describe input that did not
//! fit a part of the grammar; alternation and optional parts catch them and
//! try something else. Fatal ones describe a malformed grammar and always
//! escape to the caller of [`parse`](crate::parse).

use thiserror::Error;

use crate::value::AttributeError;

/// Why a grammar node failed to match
#[derive(Debug, Error)]
pub enum MatchFailure {
    /// A terminal did not match at the cursor
    #[error("expected /{pattern}/ at offset {position}")]
    TerminalMismatch {
        /// Source of the terminal's regular expression
        pattern: String,
        /// Byte offset where the match was attempted
        position: usize,
    },

    /// Every branch of an alternation failed
    #[error("expected one of {} at offset {position}", .attempted.join(", "))]
    NoAlternativeMatched {
        /// Notation of each branch, in the order they were tried
        attempted: Vec<String>,
        /// Byte offset where the alternation started
        position: usize,
    },

    /// A one-or-more repetition matched nothing
    #[error("expected at least one repetition at offset {position}")]
    RepeatRequiresAtLeastOne {
        /// Byte offset where the repetition started
        position: usize,
    },

    /// A reference that resolves to nothing (e.g. an undefined rule)
    #[error("unrecognized grammar part: {part}")]
    UnrecognizedPart {
        /// Description of the unresolved reference
        part: String,
    },

    /// A terminal's pattern is not a valid regular expression
    #[error("invalid pattern /{pattern}/: {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// A target object refused an attribute binding
    #[error("cannot bind `{name}` on {target}: {source}")]
    InvalidAttribute {
        /// Kind of the target object
        target: String,
        /// Attribute name
        name: String,
        /// Reason reported by the target
        source: AttributeError,
    },

    /// A repetition succeeded without consuming input
    #[error("repetition made no progress at offset {position}")]
    NoProgress {
        /// Byte offset where the repetition stalled
        position: usize,
    },

    /// Nested type or rule activations exceeded the configured depth
    #[error("grammar nesting deeper than {limit} at offset {position}")]
    RecursionLimit {
        /// Configured maximum depth
        limit: usize,
        /// Byte offset where the limit was hit
        position: usize,
    },

    /// Input left over after a parse that had to consume everything
    #[error("unexpected trailing input at offset {position}")]
    TrailingInput {
        /// Byte offset of the first unconsumed byte
        position: usize,
    },
}

impl MatchFailure {
    /// Whether alternation and optional parts may recover from this failure
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TerminalMismatch { .. }
                | Self::NoAlternativeMatched { .. }
                | Self::RepeatRequiresAtLeastOne { .. }
        )
    }

    /// Byte offset in the input the failure refers to, if any
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::TerminalMismatch { position, .. }
            | Self::NoAlternativeMatched { position, .. }
            | Self::RepeatRequiresAtLeastOne { position }
            | Self::NoProgress { position }
            | Self::RecursionLimit { position, .. }
            | Self::TrailingInput { position } => Some(*position),
            Self::UnrecognizedPart { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidAttribute { .. } => None,
        }
    }
}
