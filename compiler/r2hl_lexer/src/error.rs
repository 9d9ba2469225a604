//! Errors raised while building a rule table or selecting a start state.
//!
//! Tokenization itself never fails: unrecognised input degrades to
//! [`Category::Text`](crate::Category::Text). Everything here is a
//! configuration error, reported before any document is scanned.

use std::fmt;

use thiserror::Error;

/// Which kind of reference named a missing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    Include,
    Push,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reference::Include => "include",
            Reference::Push => "push",
        })
    }
}

/// Rule table construction failure.
///
/// Variants tied to a rule carry the declaring state and the rule's
/// index within that state's declaration (before include flattening).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("root state `{0}` is not declared")]
    MissingRoot(String),

    #[error("state `{0}` is declared more than once")]
    DuplicateState(String),

    #[error("state `{state}`, rule {index}: {reference} target `{target}` is not a declared state")]
    UnknownState {
        state: String,
        index: usize,
        target: String,
        reference: Reference,
    },

    #[error("state `{state}`, rule {index}: include cycle {}", .cycle.join(" -> "))]
    IncludeCycle {
        state: String,
        index: usize,
        cycle: Vec<String>,
    },

    #[error("state `{state}`, rule {index}: invalid pattern `{pattern}`")]
    InvalidPattern {
        state: String,
        index: usize,
        pattern: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(
        "state `{state}`, rule {index}: pattern has {found} capture groups \
         but {expected} categories were given"
    )]
    GroupCountMismatch {
        state: String,
        index: usize,
        expected: usize,
        found: usize,
    },
}

impl BuildError {
    /// The state whose declaration caused the error.
    pub fn state(&self) -> &str {
        match self {
            BuildError::MissingRoot(state)
            | BuildError::DuplicateState(state)
            | BuildError::UnknownState { state, .. }
            | BuildError::IncludeCycle { state, .. }
            | BuildError::InvalidPattern { state, .. }
            | BuildError::GroupCountMismatch { state, .. } => state,
        }
    }

    /// Index of the offending rule, when the error is tied to one.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            BuildError::MissingRoot(_) | BuildError::DuplicateState(_) => None,
            BuildError::UnknownState { index, .. }
            | BuildError::IncludeCycle { index, .. }
            | BuildError::InvalidPattern { index, .. }
            | BuildError::GroupCountMismatch { index, .. } => Some(*index),
        }
    }
}

/// A start state passed to [`Lexer::tokenize_in()`](crate::Lexer::tokenize_in)
/// that the table does not declare.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no state named `{0}`")]
pub struct UnknownState(pub String);
