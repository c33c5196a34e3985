//! Error types for automaton construction and queries.
//!
//! Absent substrings are not errors: queries report them through sentinel
//! values. Only contract violations and resource exhaustion surface here.

use thiserror::Error;

/// Errors reported by the builder, the aggregator and the mode facade
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamError {
    /// `append` or `finalize` called on an automaton that is already queryable
    #[error("automaton is already finalized")]
    AlreadyFinalized,

    /// A query was issued while the automaton was still being built
    #[error("automaton is not finalized; call finalize() before querying")]
    NotFinalized,

    /// A length limit must allow at least one symbol of context
    #[error("invalid length limit {0}: must be at least 1")]
    InvalidLengthLimit(usize),

    /// The state table reached its configured capacity
    #[error("state table exhausted: at most {limit} states allowed")]
    StateLimitExceeded { limit: usize },

    /// A configuration document could not be parsed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SamError>;
