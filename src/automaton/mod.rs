//! Suffix automaton module
//!
//! Incremental substring statistics in time and memory linear in the input.
//!
//! ## Architecture
//!
//! - `types`: State record, ids, configuration and statistics
//! - `table`: Append-only state arena
//! - `builder`: Online construction, including length-bounded streaming
//! - `aggregate`: One-shot occurrence count aggregation
//! - `query`: Read-only queries over the finalized automaton
//!
//! [`SamBuilder::finalize`] consumes the builder, so appending after
//! finalization or finalizing twice cannot be expressed. [`SuffixAutomaton`]
//! wraps both phases in one value for callers that need a single handle and
//! reports those misuses as [`SamError`]s instead.

pub mod aggregate;
pub mod builder;
pub mod query;
pub mod table;
pub mod types;

// Re-exports for convenience
pub use builder::{SamBuilder, SuffixAutomatonBuilder};
pub use query::Sam;
pub use table::StateTable;
pub use types::{SamConfig, SamStats, State, StateId, Symbol};

use crate::error::{Result, SamError};

/// Lifecycle of a [`SuffixAutomaton`]
enum Mode {
    Building(SamBuilder),
    /// Held only while `finalize` moves the builder out
    Finalizing,
    Queryable(Sam),
}

/// Single handle over both the building and the queryable phase
pub struct SuffixAutomaton {
    mode: Mode,
}

impl SuffixAutomaton {
    pub fn new(config: SamConfig) -> Self {
        Self {
            mode: Mode::Building(SamBuilder::new(config)),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SamConfig::default())
    }

    /// Append a chunk; fails once finalized
    pub fn append(&mut self, chunk: &[Symbol], length_limit: Option<usize>) -> Result<()> {
        match &mut self.mode {
            Mode::Building(builder) => builder.append(chunk, length_limit),
            Mode::Finalizing | Mode::Queryable(_) => Err(SamError::AlreadyFinalized),
        }
    }

    /// Append one symbol; fails once finalized
    pub fn append_symbol(&mut self, symbol: Symbol, length_limit: Option<usize>) -> Result<()> {
        match &mut self.mode {
            Mode::Building(builder) => builder.append_symbol(symbol, length_limit),
            Mode::Finalizing | Mode::Queryable(_) => Err(SamError::AlreadyFinalized),
        }
    }

    /// Aggregate counts and switch to query mode; valid exactly once
    pub fn finalize(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.mode, Mode::Finalizing) {
            Mode::Building(builder) => {
                self.mode = Mode::Queryable(builder.finalize());
                Ok(())
            }
            done => {
                self.mode = done;
                Err(SamError::AlreadyFinalized)
            }
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.mode, Mode::Queryable(_))
    }

    /// The finalized automaton, or `NotFinalized`
    pub fn sam(&self) -> Result<&Sam> {
        match &self.mode {
            Mode::Queryable(sam) => Ok(sam),
            Mode::Building(_) | Mode::Finalizing => Err(SamError::NotFinalized),
        }
    }

    pub fn occur_count(&self, query: &[Symbol]) -> Result<i64> {
        Ok(self.sam()?.occur_count(query))
    }

    pub fn out_count(&self, query: &[Symbol]) -> Result<usize> {
        Ok(self.sam()?.out_count(query))
    }

    pub fn out_degree(&self, query: &[Symbol], symbol: Symbol) -> Result<f64> {
        Ok(self.sam()?.out_degree(query, symbol))
    }

    pub fn occur_degree(&self, query: &[Symbol], cap: Option<f64>) -> Result<f64> {
        Ok(self.sam()?.occur_degree(query, cap))
    }
}

impl Default for SuffixAutomaton {
    fn default() -> Self {
        Self::with_defaults()
    }
}
