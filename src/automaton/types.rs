//! Types for suffix automaton construction and queries
//!
//! This module defines the state record stored in the arena, the opaque
//! state identifier, and the configuration/statistics types.

use crate::error::{Result, SamError};
use serde::{Deserialize, Serialize};

/// Pre-encoded input symbol supplied by the alphabet adapter
pub type Symbol = u32;

/// Opaque identifier of a state in the state table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    /// Identifier of the root state (empty string)
    pub const ROOT: StateId = StateId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of this state in the table
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Hard ceiling on the number of states (ids are stored as u32)
pub const MAX_STATE_IDS: usize = u32::MAX as usize;

/// A single automaton state
///
/// All references to other states are ids into the owning table, so the
/// transition graph and the suffix-link tree can point anywhere without
/// ownership cycles.
#[derive(Debug, Clone)]
pub struct State {
    /// Length of the longest substring represented by this state
    pub len: usize,
    /// Suffix-link target (`None` only for the root)
    pub link: Option<StateId>,
    /// Outgoing transitions sorted by symbol
    transitions: Vec<(Symbol, StateId)>,
    /// Raw count while building; aggregated occurrence count once finalized
    pub count: u64,
    /// Whether this state was split off another one during extension
    pub is_clone: bool,
}

impl State {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            len,
            link: None,
            transitions: Vec::new(),
            count: 0,
            is_clone: false,
        }
    }

    /// Build a clone of `source` with a shorter longest length
    pub(crate) fn clone_of(source: &State, len: usize) -> Self {
        Self {
            len,
            link: source.link,
            transitions: source.transitions.clone(),
            count: 0,
            is_clone: true,
        }
    }

    /// Target of the transition on `symbol`, if any
    #[inline]
    pub fn transition(&self, symbol: Symbol) -> Option<StateId> {
        self.transitions
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| self.transitions[i].1)
    }

    /// Insert or overwrite the transition on `symbol`
    pub(crate) fn set_transition(&mut self, symbol: Symbol, target: StateId) {
        match self.transitions.binary_search_by_key(&symbol, |&(s, _)| s) {
            Ok(i) => self.transitions[i].1 = target,
            Err(i) => self.transitions.insert(i, (symbol, target)),
        }
    }

    /// All outgoing transitions, ordered by symbol
    pub fn transitions(&self) -> &[(Symbol, StateId)] {
        &self.transitions
    }

    /// Number of distinct symbols leaving this state
    #[inline]
    pub fn out_count(&self) -> usize {
        self.transitions.len()
    }
}

/// Configuration for automaton building
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamConfig {
    /// Maximum number of states before construction fails
    pub max_states: usize,
    /// Number of states to reserve up front
    pub state_capacity: usize,
    /// Batch size above which batched queries run on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for SamConfig {
    fn default() -> Self {
        Self {
            max_states: MAX_STATE_IDS,
            state_capacity: 1024,
            parallel_threshold: 256,
        }
    }
}

impl SamConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SamError::InvalidConfig(e.to_string()))
    }
}

/// Summary of a finalized automaton
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamStats {
    /// Number of states including the root
    pub state_count: usize,
    /// Number of states created by splitting
    pub clone_count: usize,
    /// Total number of transitions
    pub transition_count: usize,
    /// Number of symbols consumed across all appends
    pub total_symbols: u64,
    /// Number of distinct symbols seen
    pub distinct_symbols: usize,
    /// Length of the longest state
    pub max_len: usize,
}
