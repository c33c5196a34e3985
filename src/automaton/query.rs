//! Query engine over a finalized automaton
//!
//! Every query starts with a match walk from the root. A failed walk means
//! the substring never occurred; each query reports that with its own
//! sentinel (`-1` for occurrence counts, zero for everything else).

use super::table::StateTable;
use super::types::*;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A finalized, immutable suffix automaton with aggregated counts
///
/// Holds no interior mutability, so any number of threads may query a
/// shared reference concurrently.
#[derive(Debug, Clone)]
pub struct Sam {
    config: SamConfig,
    table: StateTable,
    symbol_counts: FxHashMap<Symbol, u64>,
    total_symbols: u64,
    clone_count: usize,
}

impl Sam {
    pub(crate) fn new(
        config: SamConfig,
        table: StateTable,
        symbol_counts: FxHashMap<Symbol, u64>,
        total_symbols: u64,
        clone_count: usize,
    ) -> Self {
        Self {
            config,
            table,
            symbol_counts,
            total_symbols,
            clone_count,
        }
    }

    /// Follow `query` from the root; `None` if some symbol has no transition
    pub fn walk(&self, query: &[Symbol]) -> Option<StateId> {
        let mut state = StateId::ROOT;
        for &symbol in query {
            state = self.table[state].transition(symbol)?;
        }
        Some(state)
    }

    /// Number of (possibly overlapping) occurrences of `query`, or -1
    ///
    /// The empty query occurs once per consumed symbol.
    pub fn occur_count(&self, query: &[Symbol]) -> i64 {
        match self.walk(query) {
            Some(state) => self.table[state].count as i64,
            None => -1,
        }
    }

    /// Number of distinct symbols observed directly after `query`
    ///
    /// Built under a length limit `L`, this is exact for queries shorter
    /// than `L` and 0 for queries of length `L`.
    pub fn out_count(&self, query: &[Symbol]) -> usize {
        self.walk(query)
            .map(|state| self.table[state].out_count())
            .unwrap_or(0)
    }

    /// Empirical probability that `symbol` immediately follows `query`
    pub fn out_degree(&self, query: &[Symbol], symbol: Symbol) -> f64 {
        let Some(state) = self.walk(query) else {
            return 0.0;
        };
        let Some(next) = self.table[state].transition(symbol) else {
            return 0.0;
        };

        let total = self.table[state].count;
        if total == 0 {
            return 0.0;
        }
        (self.table[next].count as f64 / total as f64).min(1.0)
    }

    /// Observed-to-expected occurrence ratio of `query`
    ///
    /// Compares the occurrence count against what independent symbols with
    /// the observed unigram frequencies would produce:
    ///
    /// `occur(q) * N^(|q| - 1) / prod(freq(c) for c in q)`
    ///
    /// where `N` is the number of consumed symbols. Computed in log space and
    /// clamped to `cap` when one is given. Returns 0 for unseen substrings.
    pub fn occur_degree(&self, query: &[Symbol], cap: Option<f64>) -> f64 {
        let Some(state) = self.walk(query) else {
            return 0.0;
        };
        let occur = self.table[state].count;
        if occur == 0 || self.total_symbols == 0 {
            return 0.0;
        }

        let mut log_degree = (occur as f64).ln();
        for symbol in query {
            match self.symbol_counts.get(symbol) {
                Some(&freq) if freq > 0 => log_degree -= (freq as f64).ln(),
                _ => return 0.0,
            }
        }
        log_degree += (query.len() as f64 - 1.0) * (self.total_symbols as f64).ln();

        let degree = log_degree.exp();
        match cap {
            Some(cap) => degree.min(cap.max(0.0)),
            None => degree,
        }
    }

    /// `occur_count` for a batch of queries
    pub fn occur_counts<Q>(&self, queries: &[Q]) -> Vec<i64>
    where
        Q: AsRef<[Symbol]> + Sync,
    {
        self.batch(queries, |q| self.occur_count(q))
    }

    /// `out_count` for a batch of queries
    pub fn out_counts<Q>(&self, queries: &[Q]) -> Vec<usize>
    where
        Q: AsRef<[Symbol]> + Sync,
    {
        self.batch(queries, |q| self.out_count(q))
    }

    fn batch<Q, T, F>(&self, queries: &[Q], f: F) -> Vec<T>
    where
        Q: AsRef<[Symbol]> + Sync,
        T: Send,
        F: Fn(&[Symbol]) -> T + Sync,
    {
        // Small batches are cheaper on the calling thread
        if queries.len() > self.config.parallel_threshold {
            queries.par_iter().map(|q| f(q.as_ref())).collect()
        } else {
            queries.iter().map(|q| f(q.as_ref())).collect()
        }
    }

    /// Summary counters for this automaton
    pub fn stats(&self) -> SamStats {
        SamStats {
            state_count: self.table.len(),
            clone_count: self.clone_count,
            transition_count: self.table.iter().map(|(_, s)| s.out_count()).sum(),
            total_symbols: self.total_symbols,
            distinct_symbols: self.symbol_counts.len(),
            max_len: self.table.iter().map(|(_, s)| s.len).max().unwrap_or(0),
        }
    }

    /// Number of symbols consumed while building
    pub fn total_symbols(&self) -> u64 {
        self.total_symbols
    }

    /// Root state id
    pub fn root(&self) -> StateId {
        StateId::ROOT
    }

    /// Look up a state; counts are aggregated
    pub fn state(&self, id: StateId) -> Option<&State> {
        (id.index() < self.table.len()).then(|| &self.table[id])
    }

    /// Underlying state table
    pub fn table(&self) -> &StateTable {
        &self.table
    }
}
