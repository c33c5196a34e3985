//! Online suffix automaton builder
//!
//! Extends the automaton one symbol at a time. Every consumed symbol credits
//! exactly one state: the state whose longest string is the tracked context
//! followed by the new symbol. Without a length limit the context is the
//! whole input and this is the classic online construction. With a limit `L`
//! the context is cut to `L - 1` symbols before each extension, which keeps
//! every new state at length `L` or below while crediting each end position
//! to a state of the right length, so counts stay exact up to `L`.
//!
//! Continuations are only tracked inside the same bound: `out_count` and
//! `out_degree` are exact for substrings shorter than `L`, but a substring of
//! exactly length `L` reports no continuations, since `s·c` would be longer
//! than the limit. Substrings longer than `L` may be missing or undercounted.

use super::aggregate;
use super::table::StateTable;
use super::types::*;
use super::Sam;
use crate::error::{Result, SamError};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Builder for constructing a suffix automaton from symbol chunks
pub struct SuffixAutomatonBuilder {
    config: SamConfig,
    table: StateTable,
    /// State whose longest string is the tracked context
    active: StateId,
    /// Most recent symbols, kept only while a length limit is in use
    history: VecDeque<Symbol>,
    /// Largest length limit seen so far (0 if none)
    history_window: usize,
    /// Frequency of every consumed symbol
    symbol_counts: FxHashMap<Symbol, u64>,
    total_symbols: u64,
    clone_count: usize,
}

/// Short name used throughout the crate
pub type SamBuilder = SuffixAutomatonBuilder;

impl SuffixAutomatonBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: SamConfig) -> Self {
        let table = StateTable::new(&config);
        Self {
            config,
            table,
            active: StateId::ROOT,
            history: VecDeque::new(),
            history_window: 0,
            symbol_counts: FxHashMap::default(),
            total_symbols: 0,
            clone_count: 0,
        }
    }

    /// Create a builder with default configuration
    pub fn with_defaults() -> Self {
        Self::new(SamConfig::default())
    }

    /// Append a chunk of symbols
    ///
    /// Successive calls behave like one call over the concatenation of all
    /// chunks. `length_limit` bounds the context length for this chunk; see
    /// the module docs for the exactness guarantee. Under a limit `L`,
    /// substrings of length `L` report an `out_count` of 0.
    pub fn append(&mut self, chunk: &[Symbol], length_limit: Option<usize>) -> Result<()> {
        if let Some(limit) = length_limit {
            self.reserve_history(limit)?;
        }

        let states_before = self.table.len();
        for &symbol in chunk {
            self.consume(symbol, length_limit)?;
        }

        debug!(
            symbols = chunk.len(),
            new_states = self.table.len() - states_before,
            total_states = self.table.len(),
            ?length_limit,
            "appended chunk"
        );
        Ok(())
    }

    /// Append a single symbol
    pub fn append_symbol(&mut self, symbol: Symbol, length_limit: Option<usize>) -> Result<()> {
        if let Some(limit) = length_limit {
            self.reserve_history(limit)?;
        }
        self.consume(symbol, length_limit)
    }

    /// Run the count aggregation and switch to query mode
    pub fn finalize(self) -> Sam {
        let Self {
            config,
            mut table,
            symbol_counts,
            total_symbols,
            clone_count,
            ..
        } = self;

        aggregate::aggregate_counts(&mut table);
        Sam::new(config, table, symbol_counts, total_symbols, clone_count)
    }

    /// Number of states created so far
    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    /// Number of symbols consumed so far
    pub fn total_symbols(&self) -> u64 {
        self.total_symbols
    }

    /// State representing the tracked context
    pub fn active(&self) -> StateId {
        self.active
    }

    /// Read-only view of the state table (raw counts)
    pub fn table(&self) -> &StateTable {
        &self.table
    }

    fn reserve_history(&mut self, limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(SamError::InvalidLengthLimit(limit));
        }
        self.history_window = self.history_window.max(limit);
        Ok(())
    }

    fn consume(&mut self, symbol: Symbol, length_limit: Option<usize>) -> Result<()> {
        let target = match length_limit {
            Some(limit) => match self.truncate_context(limit - 1) {
                Some(context_len) => self.reinsert_context(context_len, symbol)?,
                None => self.follow(self.active, symbol)?,
            },
            None => self.follow(self.active, symbol)?,
        };

        self.table[target].count += 1;
        self.active = target;

        *self.symbol_counts.entry(symbol).or_insert(0) += 1;
        self.total_symbols += 1;

        if self.history_window > 0 {
            self.history.push_back(symbol);
            while self.history.len() > self.history_window {
                self.history.pop_front();
            }
        }
        Ok(())
    }

    /// Cut the context down to at most `max_len` symbols.
    ///
    /// Returns the context length to re-insert from the root when no state
    /// has exactly that length, or `None` when `active` can be used directly.
    fn truncate_context(&mut self, max_len: usize) -> Option<usize> {
        if self.table[self.active].len <= max_len {
            return None;
        }

        // The root has min_len 0, so the walk stops on the chain
        let mut state = self.active;
        while let Some(link) = self.table[state].link {
            if self.table.min_len(state) <= max_len {
                break;
            }
            state = link;
        }

        if self.table[state].len == max_len {
            self.active = state;
            return None;
        }
        if self.history.len() >= max_len {
            return Some(max_len);
        }

        // Not enough history to rebuild the context: fall back to the
        // longest suffix that already has its own state.
        warn!(
            wanted = max_len,
            retained = self.history.len(),
            "length limit history too short; context shortened"
        );
        debug_assert_ne!(state, StateId::ROOT);
        self.active = self.table[state]
            .link
            .expect("state longer than the limit is not the root and has a suffix link");
        None
    }

    /// Insert the last `context_len` symbols plus `symbol` from the root
    fn reinsert_context(&mut self, context_len: usize, symbol: Symbol) -> Result<StateId> {
        let start = self.history.len() - context_len;
        let mut state = StateId::ROOT;
        for i in start..self.history.len() {
            let next = self.history[i];
            state = self.follow(state, next)?;
        }
        self.follow(state, symbol)
    }

    /// Move from `from` on `symbol` to a state whose longest string is
    /// exactly one symbol longer, creating or splitting states as needed.
    fn follow(&mut self, from: StateId, symbol: Symbol) -> Result<StateId> {
        match self.table[from].transition(symbol) {
            Some(next) if self.table[next].len == self.table[from].len + 1 => Ok(next),
            Some(next) => self.split(from, symbol, next),
            None => self.extend(from, symbol),
        }
    }

    /// Classic extension step from `last` on a symbol it has no transition for
    fn extend(&mut self, last: StateId, symbol: Symbol) -> Result<StateId> {
        let cur = self.table.push(State::new(self.table[last].len + 1))?;

        // First state on the chain that already moves on `symbol`, with its target
        let mut found = None;
        let mut p = Some(last);
        while let Some(state) = p {
            if let Some(q) = self.table[state].transition(symbol) {
                found = Some((state, q));
                break;
            }
            self.table[state].set_transition(symbol, cur);
            p = self.table[state].link;
        }

        let link = match found {
            None => StateId::ROOT,
            Some((p, q)) if self.table[q].len == self.table[p].len + 1 => q,
            Some((p, q)) => self.split(p, symbol, q)?,
        };
        self.table[cur].link = Some(link);
        Ok(cur)
    }

    /// Split `q` so that the strings of length <= len(p) + 1 move to a clone.
    ///
    /// Transitions on `symbol` into `q` along the suffix-link chain of `p`
    /// are redirected to the clone, and `q` is linked under it.
    fn split(&mut self, p: StateId, symbol: Symbol, q: StateId) -> Result<StateId> {
        let clone_state = State::clone_of(&self.table[q], self.table[p].len + 1);
        let clone = self.table.push(clone_state)?;
        self.table[q].link = Some(clone);
        self.clone_count += 1;

        let mut walk = Some(p);
        while let Some(state) = walk {
            if self.table[state].transition(symbol) != Some(q) {
                break;
            }
            self.table[state].set_transition(symbol, clone);
            walk = self.table[state].link;
        }
        Ok(clone)
    }
}

impl Default for SuffixAutomatonBuilder {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(text: &str) -> Vec<Symbol> {
        text.bytes().map(Symbol::from).collect()
    }

    fn walk(table: &StateTable, text: &str) -> Option<StateId> {
        let mut state = StateId::ROOT;
        for symbol in symbols(text) {
            state = table[state].transition(symbol)?;
        }
        Some(state)
    }

    fn assert_link_invariants(table: &StateTable) {
        for (id, state) in table.iter() {
            match state.link {
                None => assert_eq!(id, StateId::ROOT),
                Some(link) => assert!(table[link].len < state.len),
            }
        }
    }

    #[test]
    fn test_single_symbol() {
        let mut builder = SamBuilder::with_defaults();
        builder.append(&symbols("a"), None).unwrap();

        let table = builder.table();
        assert_eq!(table.len(), 2);
        let a = walk(table, "a").unwrap();
        assert_eq!(table[a].len, 1);
        assert_eq!(table[a].link, Some(StateId::ROOT));
        assert_eq!(table[a].count, 1);
        assert_eq!(builder.active(), a);
    }

    #[test]
    fn test_abcbc_forces_clones() {
        let mut builder = SamBuilder::with_defaults();
        builder.append(&symbols("abcbc"), None).unwrap();
        let table = builder.table();

        // root, a, ab, abc, abcb, abcbc plus clones "b" and "bc"
        assert_eq!(table.len(), 8);
        assert_link_invariants(table);

        let clones: Vec<StateId> = table
            .iter()
            .filter(|(_, s)| s.is_clone)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(clones.len(), 2);
        assert!(clones.iter().all(|&id| table[id].count == 0));

        // "b" split off "ab" when the second b arrived
        let b = walk(table, "b").unwrap();
        assert!(table[b].is_clone);
        assert_eq!(table[b].len, 1);
        assert_eq!(table[b].link, Some(StateId::ROOT));
        let ab = walk(table, "ab").unwrap();
        assert!(!table[ab].is_clone);
        assert_eq!(table[ab].len, 2);
        assert_eq!(table[ab].link, Some(b));

        // "bc" split off "abc" when the second c arrived; "c" moved with it
        let bc = walk(table, "bc").unwrap();
        assert!(table[bc].is_clone);
        assert_eq!(table[bc].len, 2);
        assert_eq!(table[bc].link, Some(StateId::ROOT));
        assert_eq!(walk(table, "c"), Some(bc));
        assert_eq!(table[StateId::ROOT].transition(b'c' as Symbol), Some(bc));
        assert_eq!(table[b].transition(b'c' as Symbol), Some(bc));

        let abc = walk(table, "abc").unwrap();
        assert_eq!(table[abc].len, 3);
        assert_eq!(table[abc].link, Some(bc));
        assert_eq!(table[ab].transition(b'c' as Symbol), Some(abc));

        let abcb = walk(table, "abcb").unwrap();
        assert_eq!(walk(table, "cb"), Some(abcb));
        assert_eq!(table[abcb].link, Some(b));

        let last = walk(table, "abcbc").unwrap();
        assert_eq!(last, builder.active());
        assert_eq!(table[last].len, 5);
        assert_eq!(table[last].link, Some(bc));
        assert_eq!(walk(table, "cbc"), Some(last));
    }

    #[test]
    fn test_active_persists_across_chunks() {
        let mut builder = SamBuilder::with_defaults();
        builder.append(&symbols("ab"), None).unwrap();
        builder.append(&symbols("cb"), None).unwrap();
        builder.append(&symbols("c"), None).unwrap();

        let mut whole = SamBuilder::with_defaults();
        whole.append(&symbols("abcbc"), None).unwrap();

        assert_eq!(builder.state_count(), whole.state_count());
        assert!(walk(builder.table(), "bcbc").is_some());
        assert!(walk(builder.table(), "abcbc").is_some());
        assert_eq!(builder.total_symbols(), 5);
    }

    #[test]
    fn test_unrecognized_substring() {
        let mut builder = SamBuilder::with_defaults();
        builder.append(&symbols("abcbc"), None).unwrap();
        assert!(walk(builder.table(), "ca").is_none());
        assert!(walk(builder.table(), "bb").is_none());
    }

    #[test]
    fn test_zero_length_limit_rejected() {
        let mut builder = SamBuilder::with_defaults();
        assert_eq!(
            builder.append(&symbols("abc"), Some(0)),
            Err(SamError::InvalidLengthLimit(0))
        );
        assert_eq!(builder.total_symbols(), 0);
        assert_eq!(
            builder.append_symbol(1, Some(0)),
            Err(SamError::InvalidLengthLimit(0))
        );
    }

    #[test]
    fn test_length_limit_bounds_state_lengths() {
        let mut builder = SamBuilder::with_defaults();
        let text = symbols(&"abcdefghij".repeat(50));
        builder.append(&text, Some(3)).unwrap();

        let table = builder.table();
        assert_link_invariants(table);
        assert!(table.iter().all(|(_, s)| s.len <= 3));
        assert!(table[builder.active()].len <= 3);
        assert!(walk(table, "hij").is_some());
        assert!(walk(table, "jab").is_some());
    }

    #[test]
    fn test_length_limit_keeps_states_bounded() {
        // The cyclic pattern has 30 distinct substrings of length <= 4, and
        // each non-root state owns at least one of them.
        let pattern = symbols("abcabdabe");
        let mut builder = SamBuilder::with_defaults();
        for _ in 0..1000 {
            builder.append(&pattern, Some(4)).unwrap();
        }
        assert!(builder.state_count() <= 31);
        assert_eq!(builder.total_symbols(), 9000);
    }

    #[test]
    fn test_limit_of_one_credits_single_symbols() {
        let mut builder = SamBuilder::with_defaults();
        builder.append(&symbols("abab"), Some(1)).unwrap();
        let table = builder.table();

        let a = walk(table, "a").unwrap();
        let b = walk(table, "b").unwrap();
        assert_eq!(table[a].count, 2);
        assert_eq!(table[b].count, 2);
    }

    #[test]
    fn test_limit_after_unbounded_falls_back_to_short_suffix() {
        // No history is kept while unbounded, so the first limited symbol
        // cannot rebuild the "b" context and restarts from the root.
        let mut builder = SamBuilder::with_defaults();
        builder.append(&symbols("abab"), None).unwrap();
        builder.append_symbol(b'a' as Symbol, Some(2)).unwrap();

        let table = builder.table();
        assert_link_invariants(table);
        let a = walk(table, "a").unwrap();
        assert_eq!(builder.active(), a);
        assert_eq!(table[a].count, 2);
        assert_eq!(builder.total_symbols(), 5);
    }

    #[test]
    fn test_state_limit_exceeded() {
        let mut builder = SamBuilder::new(SamConfig {
            max_states: 4,
            ..Default::default()
        });
        let err = builder.append(&symbols("abcdef"), None).unwrap_err();
        assert_eq!(err, SamError::StateLimitExceeded { limit: 4 });
    }

    #[test]
    fn test_symbol_frequencies_recorded() {
        let mut builder = SamBuilder::with_defaults();
        builder.append(&symbols("aab"), None).unwrap();
        builder.append_symbol(b'a' as Symbol, None).unwrap();

        assert_eq!(builder.symbol_counts.get(&(b'a' as Symbol)), Some(&3));
        assert_eq!(builder.symbol_counts.get(&(b'b' as Symbol)), Some(&1));
        assert_eq!(builder.total_symbols(), 4);
    }
}
