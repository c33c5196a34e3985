//! Count aggregation over the suffix-link tree
//!
//! Each end position is credited to exactly one state during construction.
//! A substring occurs at every end position credited to its state or to any
//! state below it in the suffix-link tree, so the true count is the subtree
//! sum. Processing states by decreasing length visits children before their
//! link target, since a link always points to a strictly shorter state.

use super::table::StateTable;
use super::types::StateId;
use std::time::Instant;
use tracing::debug;

/// Replace every raw count with its suffix-link subtree sum
///
/// Must run exactly once per table; a second pass double-counts.
pub fn aggregate_counts(table: &mut StateTable) {
    let started = Instant::now();
    let order = states_by_decreasing_len(table);

    for &id in &order {
        if let Some(link) = table[id].link {
            let count = table[id].count;
            table[link].count += count;
        }
    }

    debug!(
        states = table.len(),
        root_count = table[StateId::ROOT].count,
        elapsed_us = started.elapsed().as_micros() as u64,
        "aggregated counts"
    );
}

/// Counting sort of state ids by `len`, longest first
fn states_by_decreasing_len(table: &StateTable) -> Vec<StateId> {
    let max_len = table.iter().map(|(_, s)| s.len).max().unwrap_or(0);

    let mut buckets = vec![0usize; max_len + 2];
    for (_, state) in table.iter() {
        buckets[state.len + 1] += 1;
    }
    for i in 1..buckets.len() {
        buckets[i] += buckets[i - 1];
    }

    // buckets[len] is now the first slot for states of that length
    let mut order = vec![StateId::ROOT; table.len()];
    for (id, state) in table.iter() {
        order[buckets[state.len]] = id;
        buckets[state.len] += 1;
    }
    order.reverse();
    order
}
