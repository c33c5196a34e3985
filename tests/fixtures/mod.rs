//! Shared helpers for integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use samstat::Symbol;

/// Encode text as one symbol per byte
pub fn symbols(text: &str) -> Vec<Symbol> {
    text.bytes().map(Symbol::from).collect()
}

/// Seeded RNG so failures reproduce
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random lowercase text that never uses any byte of `excluded`
pub fn filler(rng: &mut StdRng, len: usize, excluded: &str) -> Vec<Symbol> {
    let alphabet: Vec<u8> = (b'a'..=b'z')
        .filter(|b| !excluded.as_bytes().contains(b))
        .collect();
    (0..len)
        .map(|_| Symbol::from(alphabet[rng.gen_range(0..alphabet.len())]))
        .collect()
}

/// Count (possibly overlapping) occurrences by scanning
pub fn naive_count(text: &[Symbol], pattern: &[Symbol]) -> i64 {
    if pattern.is_empty() {
        return text.len() as i64;
    }
    let count = text
        .windows(pattern.len())
        .filter(|w| *w == pattern)
        .count() as i64;
    if count == 0 { -1 } else { count }
}

/// Number of distinct symbols directly following some occurrence
pub fn naive_out_count(text: &[Symbol], pattern: &[Symbol]) -> usize {
    let mut next: Vec<Symbol> = (0..text.len())
        .filter(|&i| text[i..].starts_with(pattern) && i + pattern.len() < text.len())
        .map(|i| text[i + pattern.len()])
        .collect();
    next.sort_unstable();
    next.dedup();
    next.len()
}

/// Every distinct substring of `text` with length in `1..=max_len`
pub fn substrings(text: &[Symbol], max_len: usize) -> Vec<Vec<Symbol>> {
    let mut all: Vec<Vec<Symbol>> = (0..text.len())
        .flat_map(|i| (i + 1..=text.len().min(i + max_len)).map(move |j| text[i..j].to_vec()))
        .collect();
    all.sort();
    all.dedup();
    all
}
