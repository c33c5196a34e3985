#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use samstat::{SamBuilder, Symbol};

#[derive(Arbitrary, Debug)]
struct Input {
    chunks: Vec<(Vec<u8>, Option<u8>)>,
    query: Vec<u8>,
    next: u8,
}

fuzz_target!(|input: Input| {
    // Arbitrary chunks and limits must never panic, and every query must
    // stay within its documented range.
    let mut builder = SamBuilder::with_defaults();
    for (chunk, limit) in &input.chunks {
        let symbols: Vec<Symbol> = chunk.iter().map(|&b| Symbol::from(b % 8)).collect();
        let limit = limit.map(|l| l as usize % 8);
        if builder.append(&symbols, limit).is_err() {
            assert_eq!(limit, Some(0));
        }
    }
    let sam = builder.finalize();

    let query: Vec<Symbol> = input.query.iter().map(|&b| Symbol::from(b % 8)).collect();
    assert!(sam.occur_count(&query) >= -1);
    let degree = sam.out_degree(&query, Symbol::from(input.next % 8));
    assert!((0.0..=1.0).contains(&degree));
    assert!(sam.occur_degree(&query, Some(1000.0)) <= 1000.0);
    let _ = sam.out_count(&query);
});
