//! # samstat - Incremental Substring Statistics
//!
//! samstat builds a suffix automaton over symbol chunks fed over time and
//! answers frequency and continuation queries against every substring of the
//! accumulated input, in time and memory linear in the input size.
//!
//! ## Architecture
//!
//! - [`automaton`] - State table, online builder, count aggregation, queries
//! - [`error`] - Contract violation and resource errors
//!
//! Symbols are plain `u32` codes; turning text into codes is left to the
//! caller.
//!
//! ## Quick Start
//!
//! ```
//! use samstat::automaton::{SamBuilder, Symbol};
//!
//! let text: Vec<Symbol> = "ababacacad".bytes().map(Symbol::from).collect();
//!
//! let mut builder = SamBuilder::with_defaults();
//! builder.append(&text, None).unwrap();
//! let sam = builder.finalize();
//!
//! assert_eq!(sam.occur_count(&[b'a' as Symbol]), 5);
//! assert_eq!(sam.out_count(&[b'a' as Symbol]), 3);
//! assert_eq!(sam.occur_count(&[b'z' as Symbol]), -1);
//! ```
//!
//! ## Streaming
//!
//! Passing a `length_limit` to `append` keeps memory bounded on unbounded
//! streams while counts of substrings up to that length stay exact.

pub mod automaton;
pub mod error;

pub use automaton::{Sam, SamBuilder, SamConfig, SamStats, StateId, SuffixAutomaton, Symbol};
pub use error::{Result, SamError};
