//! Portable state for the petri life engine.
//!
//! Two codecs make a simulation portable: the plaintext [`seed`]
//! format for compact living-cell patterns, and the structured JSON
//! [`state`] format that round-trips the rule selection, generation
//! counter, and full tracked-cell set. File I/O stays with the
//! caller; both codecs work on strings.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod seed;
pub mod state;

pub use seed::{export_seed, import_seed, ALIVE_MARKER, COMMENT_MARKER, DEAD_MARKER};
pub use state::{export_state, import_state};
