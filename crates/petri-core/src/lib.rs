//! Core types and the rule abstraction for the petri life engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the petri workspace:
//! coordinates and the Moore neighbourhood, the generation counter,
//! the pluggable rule sets, and the import error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod generation;
pub mod rule;

pub use coord::{Coord, Window};
pub use error::ImportError;
pub use generation::Generation;
pub use rule::{Conway, Rule, RuleKind, UncheckedGrowth};
