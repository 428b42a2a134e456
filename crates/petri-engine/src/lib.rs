//! Sparse tracked-cell world and background advance runner.
//!
//! The [`World`] tracks only cells that are alive or adjacent to a
//! living cell, linked into an explicit Moore-neighbourhood graph,
//! and advances them synchronously through a pluggable rule set.
//! [`AsyncWorld`] runs advances on a worker thread behind the shared
//! world lock so a rendering or input loop never blocks on a step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod report;
pub mod runner;
pub mod world;

pub use cell::TrackedCell;
pub use report::AdvanceReport;
pub use runner::{AsyncWorld, RunnerConfig, SubmitError};
pub use world::World;
