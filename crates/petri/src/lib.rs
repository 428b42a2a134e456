//! Petri: a sparse Game of Life simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all petri sub-crates. For most users, adding `petri` as a
//! single dependency is sufficient.
//!
//! The engine tracks only cells that are alive or adjacent to a
//! living cell, on an unbounded signed 64-bit coordinate plane.
//! Rules are pluggable per world, advances run synchronously in four
//! phases (determine, commit, prune, count), and worlds round-trip
//! through a plaintext seed format and a JSON state document.
//!
//! # Quick start
//!
//! ```rust
//! use petri::prelude::*;
//!
//! // Seed a blinker and advance one generation.
//! let mut world = World::new();
//! for coord in [Coord::new(-1, 0), Coord::new(0, 0), Coord::new(1, 0)] {
//!     world.add_living_cell(coord);
//! }
//! let report = world.advance();
//! assert_eq!(report.generation, Generation(1));
//! assert_eq!(report.population, 3);
//!
//! // The world is portable: rule, generation, and cells round-trip.
//! let json = petri::codec::export_state(&world);
//! let mut restored = World::new();
//! petri::codec::import_state(&mut restored, &json).unwrap();
//! assert_eq!(restored.generation(), Generation(1));
//!
//! // Enumerate the cells a viewport would draw.
//! let window = Window::new(Coord::new(-5, -5), Coord::new(5, 5));
//! assert!(restored.cells_in(window).count() > 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `petri-core` | Coordinates, windows, rules, errors |
//! | [`engine`] | `petri-engine` | `World`, `AsyncWorld`, advance reports |
//! | [`codec`] | `petri-codec` | Seed and JSON state codecs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: coordinates, windows, generations, rules, and errors
/// (`petri-core`).
pub use petri_core as types;

/// The tracked-cell world and background runner (`petri-engine`).
pub use petri_engine as engine;

/// Seed and structured-state codecs (`petri-codec`).
pub use petri_codec as codec;

/// Common imports for typical petri usage.
///
/// ```rust
/// use petri::prelude::*;
/// ```
pub mod prelude {
    pub use petri_codec::{export_seed, export_state, import_seed, import_state};
    pub use petri_core::{Conway, Coord, Generation, ImportError, Rule, RuleKind, UncheckedGrowth, Window};
    pub use petri_engine::{AdvanceReport, AsyncWorld, RunnerConfig, SubmitError, TrackedCell, World};
}
