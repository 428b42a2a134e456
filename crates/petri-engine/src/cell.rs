//! The tracked cell record.

use petri_core::Coord;
use smallvec::SmallVec;

/// A cell currently represented in the world, alive or dead.
///
/// Neighbour back-references are stored as coordinates into the
/// world's cell arena rather than aliased pointers, so the cyclic
/// Moore-neighbourhood graph needs no reference counting. The list
/// holds up to 8 entries inline.
///
/// `alive_next` is scratch state: it is only meaningful between the
/// determine and commit phases of an advance.
#[derive(Clone, Debug)]
pub struct TrackedCell {
    /// The cell's position, also its key in the world arena.
    pub coord: Coord,
    /// Current liveness.
    pub alive: bool,
    /// Liveness computed by the determine phase, applied at commit.
    pub(crate) alive_next: bool,
    /// Consecutive generations this cell has been continuously alive.
    ///
    /// 0 in the generation a cell is born and in every generation it
    /// is dead; incremented each further generation it survives.
    pub age: u64,
    /// Coordinates of the tracked cells at Chebyshev distance 1.
    pub(crate) neighbours: SmallVec<[Coord; 8]>,
}

impl TrackedCell {
    /// Create an unlinked cell. The world links it on insertion.
    pub(crate) fn new(coord: Coord, alive: bool) -> Self {
        Self {
            coord,
            alive,
            alive_next: false,
            age: 0,
            neighbours: SmallVec::new(),
        }
    }

    /// The coordinates this cell is currently linked to.
    pub fn neighbours(&self) -> &[Coord] {
        &self.neighbours
    }
}
