//! Integer plane coordinates, the Moore neighbourhood, and visible windows.

use std::fmt;

/// All 8 Moore-neighbourhood offsets: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(i64, i64); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// A coordinate on the unbounded integer plane.
///
/// Coordinates are signed 64-bit on both axes so patterns can drift
/// arbitrarily far from the origin without precision loss. `y` grows
/// downward, matching the row order of the plaintext seed format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Horizontal position (column).
    pub x: i64,
    /// Vertical position (row).
    pub y: i64,
}

impl Coord {
    /// Create a coordinate from its two components.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The 8 coordinates at Chebyshev distance 1.
    ///
    /// Offsets saturate at the i64 boundary rather than wrapping, so a
    /// cell at the numeric edge of the plane simply sees duplicate
    /// neighbours collapse onto itself there. Callers that deduplicate
    /// by coordinate are unaffected anywhere a pattern can practically
    /// reach.
    pub fn neighbours(&self) -> [Coord; 8] {
        OFFSETS_8.map(|(dx, dy)| Coord {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        })
    }

    /// Whether `other` lies in this coordinate's Moore neighbourhood.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        if self == other {
            return false;
        }
        self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// A closed axis-aligned coordinate window.
///
/// The render collaborator derives one from its viewport offset and
/// cell pixel size, then asks the world for the tracked cells inside
/// it. Both corners are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Minimum corner (inclusive).
    pub min: Coord,
    /// Maximum corner (inclusive).
    pub max: Coord,
}

impl Window {
    /// Create a window from two inclusive corners.
    ///
    /// The corners are normalized, so the arguments may be given in
    /// either order on either axis.
    pub fn new(a: Coord, b: Coord) -> Self {
        Self {
            min: Coord::new(a.x.min(b.x), a.y.min(b.y)),
            max: Coord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Derive the visible window for a viewport.
    ///
    /// `offset` is the world coordinate of the viewport's top-left
    /// cell; `width_px`/`height_px` are the viewport dimensions in
    /// pixels and `cell_size_px` the square size of one rendered cell.
    /// The window is closed on both axes, so a partially visible cell
    /// row or column is still enumerated.
    pub fn from_viewport(offset: Coord, width_px: u32, height_px: u32, cell_size_px: u32) -> Self {
        let size = cell_size_px.max(1) as i64;
        let cols = (width_px as i64) / size;
        let rows = (height_px as i64) / size;
        Self {
            min: offset,
            max: Coord::new(
                offset.x.saturating_add(cols),
                offset.y.saturating_add(rows),
            ),
        }
    }

    /// Whether `coord` falls inside the window.
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
    }
}
