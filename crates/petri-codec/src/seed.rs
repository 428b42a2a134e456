//! Plaintext seed patterns.
//!
//! The seed format is line-oriented: `'O'` marks a living cell, any
//! other character a dead one, and lines starting with `'!'` are
//! comments. Export trims trailing dead markers per row; import
//! centres the pattern on the origin using the longest non-comment
//! line and the non-comment line count.

use petri_core::Coord;
use petri_engine::World;

/// Marker for a living cell.
pub const ALIVE_MARKER: char = 'O';
/// Marker emitted for a dead cell inside the bounding box.
pub const DEAD_MARKER: char = '.';
/// Lines starting with this character are skipped on import.
pub const COMMENT_MARKER: char = '!';

/// Export the living cells as a plaintext pattern.
///
/// Walks the living bounding box top-to-bottom, left-to-right,
/// emitting one marker per cell and trimming trailing dead markers
/// from each row. Returns the empty string for a world with no
/// living cells.
pub fn export_seed(world: &World) -> String {
    let mut bounds: Option<(Coord, Coord)> = None;
    for cell in world.living_cells() {
        let c = cell.coord;
        bounds = Some(match bounds {
            None => (c, c),
            Some((min, max)) => (
                Coord::new(min.x.min(c.x), min.y.min(c.y)),
                Coord::new(max.x.max(c.x), max.y.max(c.y)),
            ),
        });
    }
    let Some((min, max)) = bounds else {
        return String::new();
    };

    let mut rows: Vec<String> = Vec::with_capacity((max.y - min.y + 1) as usize);
    for y in min.y..=max.y {
        let mut row = String::new();
        for x in min.x..=max.x {
            let alive = world
                .get(Coord::new(x, y))
                .is_some_and(|cell| cell.alive);
            row.push(if alive { ALIVE_MARKER } else { DEAD_MARKER });
        }
        row.truncate(row.trim_end_matches(DEAD_MARKER).len());
        rows.push(row);
    }
    rows.join("\n")
}

/// Replace the world's contents with the pattern in `text`.
///
/// The world is cleared first (generation back to 0), the pattern is
/// centred on the origin, and every `'O'` seeds a living cell through
/// the normal edit path. The literal seed text is recorded on the
/// world. Empty or all-comment input simply leaves the world cleared.
pub fn import_seed(world: &mut World, text: &str) {
    world.clear();

    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .collect();
    let longest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let x0 = -((longest as i64) / 2);
    let y0 = -((lines.len() as i64) / 2);

    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == ALIVE_MARKER {
                world.add_living_cell(Coord::new(x0 + col as i64, y0 + row as i64));
            }
        }
    }

    world.record_seed(text);
}
