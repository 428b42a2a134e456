//! The tracked-cell world and the four-phase generation advance.
//!
//! [`World`] owns every tracked cell in a coordinate-keyed
//! [`IndexMap`] arena. The tracked set is kept minimal-but-sufficient:
//! every living cell and every dead cell adjacent to a living cell is
//! present and bidirectionally linked to its existing Moore
//! neighbours; a cell that is both dead and without living neighbours
//! is removed. Coordinate lookups are O(1) through the arena index —
//! neighbour materialization is the hot path of every advance.

use std::ops::RangeInclusive;
use std::time::Instant;

use indexmap::IndexMap;
use petri_core::{Coord, Generation, RuleKind, Window};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cell::TrackedCell;
use crate::report::AdvanceReport;

/// A sparse cellular-automaton world on the unbounded integer plane.
///
/// Mutation (seeding, toggling, advancing) takes `&mut self`; shared
/// access for rendering goes through the enumeration methods. For
/// concurrent use, wrap the world in
/// [`AsyncWorld`](crate::runner::AsyncWorld), which serializes edits
/// and advances behind one lock.
#[derive(Clone, Debug, Default)]
pub struct World {
    cells: IndexMap<Coord, TrackedCell>,
    rule: RuleKind,
    generation: Generation,
    seed_text: Option<String>,
}

impl World {
    /// Create an empty world using the standard Conway rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty world using the given rule.
    pub fn with_rule(rule: RuleKind) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The active rule selection.
    pub fn rule(&self) -> RuleKind {
        self.rule
    }

    /// Swap the active rule. Takes effect from the next advance.
    pub fn set_rule(&mut self, rule: RuleKind) {
        self.rule = rule;
    }

    /// The current generation number.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Restore the generation counter, e.g. from imported state.
    pub fn set_generation(&mut self, generation: Generation) {
        self.generation = generation;
    }

    /// The literal seed text most recently imported, if any.
    pub fn recorded_seed(&self) -> Option<&str> {
        self.seed_text.as_deref()
    }

    /// Record the literal seed text a pattern was loaded from.
    pub fn record_seed(&mut self, text: impl Into<String>) {
        self.seed_text = Some(text.into());
    }

    /// Number of tracked cells, alive or dead.
    pub fn tracked_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.values().filter(|c| c.alive).count()
    }

    /// Whether the world tracks no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The tracked cell at `coord`, if any.
    pub fn get(&self, coord: Coord) -> Option<&TrackedCell> {
        self.cells.get(&coord)
    }

    /// Every tracked cell, in arena order.
    pub fn cells(&self) -> impl Iterator<Item = &TrackedCell> {
        self.cells.values()
    }

    /// Every living cell.
    pub fn living_cells(&self) -> impl Iterator<Item = &TrackedCell> {
        self.cells.values().filter(|c| c.alive)
    }

    /// The tracked cells whose coordinates fall inside `window`.
    ///
    /// This is the render collaborator's enumeration: the world does
    /// not draw, it only filters by the caller-supplied visible range.
    pub fn cells_in(&self, window: Window) -> impl Iterator<Item = &TrackedCell> {
        self.cells
            .values()
            .filter(move |c| window.contains(&c.coord))
    }

    // ── Neighbour graph maintenance ─────────────────────────────

    /// Look up the cell at `coord`, creating and linking it if absent.
    ///
    /// A new cell is linked bidirectionally to every already-tracked
    /// Moore neighbour. If the cell ends up alive, all 8 of its
    /// neighbour coordinates are materialized as dead placeholders.
    /// For an existing cell, `update_existing` controls whether its
    /// liveness is overwritten; `age` resets whenever liveness
    /// actually changes.
    ///
    /// Crate-internal: this path defers pruning, so a dead write can
    /// leave a dead-and-neighbourless cell tracked until the caller
    /// prunes. The public edit surface ([`toggle_cell`](World::toggle_cell),
    /// [`add_living_cell`](World::add_living_cell),
    /// [`update_cell`](World::update_cell)) always restores the
    /// invariant before returning.
    pub(crate) fn get_or_add_cell(&mut self, coord: Coord, make_alive: bool, update_existing: bool) {
        if let Some(cell) = self.cells.get_mut(&coord) {
            if update_existing {
                if cell.alive != make_alive {
                    cell.age = 0;
                }
                cell.alive = make_alive;
                if make_alive {
                    self.materialize_neighbours(coord);
                }
            }
            return;
        }

        let mut cell = TrackedCell::new(coord, make_alive);
        for n in coord.neighbours() {
            if n == coord || cell.neighbours.contains(&n) {
                continue;
            }
            if let Some(existing) = self.cells.get_mut(&n) {
                existing.neighbours.push(coord);
                cell.neighbours.push(n);
            }
        }
        self.cells.insert(coord, cell);

        if make_alive {
            self.materialize_neighbours(coord);
        }
    }

    /// Ensure every Moore neighbour of `coord` is tracked.
    ///
    /// Missing neighbours are created as dead placeholders; creation
    /// links them back to `coord` (and any other tracked cells around
    /// them) as a side effect.
    fn materialize_neighbours(&mut self, coord: Coord) {
        for n in coord.neighbours() {
            if n != coord && !self.cells.contains_key(&n) {
                self.get_or_add_cell(n, false, false);
            }
        }
    }

    /// Detach `coord` from its remaining neighbours and drop it.
    fn remove_cell(&mut self, coord: Coord) {
        if let Some(cell) = self.cells.swap_remove(&coord) {
            for n in cell.neighbours {
                if let Some(neighbour) = self.cells.get_mut(&n) {
                    neighbour.neighbours.retain(|c| *c != coord);
                }
            }
        }
    }

    /// Remove `coord` if it is dead with no living neighbour.
    fn prune_if_untracked_eligible(&mut self, coord: Coord) {
        let eligible = match self.cells.get(&coord) {
            Some(cell) => !cell.alive && !self.any_living_neighbour(cell),
            None => false,
        };
        if eligible {
            self.remove_cell(coord);
        }
    }

    /// Prune `coord` and its whole Moore neighbourhood.
    ///
    /// Eligibility depends only on liveness, never on tracking, so
    /// the order of removals is irrelevant.
    fn prune_around(&mut self, coord: Coord) {
        self.prune_if_untracked_eligible(coord);
        for n in coord.neighbours() {
            if n != coord {
                self.prune_if_untracked_eligible(n);
            }
        }
    }

    fn live_neighbour_count(&self, cell: &TrackedCell) -> u8 {
        cell.neighbours
            .iter()
            .filter(|c| self.cells.get(*c).is_some_and(|n| n.alive))
            .count() as u8
    }

    fn any_living_neighbour(&self, cell: &TrackedCell) -> bool {
        cell.neighbours
            .iter()
            .any(|c| self.cells.get(c).is_some_and(|n| n.alive))
    }

    // ── Interactive edits ───────────────────────────────────────

    /// Flip liveness at `coord`, creating the cell alive if untracked.
    ///
    /// Toggling a lone cell twice leaves the coordinate untracked
    /// again; toggling next to living cells leaves it tracked but
    /// dead.
    pub fn toggle_cell(&mut self, coord: Coord) {
        let make_alive = match self.cells.get(&coord) {
            Some(cell) => !cell.alive,
            None => true,
        };
        self.update_cell(coord, make_alive);
    }

    /// Place a living cell at `coord`.
    pub fn add_living_cell(&mut self, coord: Coord) {
        self.update_cell(coord, true);
    }

    /// Force the liveness at `coord`.
    ///
    /// This is also the re-seeding path for structured import:
    /// neighbour links are rebuilt here as a side effect, never
    /// deserialized. Setting an untracked coordinate dead is a no-op.
    pub fn update_cell(&mut self, coord: Coord, alive: bool) {
        self.get_or_add_cell(coord, alive, true);
        if !alive {
            self.prune_around(coord);
        }
        self.debug_assert_symmetric();
    }

    /// Seed the closed rectangle with living cells by Bernoulli trial.
    ///
    /// Each coordinate in `xs` × `ys` becomes alive with probability
    /// `density` (clamped to `[0, 1]`; non-finite densities seed
    /// nothing). Coordinates that fail the trial are left as they
    /// are, not forced dead.
    pub fn randomize<R: Rng>(
        &mut self,
        density: f64,
        xs: RangeInclusive<i64>,
        ys: RangeInclusive<i64>,
        rng: &mut R,
    ) {
        let density = if density.is_finite() {
            density.clamp(0.0, 1.0)
        } else {
            0.0
        };
        for x in xs {
            for y in ys.clone() {
                if rng.random_bool(density) {
                    self.get_or_add_cell(Coord::new(x, y), true, true);
                }
            }
        }
        self.debug_assert_symmetric();
    }

    /// [`randomize`](World::randomize) with a ChaCha8 RNG seeded from
    /// `seed`, for reproducible boards.
    pub fn randomize_seeded(
        &mut self,
        density: f64,
        xs: RangeInclusive<i64>,
        ys: RangeInclusive<i64>,
        seed: u64,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.randomize(density, xs, ys, &mut rng);
    }

    /// Drop every tracked cell and reset the generation to 0.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.generation = Generation(0);
        self.seed_text = None;
    }

    // ── Generation advance ──────────────────────────────────────

    /// Advance the world one generation.
    ///
    /// Four strictly ordered phases over the snapshot of cells
    /// tracked at the start of the step:
    ///
    /// 1. **Determine** — compute `alive_next` for every cell from
    ///    pre-step liveness through the active rule. No cell observes
    ///    another's post-step state.
    /// 2. **Commit** — apply `alive_next`; a cell continuously alive
    ///    gains a year of `age`, anything else resets to 0; living
    ///    cells materialize missing placeholder neighbours (evaluated
    ///    from the next advance on).
    /// 3. **Prune** — drop every cell now dead with no living
    ///    neighbour, detaching it from the survivors.
    /// 4. Increment the generation counter.
    ///
    /// There is no error path: the step either completes or (under
    /// [`AsyncWorld`](crate::runner::AsyncWorld)) is never observed.
    pub fn advance(&mut self) -> AdvanceReport {
        let started = Instant::now();
        let snapshot: Vec<Coord> = self.cells.keys().copied().collect();
        let rule = self.rule.rule();

        // Phase 1: determine, reading only pre-step state.
        let phase = Instant::now();
        let mut next_states: Vec<bool> = Vec::with_capacity(snapshot.len());
        for coord in &snapshot {
            match self.cells.get(coord) {
                Some(cell) => {
                    next_states.push(rule.next_state(cell.alive, self.live_neighbour_count(cell)))
                }
                None => next_states.push(false),
            }
        }
        for (coord, next) in snapshot.iter().zip(&next_states) {
            if let Some(cell) = self.cells.get_mut(coord) {
                cell.alive_next = *next;
            }
        }
        let determine_us = phase.elapsed().as_micros() as u64;

        // Phase 2: commit.
        let phase = Instant::now();
        for &coord in &snapshot {
            let now_alive = match self.cells.get_mut(&coord) {
                Some(cell) => {
                    let was_alive = cell.alive;
                    cell.alive = cell.alive_next;
                    if was_alive && cell.alive {
                        cell.age += 1;
                    } else {
                        cell.age = 0;
                    }
                    cell.alive
                }
                None => continue,
            };
            if now_alive {
                self.materialize_neighbours(coord);
            }
        }
        let commit_us = phase.elapsed().as_micros() as u64;

        // Phase 3: prune, using post-step liveness.
        let phase = Instant::now();
        let untracked: Vec<Coord> = snapshot
            .iter()
            .filter(|coord| {
                self.cells
                    .get(*coord)
                    .is_some_and(|cell| !cell.alive && !self.any_living_neighbour(cell))
            })
            .copied()
            .collect();
        let pruned_cells = untracked.len();
        for coord in untracked {
            self.remove_cell(coord);
        }
        let prune_us = phase.elapsed().as_micros() as u64;

        // Phase 4: the step is now complete.
        self.generation = self.generation.next();
        self.debug_assert_symmetric();

        AdvanceReport {
            generation: self.generation,
            population: self.population(),
            tracked_cells: self.cells.len(),
            pruned_cells,
            determine_us,
            commit_us,
            prune_us,
            total_us: started.elapsed().as_micros() as u64,
        }
    }

    /// Verify neighbour-link symmetry and completeness (debug builds).
    fn debug_assert_symmetric(&self) {
        #[cfg(debug_assertions)]
        for cell in self.cells.values() {
            for n in &cell.neighbours {
                let back = self
                    .cells
                    .get(n)
                    .map(|other| other.neighbours.contains(&cell.coord));
                debug_assert_eq!(
                    back,
                    Some(true),
                    "asymmetric link {} -> {n}",
                    cell.coord
                );
            }
            for n in cell.coord.neighbours() {
                if n != cell.coord && self.cells.contains_key(&n) {
                    debug_assert!(
                        cell.neighbours.contains(&n),
                        "tracked neighbour {n} missing from {}",
                        cell.coord
                    );
                }
            }
        }
    }
}
