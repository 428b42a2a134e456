//! Structured JSON state documents.
//!
//! The persisted form of a world is
//! `{ "rule": <name>, "iteration": <n>, "cells": [{ "x", "y", "isAlive" }] }`.
//! The rule is written as its registry name and resolved back through
//! [`RuleKind::from_name`] on import — a tagged identifier, not a
//! reflective type lookup. Transient cell state (age, neighbour
//! links, next-state scratch) is never serialized; import reseeds
//! every cell through the normal edit path and the neighbour graph
//! rebuilds itself as a side effect.

use petri_core::{Coord, Generation, ImportError, RuleKind};
use petri_engine::World;
use serde::{Deserialize, Serialize};

/// Serialized form of one tracked cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CellDoc {
    x: i64,
    y: i64,
    #[serde(rename = "isAlive")]
    is_alive: bool,
}

/// The full state document.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StateDoc {
    rule: String,
    iteration: u64,
    cells: Vec<CellDoc>,
}

/// Serialize the world to a JSON state document.
///
/// Every tracked cell is listed — living cells and the dead boundary
/// ring alike — with only identity and liveness.
pub fn export_state(world: &World) -> String {
    let doc = StateDoc {
        rule: world.rule().name().to_string(),
        iteration: world.generation().0,
        cells: world
            .cells()
            .map(|cell| CellDoc {
                x: cell.coord.x,
                y: cell.coord.y,
                is_alive: cell.alive,
            })
            .collect(),
    };
    // Plain structs with string keys cannot fail to serialize.
    serde_json::to_string_pretty(&doc).expect("state document serialization")
}

/// Replace the world's contents from a JSON state document.
///
/// The document is parsed and validated in full before the world is
/// touched, so a failed import leaves existing state unchanged.
/// On success the world is cleared, the rule and generation restored,
/// and every listed cell reseeded via the update path.
///
/// # Errors
///
/// [`ImportError::InvalidDocument`] for malformed JSON and
/// [`ImportError::UnknownRule`] for a rule name missing from the
/// registry.
pub fn import_state(world: &mut World, json: &str) -> Result<(), ImportError> {
    let doc: StateDoc = serde_json::from_str(json).map_err(|err| ImportError::InvalidDocument {
        reason: err.to_string(),
    })?;
    let rule = RuleKind::from_name(&doc.rule).ok_or_else(|| ImportError::UnknownRule {
        name: doc.rule.clone(),
    })?;

    world.clear();
    world.set_rule(rule);
    world.set_generation(Generation(doc.iteration));
    for cell in &doc.cells {
        world.update_cell(Coord::new(cell.x, cell.y), cell.is_alive);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn living_set(world: &World) -> Vec<Coord> {
        let mut coords: Vec<Coord> = world.living_cells().map(|cell| cell.coord).collect();
        coords.sort();
        coords
    }

    fn sample_world() -> World {
        let mut world = World::with_rule(RuleKind::UncheckedGrowth);
        for coord in [Coord::new(-1, 0), Coord::new(0, 0), Coord::new(1, 0)] {
            world.add_living_cell(coord);
        }
        world.advance();
        world
    }

    // ── Round trip ──────────────────────────────────────────────

    #[test]
    fn round_trip_preserves_rule_iteration_and_living_set() {
        let world = sample_world();
        let json = export_state(&world);

        let mut restored = World::new();
        import_state(&mut restored, &json).unwrap();

        assert_eq!(restored.rule(), RuleKind::UncheckedGrowth);
        assert_eq!(restored.generation(), world.generation());
        assert_eq!(living_set(&restored), living_set(&world));
    }

    #[test]
    fn round_trip_behaviour_is_identical() {
        // Boundary-dead membership may differ after a round trip;
        // derived behaviour must not.
        let mut world = sample_world();
        let json = export_state(&world);
        let mut restored = World::new();
        import_state(&mut restored, &json).unwrap();

        for _ in 0..8 {
            world.advance();
            restored.advance();
            assert_eq!(living_set(&restored), living_set(&world));
        }
    }

    #[test]
    fn import_rebuilds_neighbour_links() {
        let json = export_state(&sample_world());
        let mut restored = World::new();
        import_state(&mut restored, &json).unwrap();

        for cell in restored.cells() {
            for n in cell.neighbours() {
                let other = restored.get(*n).expect("link target tracked");
                assert!(other.neighbours().contains(&cell.coord));
            }
        }
    }

    #[test]
    fn export_excludes_transient_fields() {
        let json = export_state(&sample_world());
        assert!(!json.contains("age"));
        assert!(!json.contains("neighbours"));
        assert!(!json.contains("alive_next"));
        assert!(json.contains("isAlive"));
    }

    // ── Failure paths ───────────────────────────────────────────

    #[test]
    fn unknown_rule_fails_without_mutating() {
        let mut world = sample_world();
        let before = living_set(&world);
        let generation = world.generation();

        let err = import_state(
            &mut world,
            r#"{ "rule": "seeds", "iteration": 3, "cells": [] }"#,
        )
        .unwrap_err();
        assert_eq!(err, ImportError::UnknownRule { name: "seeds".into() });
        assert_eq!(living_set(&world), before);
        assert_eq!(world.generation(), generation);
    }

    #[test]
    fn malformed_json_fails_without_mutating() {
        let mut world = sample_world();
        let before = living_set(&world);

        let err = import_state(&mut world, "{ not json").unwrap_err();
        assert!(matches!(err, ImportError::InvalidDocument { .. }));
        assert_eq!(living_set(&world), before);
    }

    #[test]
    fn missing_fields_are_invalid() {
        let mut world = World::new();
        let err = import_state(&mut world, r#"{ "iteration": 1, "cells": [] }"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidDocument { .. }));
    }

    #[test]
    fn import_empty_cell_list_gives_cleared_world() {
        let mut world = sample_world();
        import_state(
            &mut world,
            r#"{ "rule": "conway", "iteration": 9, "cells": [] }"#,
        )
        .unwrap();
        assert!(world.is_empty());
        assert_eq!(world.generation(), Generation(9));
        assert_eq!(world.rule(), RuleKind::Conway);
    }

    #[test]
    fn dead_cells_in_document_are_tolerated_in_any_order() {
        // Dead boundary cells listed before their living neighbour
        // must not corrupt the graph.
        let mut world = World::new();
        import_state(
            &mut world,
            r#"{
                "rule": "conway",
                "iteration": 0,
                "cells": [
                    { "x": 1, "y": 0, "isAlive": false },
                    { "x": -1, "y": 0, "isAlive": false },
                    { "x": 0, "y": 0, "isAlive": true }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(living_set(&world), vec![Coord::new(0, 0)]);
        // The living cell rematerialized its whole boundary ring.
        assert_eq!(world.tracked_count(), 9);
    }
}
