//! Pluggable rule sets mapping liveness and neighbour count to next state.
//!
//! A [`Rule`] is a pure function of a cell's current liveness and its
//! live Moore-neighbour count. Rules are swappable per world instance
//! and identified for persistence by [`RuleKind`], a tagged variant
//! resolved through [`RuleKind::from_name`] at decode time rather
//! than any reflective type lookup.

use std::fmt;

/// Next-state function for one cell.
///
/// Implementations must be stateless: the result may depend only on
/// the two arguments, so the determine phase can evaluate cells in
/// any order (or in parallel) against the pre-step snapshot.
pub trait Rule {
    /// Compute the cell's liveness in the next generation.
    ///
    /// `live_neighbours` is the number of currently living cells in
    /// the Moore neighbourhood, 0..=8.
    fn next_state(&self, alive: bool, live_neighbours: u8) -> bool;
}

/// Conway's standard rule: survive on 2 or 3 live neighbours, birth
/// on exactly 3.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Conway;

impl Rule for Conway {
    fn next_state(&self, alive: bool, live_neighbours: u8) -> bool {
        if alive {
            live_neighbours == 2 || live_neighbours == 3
        } else {
            live_neighbours == 3
        }
    }
}

/// High-tolerance growth variant: survive on 2..=6 live neighbours,
/// birth on exactly 3.
///
/// Crowded clusters that the standard rule would thin out keep
/// growing under this rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UncheckedGrowth;

impl Rule for UncheckedGrowth {
    fn next_state(&self, alive: bool, live_neighbours: u8) -> bool {
        if alive {
            (2..=6).contains(&live_neighbours)
        } else {
            live_neighbours == 3
        }
    }
}

/// Identity of a registered rule set.
///
/// This is the persisted form of the rule selection: the name string
/// written by [`RuleKind::name`] round-trips through
/// [`RuleKind::from_name`], which acts as the decode-time registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// The standard survival/birth rule.
    #[default]
    Conway,
    /// The high-tolerance growth variant.
    UncheckedGrowth,
}

impl RuleKind {
    /// Every registered rule kind, in registry order.
    pub const ALL: [RuleKind; 2] = [RuleKind::Conway, RuleKind::UncheckedGrowth];

    /// The rule implementation for this kind.
    pub fn rule(&self) -> &'static dyn Rule {
        match self {
            Self::Conway => &Conway,
            Self::UncheckedGrowth => &UncheckedGrowth,
        }
    }

    /// Stable identifier used in serialized state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conway => "conway",
            Self::UncheckedGrowth => "unchecked-growth",
        }
    }

    /// Resolve a serialized identifier back to a rule kind.
    ///
    /// Returns `None` for unregistered names; structured import maps
    /// that to [`ImportError::UnknownRule`](crate::ImportError).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Conway thresholds ───────────────────────────────────────

    #[test]
    fn conway_live_cell_transitions() {
        for n in 0u8..=8 {
            let expected = n == 2 || n == 3;
            assert_eq!(Conway.next_state(true, n), expected, "alive, {n} neighbours");
        }
    }

    #[test]
    fn conway_dead_cell_births_on_three() {
        for n in 0u8..=8 {
            assert_eq!(Conway.next_state(false, n), n == 3, "dead, {n} neighbours");
        }
    }

    // ── UncheckedGrowth thresholds ──────────────────────────────

    #[test]
    fn growth_survives_up_to_six() {
        for n in 0u8..=8 {
            let expected = (2..=6).contains(&n);
            assert_eq!(
                UncheckedGrowth.next_state(true, n),
                expected,
                "alive, {n} neighbours"
            );
        }
    }

    #[test]
    fn growth_survives_where_conway_dies() {
        // Five live neighbours kills under Conway, survives under growth.
        assert!(!Conway.next_state(true, 5));
        assert!(UncheckedGrowth.next_state(true, 5));
    }

    #[test]
    fn growth_birth_matches_conway() {
        for n in 0u8..=8 {
            assert_eq!(
                UncheckedGrowth.next_state(false, n),
                Conway.next_state(false, n)
            );
        }
    }

    // ── Registry ────────────────────────────────────────────────

    #[test]
    fn names_round_trip() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(RuleKind::from_name("day-and-night"), None);
        assert_eq!(RuleKind::from_name(""), None);
        // Registry lookup is exact, not case-folded.
        assert_eq!(RuleKind::from_name("Conway"), None);
    }

    #[test]
    fn kind_dispatches_to_matching_rule() {
        assert!(!RuleKind::Conway.rule().next_state(true, 5));
        assert!(RuleKind::UncheckedGrowth.rule().next_state(true, 5));
    }

    #[test]
    fn default_kind_is_conway() {
        assert_eq!(RuleKind::default(), RuleKind::Conway);
    }
}
