//! The monotonic generation counter.

use std::fmt;

/// Monotonically increasing generation counter.
///
/// Incremented once per completed advance; reset to 0 when the world
/// is cleared or reseeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    /// The next generation.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_increments() {
        let g = Generation::default();
        assert_eq!(g, Generation(0));
        assert_eq!(g.next(), Generation(1));
        assert_eq!(g.next().next(), Generation(2));
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(Generation(17).to_string(), "17");
    }
}
