//! Per-advance metrics.

use petri_core::Generation;

/// Counters and timings collected during a single advance.
///
/// All durations are in microseconds. Returned by
/// [`World::advance`](crate::World::advance) and delivered through
/// the [`AsyncWorld`](crate::runner::AsyncWorld) completion channel;
/// consumers (status bars, profiling) read whichever fields they
/// need.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Generation number after this advance.
    pub generation: Generation,
    /// Living cells after this advance.
    pub population: usize,
    /// Tracked cells (living plus boundary dead) after this advance.
    pub tracked_cells: usize,
    /// Cells removed by the prune phase.
    pub pruned_cells: usize,
    /// Wall-clock time of the determine phase, in microseconds.
    pub determine_us: u64,
    /// Wall-clock time of the commit phase, in microseconds.
    pub commit_us: u64,
    /// Wall-clock time of the prune phase, in microseconds.
    pub prune_us: u64,
    /// Wall-clock time of the entire advance, in microseconds.
    pub total_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_is_zero() {
        let report = AdvanceReport::default();
        assert_eq!(report.generation, Generation(0));
        assert_eq!(report.population, 0);
        assert_eq!(report.tracked_cells, 0);
        assert_eq!(report.pruned_cells, 0);
        assert_eq!(report.total_us, 0);
    }
}
