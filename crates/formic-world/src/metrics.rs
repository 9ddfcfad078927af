//! Per-tick metrics for the simulation driver.
//!
//! [`TickMetrics`] captures what happened during a single tick, for
//! telemetry and for tests that assert on driver behavior.

use formic_core::TickId;

/// Counters collected during a single tick.
///
/// The driver populates these after each tick; [`World::last_metrics`]
/// returns the most recent set.
///
/// [`World::last_metrics`]: crate::World::last_metrics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// The tick these counters describe.
    pub tick: TickId,
    /// Agents that moved to a neighbouring cell.
    pub moved: u32,
    /// Agents with no valid move this tick (degenerate extent).
    pub blocked: u32,
    /// Agents spawned by the population rule.
    pub spawned: u32,
    /// Agents expired by the population rule's age limit.
    pub expired: u32,
    /// Wall-clock time for the whole tick, in microseconds.
    pub total_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TickMetrics::default();
        assert_eq!(m.tick, TickId(0));
        assert_eq!(m.moved, 0);
        assert_eq!(m.blocked, 0);
        assert_eq!(m.spawned, 0);
        assert_eq!(m.expired, 0);
        assert_eq!(m.total_us, 0);
    }
}
