//! Capacity-ranked seed sweep.

use super::aggregation::SuperAisleAggregator;
use super::ranking::CapacityProfile;
use crate::eval::{Evaluator, Incumbent};
use crate::exact::aisle_count_bound;
use tracing::debug;

/// Summary of a seed sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    /// Aisle counts aggregated.
    pub evaluated: usize,
    /// Aggregations that replaced the incumbent.
    pub improvements: usize,
}

/// Aggregates the top-`k` capacity aisles for `k = 1..=N`.
///
/// Aisle counts whose cumulative capacity is below `LB` are skipped. Stops
/// once `UB / k` cannot beat the incumbent, even on the aisle-count tie
/// break. No oracle calls, so the sweep runs to completion regardless of
/// the time budget.
pub fn seed_sweep(
    aggregator: &mut SuperAisleAggregator<'_>,
    profile: &CapacityProfile,
    evaluator: &Evaluator<'_>,
    incumbent: &mut Incumbent,
) -> SeedOutcome {
    let wave_ub = aggregator.catalog().wave_ub();
    let mut outcome = SeedOutcome::default();

    for k in 1..=profile.len() {
        if !incumbent.admits(aisle_count_bound(wave_ub, k), k) {
            break;
        }
        if !profile.reaches_lb(k) {
            continue;
        }

        let aisles = profile.top(k);
        let candidate = aggregator.aggregate(aisles).into_candidate(aisles);
        outcome.evaluated += 1;
        if incumbent.offer(evaluator, candidate) {
            outcome.improvements += 1;
            debug!(k, ratio = incumbent.ratio(), "seed improved incumbent");
        }
    }

    outcome
}
