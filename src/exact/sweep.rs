//! Bounded parameter sweeps over the exact subproblems.

use super::solver::ExactSolver;
use super::types::{SweepOutcome, SweepStop};
use crate::eval::{Evaluator, Incumbent};
use tracing::info;

/// `UB / k`: no wave with `k` aisles can have a higher ratio.
///
/// Non-increasing in `k`.
pub fn aisle_count_bound(wave_ub: u64, k: usize) -> f64 {
    wave_ub as f64 / k.max(1) as f64
}

impl ExactSolver<'_> {
    /// Fixed-aisle-count for `k = from, from + 1, ...`.
    ///
    /// Stops the first time `UB / k` cannot beat the incumbent, when the
    /// budget runs out, after `max_non_improving` consecutive calls without
    /// an improvement, or after the last aisle.
    pub fn sweep_aisle_count(
        &mut self,
        from: usize,
        max_non_improving: usize,
        evaluator: &Evaluator<'_>,
        incumbent: &mut Incumbent,
    ) -> SweepOutcome {
        let wave_ub = self.catalog().wave_ub();
        let mut outcome = SweepOutcome::new();

        for k in from.max(1)..=self.catalog().n_aisles() {
            if !incumbent.admits(aisle_count_bound(wave_ub, k), k) {
                return outcome.stopped(SweepStop::Bound);
            }
            if let Some(stop) = self.interrupt(&outcome, max_non_improving) {
                return outcome.stopped(stop);
            }

            let improved = self.fixed_aisle_count(k).fold_into(evaluator, incumbent);
            outcome.record(improved);
            if improved {
                info!(k, ratio = incumbent.ratio(), "aisle-count sweep improved incumbent");
            }
        }

        outcome.stopped(SweepStop::Completed)
    }

    /// Fixed-wave-size for `k = min(UB, capacity)` down to `LB`.
    ///
    /// A wave of `k` units has ratio at most `k` (one aisle), so the sweep
    /// stops as soon as `k` cannot beat the incumbent. The budget and
    /// `max_non_improving` end it as in [`sweep_aisle_count`](Self::sweep_aisle_count).
    pub fn sweep_wave_size(
        &mut self,
        max_non_improving: usize,
        evaluator: &Evaluator<'_>,
        incumbent: &mut Incumbent,
    ) -> SweepOutcome {
        let catalog = self.catalog();
        let top = catalog.wave_ub().min(catalog.total_capacity());
        let bottom = catalog.wave_lb().max(1);
        let mut outcome = SweepOutcome::new();

        for k in (bottom..=top).rev() {
            if !incumbent.admits(k as f64, 1) {
                return outcome.stopped(SweepStop::Bound);
            }
            if let Some(stop) = self.interrupt(&outcome, max_non_improving) {
                return outcome.stopped(stop);
            }

            let improved = self.fixed_wave_size(k).fold_into(evaluator, incumbent);
            outcome.record(improved);
            if improved {
                info!(k, ratio = incumbent.ratio(), "wave-size sweep improved incumbent");
            }
        }

        outcome.stopped(SweepStop::Completed)
    }

    fn interrupt(&self, outcome: &SweepOutcome, max_non_improving: usize) -> Option<SweepStop> {
        if self.budget().is_exhausted() {
            Some(SweepStop::TimeExhausted)
        } else if outcome.non_improving >= max_non_improving {
            Some(SweepStop::NonImproving)
        } else {
            None
        }
    }
}
