//! Subproblem descriptors, call outcomes and call statistics.

use crate::eval::{Candidate, Evaluator, Incumbent};
use std::fmt;

/// One parametric subproblem, used for logging and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subproblem {
    /// Exactly `k` aisles, maximize units.
    FixedAisleCount(usize),
    /// Wave of exactly `k` units, minimize aisles.
    FixedWaveSize(u64),
    /// Wave in `[LB, UB]`, minimize aisles.
    MinimumFeasibleAisles,
    /// Given aisle set, maximize units.
    FixedAisleSubset { aisles: usize },
    /// Given aisle set plus pinned orders, maximize units.
    FixedAisleSubsetWithOrders { aisles: usize, pinned: usize },
    /// Given order set, minimize aisles.
    FixedOrderSubset { orders: usize },
}

impl fmt::Display for Subproblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subproblem::FixedAisleCount(k) => write!(f, "fixed-aisle-count({k})"),
            Subproblem::FixedWaveSize(k) => write!(f, "fixed-wave-size({k})"),
            Subproblem::MinimumFeasibleAisles => write!(f, "minimum-feasible-aisles"),
            Subproblem::FixedAisleSubset { aisles } => {
                write!(f, "fixed-aisle-subset(|S|={aisles})")
            }
            Subproblem::FixedAisleSubsetWithOrders { aisles, pinned } => {
                write!(f, "fixed-aisle-subset(|S|={aisles}, pinned={pinned})")
            }
            Subproblem::FixedOrderSubset { orders } => {
                write!(f, "fixed-order-subset(|O|={orders})")
            }
        }
    }
}

/// Outcome of one subproblem call.
///
/// Only `Optimal` carries a candidate; every other variant means "no
/// candidate" and is never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialResult {
    /// Proven optimum, with its ratio-normalized objective.
    Optimal { candidate: Candidate, value: f64 },
    /// The subproblem has no feasible assignment.
    Infeasible,
    /// The time limit was reached, or no time was left to start.
    TimedOut,
    /// The oracle could not run.
    Unavailable,
}

impl PartialResult {
    pub fn is_optimal(&self) -> bool {
        matches!(self, PartialResult::Optimal { .. })
    }

    /// Normalized value, if optimal.
    pub fn value(&self) -> Option<f64> {
        match self {
            PartialResult::Optimal { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            PartialResult::Optimal { candidate, .. } => Some(candidate),
            _ => None,
        }
    }

    /// Validates the candidate and offers it to `incumbent`.
    ///
    /// Returns `true` if the incumbent changed. The result is consumed.
    pub fn fold_into(self, evaluator: &Evaluator<'_>, incumbent: &mut Incumbent) -> bool {
        match self {
            PartialResult::Optimal { candidate, .. } => incumbent.offer(evaluator, candidate),
            _ => false,
        }
    }
}

/// Oracle call counts by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OracleStats {
    pub optimal: usize,
    pub infeasible: usize,
    pub timed_out: usize,
    pub unavailable: usize,
}

impl OracleStats {
    pub(crate) fn record(&mut self, result: &PartialResult) {
        match result {
            PartialResult::Optimal { .. } => self.optimal += 1,
            PartialResult::Infeasible => self.infeasible += 1,
            PartialResult::TimedOut => self.timed_out += 1,
            PartialResult::Unavailable => self.unavailable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.optimal + self.infeasible + self.timed_out + self.unavailable
    }
}

/// Why a sweep ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStop {
    /// The bound for the next step could not beat the incumbent.
    Bound,
    /// No time left.
    TimeExhausted,
    /// Too many consecutive steps left the incumbent unchanged.
    NonImproving,
    /// Every step was visited.
    Completed,
}

/// Summary of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Subproblem calls made.
    pub steps: usize,
    /// Calls whose candidate replaced the incumbent.
    pub improvements: usize,
    /// Consecutive calls since the last improvement.
    pub non_improving: usize,
    pub stop: SweepStop,
}

impl SweepOutcome {
    pub(crate) fn new() -> Self {
        Self {
            steps: 0,
            improvements: 0,
            non_improving: 0,
            stop: SweepStop::Completed,
        }
    }

    pub(crate) fn record(&mut self, improved: bool) {
        self.steps += 1;
        if improved {
            self.improvements += 1;
            self.non_improving = 0;
        } else {
            self.non_improving += 1;
        }
    }

    pub(crate) fn stopped(mut self, stop: SweepStop) -> Self {
        self.stop = stop;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_display() {
        assert_eq!(Subproblem::FixedAisleCount(3).to_string(), "fixed-aisle-count(3)");
        assert_eq!(
            Subproblem::FixedAisleSubsetWithOrders { aisles: 2, pinned: 5 }.to_string(),
            "fixed-aisle-subset(|S|=2, pinned=5)"
        );
    }

    #[test]
    fn test_fold_validates() {
        let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 2)]], 1, 10).unwrap();
        let evaluator = Evaluator::new(&catalog);
        let mut incumbent = Incumbent::new();

        // short on item 0: rejected by the evaluator even though "optimal"
        let bogus = PartialResult::Optimal {
            candidate: Candidate::new(vec![0], vec![0]),
            value: 3.0,
        };
        assert!(!bogus.fold_into(&evaluator, &mut incumbent));
        assert!(incumbent.best().is_none());

        assert!(!PartialResult::TimedOut.fold_into(&evaluator, &mut incumbent));
    }

    #[test]
    fn test_stats_record() {
        let mut stats = OracleStats::default();
        stats.record(&PartialResult::Infeasible);
        stats.record(&PartialResult::TimedOut);
        stats.record(&PartialResult::TimedOut);
        assert_eq!(stats.timed_out, 2);
        assert_eq!(stats.total(), 3);
    }
}
