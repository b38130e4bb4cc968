//! Sweep strategies and run phases.

use crate::catalog::Catalog;
use std::fmt;

/// How the sweep-refine phase turns aisle counts into exact subproblems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepStrategy {
    /// Fixed-aisle-count `k` for each candidate `k`, by decreasing
    /// estimate.
    AisleCount,
    /// Fixed-aisle-subset on the top-`k` capacity aisles, pre-filled with
    /// single-aisle matched orders, by decreasing estimate.
    AisleSubset,
    /// Fixed-aisle-count for `k = 1, 2, ...` until `UB / k` cannot win.
    AscendingAisleCount,
    /// Fixed-wave-size for `k = UB` down to `LB` until `k` cannot win.
    DescendingWaveSize,
}

impl SweepStrategy {
    /// `AisleCount` when orders average more than `multi_item_threshold`
    /// distinct items, `AisleSubset` otherwise.
    pub fn select(catalog: &Catalog, multi_item_threshold: f64) -> Self {
        if catalog.mean_order_items() > multi_item_threshold {
            SweepStrategy::AisleCount
        } else {
            SweepStrategy::AisleSubset
        }
    }
}

impl fmt::Display for SweepStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SweepStrategy::AisleCount => "aisle-count",
            SweepStrategy::AisleSubset => "aisle-subset",
            SweepStrategy::AscendingAisleCount => "ascending-aisle-count",
            SweepStrategy::DescendingWaveSize => "descending-wave-size",
        };
        f.write_str(name)
    }
}

/// Orchestrator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Capacity-ranked greedy sweep.
    Seed,
    /// Minimum-feasible-aisles solve on small instances.
    Exactify,
    /// Exact subproblems over candidate aisle counts.
    SweepRefine,
    /// Tabu search at the incumbent's aisle count.
    LocalSearch,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Seed => "seed",
            Phase::Exactify => "exactify",
            Phase::SweepRefine => "sweep-refine",
            Phase::LocalSearch => "local-search",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_items_per_order() {
        let single = Catalog::new(
            2,
            vec![vec![(0, 1)], vec![(1, 1)]],
            vec![vec![(0, 1), (1, 1)]],
            1,
            2,
        )
        .unwrap();
        assert_eq!(SweepStrategy::select(&single, 1.1), SweepStrategy::AisleSubset);

        let multi = Catalog::new(
            2,
            vec![vec![(0, 1), (1, 1)], vec![(1, 1)]],
            vec![vec![(0, 1), (1, 1)]],
            1,
            2,
        )
        .unwrap();
        // 1.5 items per order
        assert_eq!(SweepStrategy::select(&multi, 1.1), SweepStrategy::AisleCount);
        assert_eq!(SweepStrategy::select(&multi, 2.0), SweepStrategy::AisleSubset);
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::SweepRefine.to_string(), "sweep-refine");
        assert_eq!(SweepStrategy::AisleSubset.to_string(), "aisle-subset");
    }
}
