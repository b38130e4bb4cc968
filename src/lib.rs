//! Warehouse wave order selection.
//!
//! Chooses a subset of orders and a subset of aisles so that the picked
//! units lie in `[LB, UB]`, every item's demand is covered by the visited
//! aisles, and `units / aisles` is maximized, all under a fixed wall-clock
//! budget.
//!
//! - **Catalog** ([`catalog`]): items, orders, aisles and the wave bounds
//! - **Evaluation** ([`eval`]): feasibility check, ratio, tie-break rule
//! - **Modeling** ([`mip`], [`builder`]): 0/1 linear models and the
//!   [`Oracle`](mip::Oracle) interface to an exact solver
//! - **Exact subproblems** ([`exact`]): parametric decompositions of the
//!   fractional objective, with bounded sweeps
//! - **Greedy constructors** ([`greedy`]): capacity ranking, super-aisle
//!   aggregation, single-aisle matching
//! - **Tabu Search** ([`tabu`]): swap search over fixed-size aisle subsets
//! - **Orchestration** ([`orchestrator`]): phases under one [`TimeBudget`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use u_wave::budget::TimeBudget;
//! use u_wave::catalog::Catalog;
//! use u_wave::mip::EnumerationOracle;
//!
//! let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 5)]], 1, 10).unwrap();
//! let best = u_wave::solve(&catalog, &EnumerationOracle::new(), TimeBudget::new(Duration::from_secs(5)));
//! let best = best.unwrap();
//! assert_eq!(best.orders(), &[0]);
//! assert_eq!(best.aisles(), &[0]);
//! ```

pub mod budget;
pub mod builder;
pub mod catalog;
pub mod eval;
pub mod exact;
pub mod greedy;
pub mod logging;
pub mod mip;
pub mod orchestrator;
pub mod tabu;

use budget::TimeBudget;
use catalog::Catalog;
use eval::Candidate;
use mip::Oracle;
use orchestrator::{WaveConfig, WaveRunner};

/// Solves with the default configuration against `budget`.
///
/// Returns `None` when no feasible wave was found.
pub fn solve(catalog: &Catalog, oracle: &dyn Oracle, budget: TimeBudget) -> Option<Candidate> {
    WaveRunner::run_with_budget(catalog, oracle, &WaveConfig::default(), budget)
        .ok()
        .and_then(|result| result.best)
}
