//! Exact subproblem solvers.
//!
//! Each subproblem fixes one parameter of the fractional wave problem
//! (aisle count, wave size, an aisle subset, an order subset) so that the
//! remainder is a plain 0/1 linear model for an [`Oracle`](crate::mip::Oracle).
//! Results are normalized to the `units / aisles` ratio and returned as a
//! [`PartialResult`].
//!
//! | Subproblem | Native objective | Normalization |
//! |---|---|---|
//! | [`fixed_aisle_count`](ExactSolver::fixed_aisle_count) | max units | `/ k` |
//! | [`fixed_wave_size`](ExactSolver::fixed_wave_size) | min aisles | `k /` |
//! | [`minimum_feasible_aisles`](ExactSolver::minimum_feasible_aisles) | min aisles | `units /` |
//! | [`fixed_aisle_subset`](ExactSolver::fixed_aisle_subset) | max units | `/ |S|` |
//! | [`fixed_aisle_subset_with_orders`](ExactSolver::fixed_aisle_subset_with_orders) | max units + pinned | `/ |S|` |
//! | [`fixed_order_subset`](ExactSolver::fixed_order_subset) | min aisles | `wave /` |

mod solver;
mod sweep;
mod types;

pub use solver::ExactSolver;
pub use sweep::aisle_count_bound;
pub use types::{OracleStats, PartialResult, Subproblem, SweepOutcome, SweepStop};
