//! Greedy constructors.
//!
//! Fast, oracle-free incumbents:
//!
//! - [`capacity_ranking`] / [`CapacityProfile`]: aisles by descending
//!   capacity and the top-`k` cumulative capacity `C_k`
//! - [`SuperAisleAggregator`]: packs orders against the pooled stock of an
//!   aisle subset
//! - [`SingleAisleMatcher`]: takes only orders a single aisle can serve
//! - [`seed_sweep`]: aggregation over the top-`k` aisles for every `k`
//!
//! Every result is a plain order list; callers validate it with the
//! [`Evaluator`](crate::eval::Evaluator) before comparing it to the incumbent.

mod aggregation;
mod ranking;
mod seed;

pub use aggregation::{single_aisle_matching, Aggregation, SingleAisleMatcher, SuperAisleAggregator};
pub use ranking::{capacity_ranking, CapacityProfile};
pub use seed::{seed_sweep, SeedOutcome};
