//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that uses memory structures
//! (the tabu list) to forbid recently visited states, preventing cycling
//! and encouraging exploration of new regions of the search space.
//!
//! [`AisleSwapProblem`] applies it to fixed-size aisle subsets scored by
//! super-aisle aggregation.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod aisle_swap;
mod config;
mod runner;
mod types;

pub use aisle_swap::AisleSwapProblem;
pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner, TabuStop};
pub use types::TabuProblem;
