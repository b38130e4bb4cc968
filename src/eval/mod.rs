//! Candidate evaluation.
//!
//! - [`Candidate`]: a selection of orders and aisles
//! - [`Evaluator`]: feasibility check and `units / aisles` objective
//! - [`Incumbent`]: running best with the tie-break rule
//! - [`StockArena`]: explicit scratch stock for greedy evaluations

mod arena;
mod candidate;
mod evaluator;
mod incumbent;

pub use arena::StockArena;
pub use candidate::Candidate;
pub use evaluator::{Evaluation, Evaluator, Violation};
pub use incumbent::{Incumbent, Scored, RATIO_EPSILON};
