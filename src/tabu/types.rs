//! Core trait for Tabu Search problems.

use rand::Rng;
use std::hash::Hash;

/// Defines a maximization problem for Tabu Search.
///
/// Users implement this trait to specify:
/// - The starting solution
/// - How a solution is keyed in the tabu list
/// - How to score a solution (higher is better)
/// - How to sample the neighborhood of a solution
///
/// Neighbors are generated unscored; the runner scores only the ones it
/// admits, so tabu neighbors never pay for an evaluation. Methods take
/// `&mut self` so problems can keep scratch state (e.g. a stock arena)
/// between evaluations.
pub trait TabuProblem {
    /// The solution type.
    type Solution: Clone;
    /// Tabu list key. Solutions with equal keys are the same state.
    type Key: Clone + Eq + Hash;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&mut self, rng: &mut R) -> Self::Solution;

    /// Key of a solution.
    fn key(&self, solution: &Self::Solution) -> Self::Key;

    /// Scores a solution (higher is better).
    fn score(&mut self, solution: &Self::Solution) -> f64;

    /// Samples up to `count` neighbors of `solution`.
    ///
    /// The neighborhood need not be exhaustive, and may contain duplicates.
    fn neighbors<R: Rng>(
        &mut self,
        solution: &Self::Solution,
        count: usize,
        rng: &mut R,
    ) -> Vec<Self::Solution>;
}
