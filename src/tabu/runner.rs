//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the initial solution and make it tabu
//! 2. At each iteration:
//!    a. Sample the neighborhood
//!    b. Skip neighbors whose key is tabu (unless aspiration admits them)
//!    c. Score the rest and adopt the best one, even if it is worse
//!    d. Push its key into the tabu list, evicting the oldest beyond tenure
//!    e. Update the global best if improved
//! 3. Terminate on the iteration cap, stagnation, or an exhausted budget
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use super::config::TabuConfig;
use super::types::TabuProblem;
use crate::budget::TimeBudget;

/// Why a Tabu Search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabuStop {
    MaxIterations,
    Stagnation,
    TimeExhausted,
    /// The problem produced no neighbors.
    NoNeighbors,
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<S: Clone, K: Clone> {
    /// Best solution found.
    pub best: S,
    /// Score of the best solution.
    pub best_score: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found.
    pub best_iteration: usize,
    /// Number of `score` calls.
    pub evaluations: usize,
    /// Best score at the end of each iteration.
    pub score_history: Vec<f64>,
    /// Keys of the adopted states, starting with the initial one.
    pub trajectory: Vec<K>,
    pub stop: TabuStop,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given problem without a time limit.
    pub fn run<P: TabuProblem>(
        problem: &mut P,
        config: &TabuConfig,
    ) -> TabuResult<P::Solution, P::Key> {
        Self::run_inner(problem, config, None)
    }

    /// Executes Tabu Search, stopping when `budget` is exhausted.
    pub fn run_with_budget<P: TabuProblem>(
        problem: &mut P,
        config: &TabuConfig,
        budget: &TimeBudget,
    ) -> TabuResult<P::Solution, P::Key> {
        Self::run_inner(problem, config, Some(budget))
    }

    fn run_inner<P: TabuProblem>(
        problem: &mut P,
        config: &TabuConfig,
        budget: Option<&TimeBudget>,
    ) -> TabuResult<P::Solution, P::Key> {
        let mut rng = u_numflow::random::create_rng(config.seed.unwrap_or(42));
        let out_of_time = || budget.is_some_and(|b| b.is_exhausted());

        let mut current = problem.initial_solution(&mut rng);
        let mut best = current.clone();
        let mut best_score = problem.score(&current);
        let mut best_iteration = 0;
        let mut evaluations = 1;

        // FIFO queue of keys with a set for O(1) lookup
        let mut tabu_queue: VecDeque<P::Key> = VecDeque::new();
        let mut tabu_set: HashSet<P::Key> = HashSet::new();
        let start_key = problem.key(&current);
        tabu_queue.push_back(start_key.clone());
        tabu_set.insert(start_key.clone());

        let mut trajectory = vec![start_key];
        let mut score_history = Vec::with_capacity(config.max_iterations);
        let mut no_improve_count = 0;
        let mut stop = TabuStop::MaxIterations;

        for iteration in 0..config.max_iterations {
            if out_of_time() {
                stop = TabuStop::TimeExhausted;
                break;
            }

            let neighbors = problem.neighbors(&current, config.neighborhood_size, &mut rng);
            if neighbors.is_empty() {
                stop = TabuStop::NoNeighbors;
                break;
            }

            // best admissible neighbor: (solution, key, score)
            let mut chosen: Option<(P::Solution, P::Key, f64)> = None;
            let mut seen: HashSet<P::Key> = HashSet::with_capacity(neighbors.len());
            for neighbor in neighbors {
                let key = problem.key(&neighbor);
                if !seen.insert(key.clone()) {
                    continue;
                }
                let is_tabu = tabu_set.contains(&key);
                if is_tabu && !config.aspiration {
                    continue;
                }
                if out_of_time() {
                    break;
                }

                let score = problem.score(&neighbor);
                evaluations += 1;
                if is_tabu && score <= best_score {
                    continue;
                }
                if chosen.as_ref().is_none_or(|(_, _, s)| score > *s) {
                    chosen = Some((neighbor, key, score));
                }
            }

            match chosen {
                Some((solution, key, score)) => {
                    tabu_queue.push_back(key.clone());
                    tabu_set.insert(key.clone());
                    while tabu_queue.len() > config.tabu_tenure {
                        if let Some(old_key) = tabu_queue.pop_front() {
                            tabu_set.remove(&old_key);
                        }
                    }
                    trajectory.push(key);
                    current = solution;

                    if score > best_score {
                        best = current.clone();
                        best_score = score;
                        best_iteration = iteration;
                        no_improve_count = 0;
                    } else {
                        no_improve_count += 1;
                    }
                    trace!(iteration, score, best_score, "tabu move");
                }
                None => {
                    no_improve_count += 1;
                    trace!(iteration, "no admissible neighbor");
                }
            }

            score_history.push(best_score);

            if no_improve_count >= config.max_no_improve {
                stop = TabuStop::Stagnation;
                break;
            }
        }

        TabuResult {
            best,
            best_score,
            iterations: score_history.len(),
            best_iteration,
            evaluations,
            score_history,
            trajectory,
            stop,
        }
    }
}
