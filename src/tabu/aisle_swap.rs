//! Swap neighborhood over fixed-size aisle subsets.

use rand::Rng;

use super::types::TabuProblem;
use crate::eval::Candidate;
use crate::greedy::SuperAisleAggregator;

/// Tabu problem over aisle subsets of a fixed size `k`.
///
/// A neighbor swaps `swap_size` random in-subset aisles for as many random
/// out-of-subset aisles. Subsets are kept sorted, so a subset is its own
/// key. Scoring runs super-aisle aggregation (never an oracle): the score is
/// `units / k` when the packed wave reaches `LB`, `0.0` otherwise.
///
/// # Examples
///
/// ```
/// use u_wave::catalog::Catalog;
/// use u_wave::greedy::SuperAisleAggregator;
/// use u_wave::tabu::{AisleSwapProblem, TabuConfig, TabuRunner};
///
/// let catalog = Catalog::new(
///     1,
///     vec![vec![(0, 2)], vec![(0, 2)]],
///     vec![vec![(0, 1)], vec![(0, 4)], vec![(0, 1)]],
///     1,
///     10,
/// ).unwrap();
/// let mut problem = AisleSwapProblem::new(SuperAisleAggregator::new(&catalog), vec![0], 1);
/// let result = TabuRunner::run(&mut problem, &TabuConfig::default().with_max_iterations(10));
/// assert_eq!(result.best, vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct AisleSwapProblem<'a> {
    aggregator: SuperAisleAggregator<'a>,
    initial: Vec<usize>,
    swap_size: usize,
    n_aisles: usize,
    inside: Vec<bool>,
    outside: Vec<usize>,
}

impl<'a> AisleSwapProblem<'a> {
    /// Creates the problem around a starting subset.
    ///
    /// The subset is sorted and deduplicated; out-of-range ids are dropped.
    pub fn new(aggregator: SuperAisleAggregator<'a>, initial: Vec<usize>, swap_size: usize) -> Self {
        let n_aisles = aggregator.catalog().n_aisles();
        let mut initial = initial;
        initial.retain(|&a| a < n_aisles);
        initial.sort_unstable();
        initial.dedup();
        Self {
            aggregator,
            initial,
            swap_size: swap_size.max(1),
            n_aisles,
            inside: vec![false; n_aisles],
            outside: Vec::new(),
        }
    }

    /// Subset size `k`.
    pub fn subset_size(&self) -> usize {
        self.initial.len()
    }

    /// Re-packs `aisles` and returns the resulting candidate.
    pub fn candidate(&mut self, aisles: &[usize]) -> Candidate {
        self.aggregator.aggregate(aisles).into_candidate(aisles)
    }
}

impl TabuProblem for AisleSwapProblem<'_> {
    type Solution = Vec<usize>;
    type Key = Vec<usize>;

    fn initial_solution<R: Rng>(&mut self, _rng: &mut R) -> Vec<usize> {
        self.initial.clone()
    }

    fn key(&self, solution: &Vec<usize>) -> Vec<usize> {
        solution.clone()
    }

    fn score(&mut self, solution: &Vec<usize>) -> f64 {
        let wave_lb = self.aggregator.catalog().wave_lb();
        let packed = self.aggregator.aggregate(solution);
        if packed.orders.is_empty() || packed.units < wave_lb {
            return 0.0;
        }
        packed.ratio(solution.len())
    }

    fn neighbors<R: Rng>(
        &mut self,
        solution: &Vec<usize>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Vec<usize>> {
        for &a in solution {
            self.inside[a] = true;
        }
        self.outside.clear();
        self.outside
            .extend((0..self.n_aisles).filter(|&a| !self.inside[a]));
        for &a in solution {
            self.inside[a] = false;
        }

        let p = self.swap_size.min(solution.len()).min(self.outside.len());
        if p == 0 {
            return Vec::new();
        }

        let mut neighbors = Vec::with_capacity(count);
        for _ in 0..count {
            let removed = pick_distinct(rng, solution.len(), p);
            let added = pick_distinct(rng, self.outside.len(), p);

            let mut next: Vec<usize> = solution
                .iter()
                .enumerate()
                .filter(|(i, _)| !removed.contains(i))
                .map(|(_, &a)| a)
                .collect();
            next.extend(added.iter().map(|&i| self.outside[i]));
            next.sort_unstable();
            neighbors.push(next);
        }
        neighbors
    }
}

/// `amount` distinct indices in `0..len`; requires `amount <= len`.
fn pick_distinct<R: Rng>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    let mut picked = Vec::with_capacity(amount);
    while picked.len() < amount {
        let i = rng.random_range(0..len);
        if !picked.contains(&i) {
            picked.push(i);
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::tabu::{TabuConfig, TabuRunner};

    fn catalog() -> Catalog {
        // a3 and a4 together serve every order
        Catalog::new(
            2,
            vec![vec![(0, 3)], vec![(1, 3)], vec![(0, 1), (1, 1)]],
            vec![
                vec![(0, 1)],
                vec![(1, 1)],
                vec![(0, 1), (1, 1)],
                vec![(0, 4)],
                vec![(1, 4)],
            ],
            2,
            20,
        )
        .unwrap()
    }

    #[test]
    fn test_neighbors_keep_size_and_swap() {
        let catalog = catalog();
        let mut problem = AisleSwapProblem::new(SuperAisleAggregator::new(&catalog), vec![1, 0], 1);
        let mut rng = u_numflow::random::create_rng(42);
        let start = problem.initial_solution(&mut rng);
        assert_eq!(start, vec![0, 1]);

        for neighbor in problem.neighbors(&start, 20, &mut rng) {
            assert_eq!(neighbor.len(), 2);
            assert!(neighbor.windows(2).all(|w| w[0] < w[1]));
            let kept = neighbor.iter().filter(|a| start.contains(a)).count();
            assert_eq!(kept, 1);
        }
    }

    #[test]
    fn test_score_requires_lb() {
        let catalog = catalog();
        let mut problem = AisleSwapProblem::new(SuperAisleAggregator::new(&catalog), vec![0, 1], 1);
        // a0 + a1 only serve o2 (2 units) -> ratio 1
        assert_eq!(problem.score(&vec![0, 1]), 1.0);
        // a3 + a4 serve all 8 units
        assert_eq!(problem.score(&vec![3, 4]), 4.0);
        // a0 alone serves nothing
        assert_eq!(problem.score(&vec![0]), 0.0);
    }

    #[test]
    fn test_no_neighbors_when_subset_is_everything() {
        let catalog = catalog();
        let all = vec![0, 1, 2, 3, 4];
        let mut problem = AisleSwapProblem::new(SuperAisleAggregator::new(&catalog), all.clone(), 1);
        let mut rng = u_numflow::random::create_rng(1);
        assert!(problem.neighbors(&all, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_search_finds_best_pair() {
        let catalog = catalog();
        let mut problem = AisleSwapProblem::new(SuperAisleAggregator::new(&catalog), vec![0, 1], 1);
        let config = TabuConfig::default()
            .with_max_iterations(50)
            .with_tabu_tenure(3)
            .with_seed(42);

        let result = TabuRunner::run(&mut problem, &config);
        assert_eq!(result.best, vec![3, 4]);
        assert_eq!(result.best_score, 4.0);

        let candidate = problem.candidate(&result.best);
        assert_eq!(candidate.orders(), &[0, 1, 2]);
    }
}
