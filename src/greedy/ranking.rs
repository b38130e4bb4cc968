//! Capacity-ranked aisle ordering.

use crate::catalog::Catalog;

/// Aisle ids by descending capacity, lower id first on ties.
pub fn capacity_ranking(catalog: &Catalog) -> Vec<usize> {
    let mut ranking: Vec<usize> = (0..catalog.n_aisles()).collect();
    let aisles = catalog.aisles();
    ranking.sort_by(|&a, &b| {
        aisles[b]
            .capacity
            .cmp(&aisles[a].capacity)
            .then(a.cmp(&b))
    });
    ranking
}

/// Capacity ranking with its prefix sums.
///
/// `cumulative(k)` is `C_k`, the capacity of the `k` largest aisles. No
/// `k`-aisle wave can hold more than `min(UB, C_k)` units, which gives the
/// ratio estimate used to order the sweep.
#[derive(Debug, Clone)]
pub struct CapacityProfile {
    ranking: Vec<usize>,
    cumulative: Vec<u64>,
    wave_lb: u64,
    wave_ub: u64,
}

impl CapacityProfile {
    pub fn new(catalog: &Catalog) -> Self {
        let ranking = capacity_ranking(catalog);
        let cumulative = ranking
            .iter()
            .scan(0u64, |sum, &a| {
                *sum += catalog.aisles()[a].capacity;
                Some(*sum)
            })
            .collect();
        Self {
            ranking,
            cumulative,
            wave_lb: catalog.wave_lb(),
            wave_ub: catalog.wave_ub(),
        }
    }

    pub fn ranking(&self) -> &[usize] {
        &self.ranking
    }

    /// The `k` largest aisles.
    pub fn top(&self, k: usize) -> &[usize] {
        &self.ranking[..k.min(self.ranking.len())]
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// `C_k`; zero for `k == 0`.
    pub fn cumulative(&self, k: usize) -> u64 {
        match k {
            0 => 0,
            k => self.cumulative[k.min(self.cumulative.len()) - 1],
        }
    }

    /// Whether `k` aisles can possibly hold a wave of `LB` units.
    pub fn reaches_lb(&self, k: usize) -> bool {
        k > 0 && k <= self.len() && self.cumulative(k) >= self.wave_lb
    }

    /// `min(UB, C_k) / k`, an upper bound on any `k`-aisle ratio.
    pub fn estimate(&self, k: usize) -> f64 {
        if k == 0 {
            return 0.0;
        }
        self.cumulative(k).min(self.wave_ub) as f64 / k as f64
    }

    /// Aisle counts that can reach `LB` and are at least `min_k`, by
    /// decreasing estimate (smaller `k` first on ties).
    pub fn candidates(&self, min_k: usize) -> Vec<usize> {
        let mut ks: Vec<usize> = (min_k.max(1)..=self.len())
            .filter(|&k| self.reaches_lb(k))
            .collect();
        ks.sort_by(|&a, &b| self.estimate(b).total_cmp(&self.estimate(a)).then(a.cmp(&b)));
        ks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        // capacities: a0 = 2, a1 = 5, a2 = 5, a3 = 1
        Catalog::new(
            1,
            vec![vec![(0, 1)]],
            vec![vec![(0, 2)], vec![(0, 5)], vec![(0, 5)], vec![(0, 1)]],
            6,
            8,
        )
        .unwrap()
    }

    #[test]
    fn test_ranking_ties_by_id() {
        assert_eq!(capacity_ranking(&catalog()), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_cumulative_and_estimate() {
        let profile = CapacityProfile::new(&catalog());
        assert_eq!(profile.cumulative(0), 0);
        assert_eq!(profile.cumulative(1), 5);
        assert_eq!(profile.cumulative(3), 12);
        assert_eq!(profile.top(2), &[1, 2]);
        // C_1 = 5 < LB
        assert!(!profile.reaches_lb(1));
        assert!(profile.reaches_lb(2));
        // min(8, 10) / 2
        assert_eq!(profile.estimate(2), 4.0);
        assert_eq!(profile.estimate(4), 2.0);
    }

    #[test]
    fn test_candidates_by_estimate() {
        let profile = CapacityProfile::new(&catalog());
        // k=2: 4.0, k=3: 8/3, k=4: 2.0; k=1 cannot reach LB
        assert_eq!(profile.candidates(1), vec![2, 3, 4]);
        assert_eq!(profile.candidates(3), vec![3, 4]);
    }
}
