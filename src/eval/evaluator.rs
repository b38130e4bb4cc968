//! Feasibility check and ratio objective.

use super::candidate::Candidate;
use crate::catalog::Catalog;
use thiserror::Error;

/// First violated condition of an infeasible candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("no orders selected")]
    NoOrders,
    #[error("no aisles selected")]
    NoAisles,
    #[error("unknown order {0}")]
    UnknownOrder(usize),
    #[error("unknown aisle {0}")]
    UnknownAisle(usize),
    #[error("wave of {units} units is below the lower bound {lb}")]
    WaveBelow { units: u64, lb: u64 },
    #[error("wave of {units} units is above the upper bound {ub}")]
    WaveAbove { units: u64, ub: u64 },
    #[error("item {item}: demand {demand} exceeds supply {supply}")]
    Shortage { item: usize, demand: u64, supply: u64 },
}

/// Verdict of the [`Evaluator`].
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Feasible {
        /// Total units picked.
        units: u64,
        /// Number of aisles visited.
        aisles: usize,
        /// `units / aisles`.
        ratio: f64,
    },
    Infeasible(Violation),
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Evaluation::Feasible { .. })
    }

    /// The ratio objective, if feasible.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Evaluation::Feasible { ratio, .. } => Some(*ratio),
            Evaluation::Infeasible(_) => None,
        }
    }
}

/// Sole source of truth for candidate acceptance.
///
/// # Examples
///
/// ```
/// use u_wave::catalog::Catalog;
/// use u_wave::eval::{Candidate, Evaluator};
///
/// let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 5)]], 1, 10).unwrap();
/// let eval = Evaluator::new(&catalog).evaluate(&Candidate::new(vec![0], vec![0]));
/// assert_eq!(eval.ratio(), Some(3.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    catalog: &'a Catalog,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn evaluate(&self, candidate: &Candidate) -> Evaluation {
        match self.check(candidate) {
            Ok(units) => {
                let aisles = candidate.aisles().len();
                Evaluation::Feasible {
                    units,
                    aisles,
                    ratio: units as f64 / aisles as f64,
                }
            }
            Err(violation) => Evaluation::Infeasible(violation),
        }
    }

    fn check(&self, candidate: &Candidate) -> Result<u64, Violation> {
        let catalog = self.catalog;
        if candidate.orders().is_empty() {
            return Err(Violation::NoOrders);
        }
        if candidate.aisles().is_empty() {
            return Err(Violation::NoAisles);
        }
        if let Some(&o) = candidate.orders().iter().find(|&&o| o >= catalog.n_orders()) {
            return Err(Violation::UnknownOrder(o));
        }
        if let Some(&a) = candidate.aisles().iter().find(|&&a| a >= catalog.n_aisles()) {
            return Err(Violation::UnknownAisle(a));
        }

        let units = catalog.units_of(candidate.orders());
        if units < catalog.wave_lb() {
            return Err(Violation::WaveBelow {
                units,
                lb: catalog.wave_lb(),
            });
        }
        if units > catalog.wave_ub() {
            return Err(Violation::WaveAbove {
                units,
                ub: catalog.wave_ub(),
            });
        }

        let mut demand = vec![0u64; catalog.n_items()];
        let mut supply = vec![0u64; catalog.n_items()];
        for &o in candidate.orders() {
            for &(item, qty) in &catalog.orders()[o].items {
                demand[item] += qty as u64;
            }
        }
        for &a in candidate.aisles() {
            for &(item, qty) in &catalog.aisles()[a].items {
                supply[item] += qty as u64;
            }
        }
        if let Some(item) = (0..demand.len()).find(|&i| demand[i] > supply[i]) {
            return Err(Violation::Shortage {
                item,
                demand: demand[item],
                supply: supply[item],
            });
        }

        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SyntheticConfig, SyntheticGenerator};
    use proptest::prelude::*;

    fn two_by_two() -> Catalog {
        Catalog::new(1, vec![vec![(0, 5)], vec![(0, 5)]], vec![vec![(0, 5)], vec![(0, 5)]], 5, 10)
            .unwrap()
    }

    #[test]
    fn test_single_order_single_aisle() {
        let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 5)]], 1, 10).unwrap();
        let eval = Evaluator::new(&catalog).evaluate(&Candidate::new(vec![0], vec![0]));
        assert_eq!(
            eval,
            Evaluation::Feasible {
                units: 3,
                aisles: 1,
                ratio: 3.0
            }
        );
    }

    #[test]
    fn test_empty_selections() {
        let catalog = two_by_two();
        let eval = Evaluator::new(&catalog);
        assert_eq!(
            eval.evaluate(&Candidate::new(vec![], vec![0])),
            Evaluation::Infeasible(Violation::NoOrders)
        );
        assert_eq!(
            eval.evaluate(&Candidate::new(vec![0], vec![])),
            Evaluation::Infeasible(Violation::NoAisles)
        );
    }

    #[test]
    fn test_shortage() {
        let catalog = two_by_two();
        let eval = Evaluator::new(&catalog).evaluate(&Candidate::new(vec![0, 1], vec![0]));
        assert_eq!(
            eval,
            Evaluation::Infeasible(Violation::Shortage {
                item: 0,
                demand: 10,
                supply: 5
            })
        );
    }

    #[test]
    fn test_wave_bounds() {
        let catalog =
            Catalog::new(1, vec![vec![(0, 2)], vec![(0, 9)]], vec![vec![(0, 20)]], 3, 8).unwrap();
        let eval = Evaluator::new(&catalog);
        assert_eq!(
            eval.evaluate(&Candidate::new(vec![0], vec![0])),
            Evaluation::Infeasible(Violation::WaveBelow { units: 2, lb: 3 })
        );
        assert_eq!(
            eval.evaluate(&Candidate::new(vec![1], vec![0])),
            Evaluation::Infeasible(Violation::WaveAbove { units: 9, ub: 8 })
        );
    }

    #[test]
    fn test_unknown_ids() {
        let catalog = two_by_two();
        let eval = Evaluator::new(&catalog);
        assert_eq!(
            eval.evaluate(&Candidate::new(vec![7], vec![0])),
            Evaluation::Infeasible(Violation::UnknownOrder(7))
        );
        assert_eq!(
            eval.evaluate(&Candidate::new(vec![0], vec![9])),
            Evaluation::Infeasible(Violation::UnknownAisle(9))
        );
    }

    proptest! {
        #[test]
        fn prop_reevaluation_is_idempotent(
            seed in 0u64..500,
            order_mask in proptest::collection::vec(any::<bool>(), 20),
            aisle_mask in proptest::collection::vec(any::<bool>(), 8),
        ) {
            let config = SyntheticConfig {
                n_items: 10,
                n_orders: 20,
                n_aisles: 8,
                ..SyntheticConfig::default()
            };
            let catalog = SyntheticGenerator::with_seed(seed).generate(&config);
            let orders: Vec<usize> = (0..20).filter(|&i| order_mask[i]).collect();
            let aisles: Vec<usize> = (0..8).filter(|&i| aisle_mask[i]).collect();
            let candidate = Candidate::new(orders, aisles);
            let evaluator = Evaluator::new(&catalog);
            let first = evaluator.evaluate(&candidate);
            let second = evaluator.evaluate(&candidate.clone());
            prop_assert_eq!(first, second);
        }
    }
}
