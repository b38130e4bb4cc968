//! Synthetic instance generator for benchmarks and stress tests.

use super::instance::Catalog;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape parameters for a synthetic instance.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub n_items: usize,
    pub n_orders: usize,
    pub n_aisles: usize,
    /// Maximum distinct items per order (at least 1).
    pub max_order_items: usize,
    /// Maximum distinct items per aisle (at least 1).
    pub max_aisle_items: usize,
    /// Maximum quantity of a single order line.
    pub max_order_qty: u32,
    /// Maximum quantity of a single aisle slot.
    pub max_aisle_qty: u32,
    /// LB as a fraction of total order units.
    pub lb_fraction: f64,
    /// UB as a fraction of total order units.
    pub ub_fraction: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            n_items: 50,
            n_orders: 100,
            n_aisles: 30,
            max_order_items: 3,
            max_aisle_items: 10,
            max_order_qty: 3,
            max_aisle_qty: 20,
            lb_fraction: 0.05,
            ub_fraction: 0.25,
        }
    }
}

/// Generator for synthetic wave instances.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    /// Creates a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a catalog with the given shape.
    pub fn generate(&mut self, config: &SyntheticConfig) -> Catalog {
        let n_items = config.n_items.max(1);
        let orders: Vec<Vec<(usize, u32)>> = (0..config.n_orders)
            .map(|_| {
                self.vector(
                    n_items,
                    config.max_order_items,
                    config.max_order_qty.max(1),
                )
            })
            .collect();
        let aisles: Vec<Vec<(usize, u32)>> = (0..config.n_aisles)
            .map(|_| {
                self.vector(
                    n_items,
                    config.max_aisle_items,
                    config.max_aisle_qty.max(1),
                )
            })
            .collect();

        let total: u64 = orders
            .iter()
            .flat_map(|o| o.iter().map(|&(_, q)| q as u64))
            .sum();
        let lb = ((total as f64) * config.lb_fraction).floor() as u64;
        let ub = (((total as f64) * config.ub_fraction).ceil() as u64).max(lb);

        match Catalog::new(n_items, orders, aisles, lb, ub) {
            Ok(catalog) => catalog,
            // vectors are deduplicated and in range, bounds are ordered
            Err(e) => unreachable!("synthetic catalog is well formed: {e}"),
        }
    }

    fn vector(&mut self, n_items: usize, max_len: usize, max_qty: u32) -> Vec<(usize, u32)> {
        let len = self.rng.random_range(1..=max_len.clamp(1, n_items));
        let mut ids: Vec<usize> = (0..len)
            .map(|_| self.rng.random_range(0..n_items))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter()
            .map(|id| (id, self.rng.random_range(1..=max_qty)))
            .collect()
    }
}
