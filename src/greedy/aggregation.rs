//! Super-aisle aggregation and single-aisle order matching.

use crate::catalog::Catalog;
use crate::eval::{Candidate, StockArena};
use rand::Rng;

/// Orders picked by one greedy pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregation {
    /// Picked order ids, in pick order.
    pub orders: Vec<usize>,
    /// Total units of the picked orders.
    pub units: u64,
}

impl Aggregation {
    /// `units / aisles`, or `0.0` for no aisles.
    pub fn ratio(&self, aisles: usize) -> f64 {
        if aisles == 0 {
            0.0
        } else {
            self.units as f64 / aisles as f64
        }
    }

    pub fn into_candidate(self, aisles: &[usize]) -> Candidate {
        Candidate::new(self.orders, aisles.to_vec())
    }
}

/// Treats an aisle subset as one "super aisle" and greedily packs orders.
///
/// Stock starts at the subset's total supply. Items are walked in id order
/// (or shuffled); for each item, every unpicked order demanding it is taken
/// whole if all of its items are in stock. An item's scan stops as soon as
/// the next order would push the wave past `UB`. No backtracking.
///
/// The aggregator owns its [`StockArena`] and reuses it across calls.
///
/// # Examples
///
/// ```
/// use u_wave::catalog::Catalog;
/// use u_wave::greedy::SuperAisleAggregator;
///
/// let catalog = Catalog::new(
///     1,
///     vec![vec![(0, 3)], vec![(0, 3)]],
///     vec![vec![(0, 4)]],
///     1,
///     10,
/// ).unwrap();
/// let mut aggregator = SuperAisleAggregator::new(&catalog);
/// let picked = aggregator.aggregate(&[0]);
/// assert_eq!(picked.orders, vec![0]);
/// assert_eq!(picked.units, 3);
/// ```
#[derive(Debug, Clone)]
pub struct SuperAisleAggregator<'a> {
    catalog: &'a Catalog,
    arena: StockArena,
    items: Vec<usize>,
}

impl<'a> SuperAisleAggregator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            arena: StockArena::new(catalog),
            items: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Aggregates with items in id order.
    pub fn aggregate(&mut self, aisles: &[usize]) -> Aggregation {
        self.load(aisles);
        self.items.sort_unstable();
        self.pack()
    }

    /// Aggregates with items in a random order.
    pub fn aggregate_shuffled<R: Rng>(&mut self, aisles: &[usize], rng: &mut R) -> Aggregation {
        self.load(aisles);
        self.items.sort_unstable();
        u_numflow::random::shuffle(&mut self.items, rng);
        self.pack()
    }

    /// Current stock of `item` after the last aggregation.
    pub fn stock(&self, item: usize) -> u64 {
        self.arena.stock(item)
    }

    fn load(&mut self, aisles: &[usize]) {
        let catalog = self.catalog;
        self.arena.load_subset(catalog, aisles);
        self.items.clear();
        for item in catalog.items() {
            if !item.demand.is_empty() && self.arena.stock(item.id) > 0 {
                self.items.push(item.id);
            }
        }
    }

    fn pack(&mut self) -> Aggregation {
        let catalog = self.catalog;
        let ub = catalog.wave_ub();
        let mut units = 0u64;

        for &item in &self.items {
            for &(o, _) in &catalog.items()[item].demand {
                if self.arena.is_picked(o) {
                    continue;
                }
                let order = &catalog.orders()[o];
                if units + order.size > ub {
                    break;
                }
                if self.arena.fits(order) {
                    self.arena.take(order);
                    units += order.size;
                }
            }
        }

        Aggregation {
            orders: self.arena.picked().to_vec(),
            units,
        }
    }
}

/// Incrementally matches orders that one aisle can serve alone.
///
/// Each added aisle gets its own stock; an order is taken only if that aisle
/// covers all of it, so the picked set is always coverable by the aisles
/// added so far. Used to pre-fill a wave cheaply while the aisle count grows.
#[derive(Debug, Clone)]
pub struct SingleAisleMatcher<'a> {
    catalog: &'a Catalog,
    arena: StockArena,
    aisles: Vec<usize>,
    units: u64,
}

impl<'a> SingleAisleMatcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            arena: StockArena::new(catalog),
            aisles: Vec::new(),
            units: 0,
        }
    }

    /// Adds an aisle and matches unpicked orders against it.
    ///
    /// Returns the units added.
    pub fn add_aisle(&mut self, aisle: usize) -> u64 {
        let catalog = self.catalog;
        let ub = catalog.wave_ub();
        let aisle = &catalog.aisles()[aisle];
        self.arena.restock_aisle(aisle);
        self.aisles.push(aisle.id);

        let before = self.units;
        for &(item, _) in &aisle.items {
            for &(o, _) in &catalog.items()[item].demand {
                if self.arena.is_picked(o) {
                    continue;
                }
                let order = &catalog.orders()[o];
                if self.units + order.size > ub {
                    break;
                }
                if self.arena.fits(order) {
                    self.arena.take(order);
                    self.units += order.size;
                }
            }
        }
        self.units - before
    }

    pub fn aisles(&self) -> &[usize] {
        &self.aisles
    }

    /// Orders matched so far.
    pub fn picked(&self) -> &[usize] {
        self.arena.picked()
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    pub fn aggregation(&self) -> Aggregation {
        Aggregation {
            orders: self.picked().to_vec(),
            units: self.units,
        }
    }
}

/// Single-aisle matching over `aisles`, in the given order.
pub fn single_aisle_matching(catalog: &Catalog, aisles: &[usize]) -> Aggregation {
    let mut matcher = SingleAisleMatcher::new(catalog);
    for &a in aisles {
        matcher.add_aisle(a);
    }
    matcher.aggregation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Evaluator;
    use proptest::prelude::*;

    // o0 {0:3}, o1 {0:2, 1:2}, o2 {1:4}; a0 {0:4}, a1 {0:1, 1:3}
    fn catalog(ub: u64) -> Catalog {
        Catalog::new(
            2,
            vec![vec![(0, 3)], vec![(0, 2), (1, 2)], vec![(1, 4)]],
            vec![vec![(0, 4)], vec![(0, 1), (1, 3)]],
            1,
            ub,
        )
        .unwrap()
    }

    #[test]
    fn test_aggregate_greedy_order() {
        let catalog = catalog(100);
        let mut aggregator = SuperAisleAggregator::new(&catalog);
        // stock: item0 = 5, item1 = 3; item 0 scan takes o0 then o1 (needs 2 of item0, 2 of item1)
        let picked = aggregator.aggregate(&[0, 1]);
        assert_eq!(picked.orders, vec![0, 1]);
        assert_eq!(picked.units, 7);
        assert_eq!(aggregator.stock(0), 0);
        assert_eq!(aggregator.stock(1), 1);
        assert_eq!(picked.ratio(2), 3.5);
    }

    #[test]
    fn test_aggregate_stops_item_scan_at_ub() {
        let catalog = catalog(5);
        let mut aggregator = SuperAisleAggregator::new(&catalog);
        let picked = aggregator.aggregate(&[0, 1]);
        // o0 (3) fits; o1 (4) would reach 7 > 5, so item 0's scan stops;
        // item 1's scan also stops at o1
        assert_eq!(picked.orders, vec![0]);
        assert_eq!(picked.units, 3);
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let catalog = catalog(100);
        let mut aggregator = SuperAisleAggregator::new(&catalog);
        let first = aggregator.aggregate(&[0, 1]);
        let second = aggregator.aggregate(&[0, 1]);
        assert_eq!(first, second);
        let only_a1 = aggregator.aggregate(&[1]);
        assert!(only_a1.orders.is_empty());
    }

    #[test]
    fn test_single_aisle_matching() {
        let catalog = catalog(100);
        // a0 serves o0 alone; a1 serves nothing alone (o1 needs 2 of item0)
        let matched = single_aisle_matching(&catalog, &[0, 1]);
        assert_eq!(matched.orders, vec![0]);
        assert_eq!(matched.units, 3);

        let mut matcher = SingleAisleMatcher::new(&catalog);
        assert_eq!(matcher.add_aisle(1), 0);
        assert_eq!(matcher.add_aisle(0), 3);
        assert_eq!(matcher.aisles(), &[1, 0]);
    }

    fn arb_catalog() -> impl Strategy<Value = Catalog> {
        let n_items = 4usize;
        let entry = (0..n_items, 1u32..5);
        (
            prop::collection::vec(prop::collection::vec(entry.clone(), 1..3), 1..8),
            prop::collection::vec(prop::collection::vec(entry, 1..4), 1..6),
            1u64..30,
        )
            .prop_map(move |(orders, aisles, ub)| {
                let dedup = |v: Vec<Vec<(usize, u32)>>| {
                    v.into_iter()
                        .map(|mut row| {
                            row.sort_by_key(|&(i, _)| i);
                            row.dedup_by_key(|&mut (i, _)| i);
                            row
                        })
                        .collect::<Vec<_>>()
                };
                Catalog::new(n_items, dedup(orders), dedup(aisles), 1, ub).unwrap()
            })
    }

    proptest! {
        #[test]
        fn prop_aggregation_respects_supply_and_ub(catalog in arb_catalog(), seed in 0u64..1000) {
            let all: Vec<usize> = (0..catalog.n_aisles()).collect();
            let mut aggregator = SuperAisleAggregator::new(&catalog);
            let mut rng = u_numflow::random::create_rng(seed);
            let picked = aggregator.aggregate_shuffled(&all, &mut rng);

            prop_assert!(picked.units <= catalog.wave_ub());
            prop_assert_eq!(picked.units, catalog.units_of(&picked.orders));
            for item in catalog.items() {
                let demand: u64 = picked
                    .orders
                    .iter()
                    .map(|&o| catalog.orders()[o].quantity(item.id) as u64)
                    .sum();
                prop_assert!(demand <= item.total_supply);
            }

            if !picked.orders.is_empty() {
                let evaluation = Evaluator::new(&catalog).evaluate(&picked.into_candidate(&all));
                prop_assert!(evaluation.is_feasible());
            }
        }

        #[test]
        fn prop_single_aisle_matching_is_coverable(catalog in arb_catalog()) {
            let all: Vec<usize> = (0..catalog.n_aisles()).collect();
            let matched = single_aisle_matching(&catalog, &all);
            prop_assert!(matched.units <= catalog.wave_ub());
            if !matched.orders.is_empty() {
                let evaluation = Evaluator::new(&catalog).evaluate(&matched.into_candidate(&all));
                prop_assert!(evaluation.is_feasible());
            }
        }
    }
}
