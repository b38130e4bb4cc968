//! Catalog construction and validation.

use super::types::{Aisle, Item, Order};
use thiserror::Error;

/// Malformed-instance errors raised by [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An order or aisle references an item id `>= n_items`.
    #[error("{kind} {id} references item {item}, but the catalog has {n_items} items")]
    ItemOutOfRange {
        kind: &'static str,
        id: usize,
        item: usize,
        n_items: usize,
    },

    /// An order or aisle lists the same item twice.
    #[error("{kind} {id} lists item {item} more than once")]
    DuplicateItem {
        kind: &'static str,
        id: usize,
        item: usize,
    },

    /// Wave bounds with `lb > ub`.
    #[error("invalid wave bounds [{lb}, {ub}]")]
    InvalidBounds { lb: u64, ub: u64 },
}

/// Raw instance data as handed over by an instance reader.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceData {
    /// Number of distinct items.
    pub n_items: usize,
    /// Per order, `(item, quantity)` pairs in any order.
    pub orders: Vec<Vec<(usize, u32)>>,
    /// Per aisle, `(item, quantity)` pairs in any order.
    pub aisles: Vec<Vec<(usize, u32)>>,
    /// Wave size lower bound.
    pub wave_lb: u64,
    /// Wave size upper bound.
    pub wave_ub: u64,
}

/// Immutable problem catalog: items, orders, aisles and wave bounds.
///
/// # Examples
///
/// ```
/// use u_wave::catalog::Catalog;
///
/// let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 5)]], 1, 10).unwrap();
/// assert_eq!(catalog.orders()[0].size, 3);
/// assert_eq!(catalog.aisles()[0].capacity, 5);
/// assert_eq!(catalog.items()[0].total_demand, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    orders: Vec<Order>,
    aisles: Vec<Aisle>,
    wave_lb: u64,
    wave_ub: u64,
}

impl Catalog {
    /// Builds and validates a catalog.
    ///
    /// Zero quantities are dropped. Item ids must be `< n_items` and
    /// unique within each order/aisle.
    pub fn new(
        n_items: usize,
        orders: Vec<Vec<(usize, u32)>>,
        aisles: Vec<Vec<(usize, u32)>>,
        wave_lb: u64,
        wave_ub: u64,
    ) -> Result<Self, CatalogError> {
        if wave_lb > wave_ub {
            return Err(CatalogError::InvalidBounds {
                lb: wave_lb,
                ub: wave_ub,
            });
        }

        let mut items: Vec<Item> = (0..n_items).map(Item::empty).collect();

        let mut built_orders = Vec::with_capacity(orders.len());
        for (id, raw) in orders.into_iter().enumerate() {
            let pairs = normalize("order", id, raw, n_items)?;
            let size = pairs.iter().map(|&(_, q)| q as u64).sum();
            for &(item, qty) in &pairs {
                items[item].demand.push((id, qty));
                items[item].total_demand += qty as u64;
            }
            built_orders.push(Order {
                id,
                items: pairs,
                size,
            });
        }

        let mut built_aisles = Vec::with_capacity(aisles.len());
        for (id, raw) in aisles.into_iter().enumerate() {
            let pairs = normalize("aisle", id, raw, n_items)?;
            let capacity = pairs.iter().map(|&(_, q)| q as u64).sum();
            for &(item, qty) in &pairs {
                items[item].supply.push((id, qty));
                items[item].total_supply += qty as u64;
            }
            built_aisles.push(Aisle {
                id,
                items: pairs,
                capacity,
            });
        }

        // ids were pushed in increasing order, so adjacency is already sorted
        Ok(Self {
            items,
            orders: built_orders,
            aisles: built_aisles,
            wave_lb,
            wave_ub,
        })
    }

    /// All items, indexed by id.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All orders, indexed by id.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// All aisles, indexed by id.
    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    pub fn n_orders(&self) -> usize {
        self.orders.len()
    }

    pub fn n_aisles(&self) -> usize {
        self.aisles.len()
    }

    /// Wave size lower bound (LB).
    pub fn wave_lb(&self) -> u64 {
        self.wave_lb
    }

    /// Wave size upper bound (UB).
    pub fn wave_ub(&self) -> u64 {
        self.wave_ub
    }

    /// Total units stored over all aisles.
    pub fn total_capacity(&self) -> u64 {
        self.aisles.iter().map(|a| a.capacity).sum()
    }

    /// Total units picked by the given orders.
    pub fn units_of(&self, orders: &[usize]) -> u64 {
        orders.iter().map(|&o| self.orders[o].size).sum()
    }

    /// Number of nonzero entries across all order and aisle vectors.
    pub fn nonzeros(&self) -> usize {
        self.orders.iter().map(|o| o.items.len()).sum::<usize>()
            + self.aisles.iter().map(|a| a.items.len()).sum::<usize>()
    }

    /// Mean number of distinct items per order (0 for an empty catalog).
    pub fn mean_order_items(&self) -> f64 {
        if self.orders.is_empty() {
            return 0.0;
        }
        let total: usize = self.orders.iter().map(|o| o.items.len()).sum();
        total as f64 / self.orders.len() as f64
    }
}

impl TryFrom<InstanceData> for Catalog {
    type Error = CatalogError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        Catalog::new(
            data.n_items,
            data.orders,
            data.aisles,
            data.wave_lb,
            data.wave_ub,
        )
    }
}

fn normalize(
    kind: &'static str,
    id: usize,
    mut pairs: Vec<(usize, u32)>,
    n_items: usize,
) -> Result<Vec<(usize, u32)>, CatalogError> {
    pairs.retain(|&(_, q)| q > 0);
    pairs.sort_unstable_by_key(|&(item, _)| item);
    for window in pairs.windows(2) {
        if window[0].0 == window[1].0 {
            return Err(CatalogError::DuplicateItem {
                kind,
                id,
                item: window[0].0,
            });
        }
    }
    if let Some(&(item, _)) = pairs.last() {
        if item >= n_items {
            return Err(CatalogError::ItemOutOfRange {
                kind,
                id,
                item,
                n_items,
            });
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Catalog {
        Catalog::new(
            3,
            vec![vec![(2, 1), (0, 2)], vec![(1, 4)], vec![(0, 1), (1, 1)]],
            vec![vec![(0, 3), (1, 2)], vec![(1, 5), (2, 1)]],
            2,
            6,
        )
        .unwrap()
    }

    #[test]
    fn test_derived_sizes() {
        let catalog = small();
        assert_eq!(catalog.orders()[0].size, 3);
        assert_eq!(catalog.orders()[0].items, vec![(0, 2), (2, 1)]);
        assert_eq!(catalog.aisles()[1].capacity, 6);
        assert_eq!(catalog.total_capacity(), 11);
        assert_eq!(catalog.units_of(&[0, 2]), 5);
        assert_eq!(catalog.nonzeros(), 9);
    }

    #[test]
    fn test_item_adjacency() {
        let catalog = small();
        let item1 = &catalog.items()[1];
        assert_eq!(item1.demand, vec![(1, 4), (2, 1)]);
        assert_eq!(item1.supply, vec![(0, 2), (1, 5)]);
        assert_eq!(item1.total_demand, 5);
        assert_eq!(item1.total_supply, 7);
    }

    #[test]
    fn test_zero_quantities_dropped() {
        let catalog = Catalog::new(2, vec![vec![(0, 0), (1, 2)]], vec![], 0, 5).unwrap();
        assert_eq!(catalog.orders()[0].items, vec![(1, 2)]);
        assert!(catalog.items()[0].demand.is_empty());
    }

    #[test]
    fn test_item_out_of_range() {
        let err = Catalog::new(2, vec![vec![(5, 1)]], vec![], 0, 5).unwrap_err();
        assert_eq!(
            err,
            CatalogError::ItemOutOfRange {
                kind: "order",
                id: 0,
                item: 5,
                n_items: 2
            }
        );
    }

    #[test]
    fn test_duplicate_item() {
        let err = Catalog::new(2, vec![], vec![vec![(1, 1), (1, 3)]], 0, 5).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateItem { kind: "aisle", .. }));
    }

    #[test]
    fn test_invalid_bounds() {
        let err = Catalog::new(1, vec![], vec![], 7, 3).unwrap_err();
        assert_eq!(err, CatalogError::InvalidBounds { lb: 7, ub: 3 });
    }

    #[test]
    fn test_mean_order_items() {
        let catalog = small();
        assert!((catalog.mean_order_items() - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_from_instance_data() {
        let data = InstanceData {
            n_items: 1,
            orders: vec![vec![(0, 1)]],
            aisles: vec![vec![(0, 1)]],
            wave_lb: 1,
            wave_ub: 1,
        };
        let catalog = Catalog::try_from(data).unwrap();
        assert_eq!(catalog.n_orders(), 1);
    }
}
