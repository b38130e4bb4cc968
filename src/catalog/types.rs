//! Arena-indexed catalog entities.
//!
//! Every entity is stored in a `Vec` whose index equals its id. Adjacency
//! lists are sorted `(id, quantity)` pairs so lookups are a binary search
//! and iteration is contiguous.

/// An order: a vector of item demands that must be picked together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Order id (index into [`Catalog::orders`](super::Catalog::orders)).
    pub id: usize,
    /// Sorted `(item, quantity)` pairs, quantities strictly positive.
    pub items: Vec<(usize, u32)>,
    /// Total units demanded.
    pub size: u64,
}

impl Order {
    /// Quantity of `item` demanded by this order (0 if absent).
    pub fn quantity(&self, item: usize) -> u32 {
        lookup(&self.items, item)
    }

    /// Number of distinct items in the order.
    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }
}

/// An aisle: a storage location supplying fixed item quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aisle {
    /// Aisle id (index into [`Catalog::aisles`](super::Catalog::aisles)).
    pub id: usize,
    /// Sorted `(item, quantity)` pairs, quantities strictly positive.
    pub items: Vec<(usize, u32)>,
    /// Total units stored.
    pub capacity: u64,
}

impl Aisle {
    /// Quantity of `item` stored in this aisle (0 if absent).
    pub fn quantity(&self, item: usize) -> u32 {
        lookup(&self.items, item)
    }
}

/// An item with its demand and supply adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Item id.
    pub id: usize,
    /// Sorted `(order, quantity)` pairs.
    pub demand: Vec<(usize, u32)>,
    /// Sorted `(aisle, quantity)` pairs.
    pub supply: Vec<(usize, u32)>,
    /// Sum of demand over all orders.
    pub total_demand: u64,
    /// Sum of supply over all aisles.
    pub total_supply: u64,
}

impl Item {
    pub(crate) fn empty(id: usize) -> Self {
        Self {
            id,
            demand: Vec::new(),
            supply: Vec::new(),
            total_demand: 0,
            total_supply: 0,
        }
    }
}

fn lookup(pairs: &[(usize, u32)], key: usize) -> u32 {
    pairs
        .binary_search_by_key(&key, |&(id, _)| id)
        .map(|pos| pairs[pos].1)
        .unwrap_or(0)
}
