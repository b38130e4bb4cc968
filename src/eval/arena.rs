//! Per-evaluation stock scratch.

use crate::catalog::{Aisle, Catalog, Order};

/// Scratch stock counters and order marks for one greedy evaluation.
///
/// The arena is owned by a single caller and reused serially: every
/// `load_*` call starts from a clean state, so nothing is carried from one
/// evaluation to the next. Only touched entries are reset.
#[derive(Debug, Clone)]
pub struct StockArena {
    stock: Vec<u64>,
    touched: Vec<usize>,
    picked: Vec<bool>,
    picked_list: Vec<usize>,
}

impl StockArena {
    /// Creates an arena sized for `catalog`.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            stock: vec![0; catalog.n_items()],
            touched: Vec::new(),
            picked: vec![false; catalog.n_orders()],
            picked_list: Vec::new(),
        }
    }

    /// Resets, then sets stock to the total supply of `aisles`.
    pub fn load_subset(&mut self, catalog: &Catalog, aisles: &[usize]) {
        self.reset();
        for &a in aisles {
            self.add_aisle(&catalog.aisles()[a]);
        }
    }

    /// Resets, then sets stock to the supply of a single aisle.
    pub fn load_aisle(&mut self, aisle: &Aisle) {
        self.reset();
        self.add_aisle(aisle);
    }

    /// Replaces the stock with one aisle's supply, keeping order marks.
    pub fn restock_aisle(&mut self, aisle: &Aisle) {
        self.clear_stock();
        self.add_aisle(aisle);
    }

    /// Clears stock and order marks.
    pub fn reset(&mut self) {
        self.clear_stock();
        for &o in &self.picked_list {
            self.picked[o] = false;
        }
        self.picked_list.clear();
    }

    fn clear_stock(&mut self) {
        for &item in &self.touched {
            self.stock[item] = 0;
        }
        self.touched.clear();
    }

    fn add_aisle(&mut self, aisle: &Aisle) {
        for &(item, qty) in &aisle.items {
            if self.stock[item] == 0 {
                self.touched.push(item);
            }
            self.stock[item] += qty as u64;
        }
    }

    pub fn stock(&self, item: usize) -> u64 {
        self.stock[item]
    }

    /// Whether the current stock covers the whole order.
    pub fn fits(&self, order: &Order) -> bool {
        order
            .items
            .iter()
            .all(|&(item, qty)| self.stock[item] >= qty as u64)
    }

    /// Draws the order's demand from stock and marks it picked.
    ///
    /// Callers must check [`fits`](Self::fits) first.
    pub fn take(&mut self, order: &Order) {
        for &(item, qty) in &order.items {
            self.stock[item] -= qty as u64;
        }
        self.mark(order.id);
    }

    /// Marks an order as picked without touching stock.
    pub fn mark(&mut self, order: usize) {
        if !self.picked[order] {
            self.picked[order] = true;
            self.picked_list.push(order);
        }
    }

    pub fn is_picked(&self, order: usize) -> bool {
        self.picked[order]
    }

    /// Orders picked since the last reset, in pick order.
    pub fn picked(&self) -> &[usize] {
        &self.picked_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            2,
            vec![vec![(0, 2)], vec![(0, 1), (1, 1)]],
            vec![vec![(0, 3)], vec![(1, 4)]],
            0,
            10,
        )
        .unwrap()
    }

    #[test]
    fn test_load_and_take() {
        let catalog = catalog();
        let mut arena = StockArena::new(&catalog);
        arena.load_subset(&catalog, &[0, 1]);
        assert_eq!(arena.stock(0), 3);
        assert_eq!(arena.stock(1), 4);

        let order = &catalog.orders()[0];
        assert!(arena.fits(order));
        arena.take(order);
        assert_eq!(arena.stock(0), 1);
        assert!(arena.is_picked(0));
        assert!(!arena.fits(&catalog.orders()[0]));
    }

    #[test]
    fn test_reload_starts_clean() {
        let catalog = catalog();
        let mut arena = StockArena::new(&catalog);
        arena.load_subset(&catalog, &[0, 1]);
        arena.take(&catalog.orders()[1]);

        arena.load_aisle(&catalog.aisles()[1]);
        assert_eq!(arena.stock(0), 0);
        assert_eq!(arena.stock(1), 4);
        assert!(arena.picked().is_empty());
        assert!(!arena.is_picked(1));
    }

    #[test]
    fn test_restock_keeps_marks() {
        let catalog = catalog();
        let mut arena = StockArena::new(&catalog);
        arena.load_aisle(&catalog.aisles()[0]);
        arena.take(&catalog.orders()[0]);

        arena.restock_aisle(&catalog.aisles()[1]);
        assert_eq!(arena.stock(0), 0);
        assert_eq!(arena.stock(1), 4);
        assert!(arena.is_picked(0));
        assert_eq!(arena.picked(), &[0]);
    }
}
