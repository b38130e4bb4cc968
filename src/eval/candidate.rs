//! Candidate solutions.

/// A selection of orders and aisles.
///
/// Ids are kept sorted and deduplicated so that two candidates with the
/// same selections compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    orders: Vec<usize>,
    aisles: Vec<usize>,
}

impl Candidate {
    pub fn new(mut orders: Vec<usize>, mut aisles: Vec<usize>) -> Self {
        orders.sort_unstable();
        orders.dedup();
        aisles.sort_unstable();
        aisles.dedup();
        Self { orders, aisles }
    }

    /// Selected order ids, ascending.
    pub fn orders(&self) -> &[usize] {
        &self.orders
    }

    /// Selected aisle ids, ascending.
    pub fn aisles(&self) -> &[usize] {
        &self.aisles
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.orders, self.aisles)
    }
}
