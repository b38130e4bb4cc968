//! Static problem data.
//!
//! Items, orders and aisles are arena-indexed (`id == index`) with sorted
//! `(id, quantity)` adjacency. A [`Catalog`] is immutable once built; all
//! per-evaluation scratch lives in [`StockArena`](crate::eval::StockArena).

mod instance;
mod synthetic;
mod types;

pub use instance::{Catalog, CatalogError, InstanceData};
pub use synthetic::{SyntheticConfig, SyntheticGenerator};
pub use types::{Aisle, Item, Order};
