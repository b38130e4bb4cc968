//! Catalog → 0/1 linear model.

use crate::catalog::Catalog;
use crate::eval::Candidate;
use crate::mip::{LinearConstraint, MipModel, VarId};

/// How one side (orders or aisles) enters a model.
///
/// Ids outside the catalog are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// Every id gets a free boolean variable.
    #[default]
    Free,
    /// Exactly these ids are selected; no variables are emitted.
    Fixed(Vec<usize>),
    /// These ids are selected as constants; every other id is free.
    Pinned(Vec<usize>),
}

impl Scope {
    fn constants(&self) -> &[usize] {
        match self {
            Scope::Free => &[],
            Scope::Fixed(ids) | Scope::Pinned(ids) => ids,
        }
    }

    fn has_free(&self) -> bool {
        !matches!(self, Scope::Fixed(_))
    }
}

/// Declarative builder for wave subproblem models.
///
/// Emits one boolean per free order/aisle, a wave-size range constraint on
/// free orders, and one coverage constraint per item with nonzero in-scope
/// demand:
///
/// `Σ demand(free orders) − Σ supply(free aisles) ≤ fixedSupply − fixedDemand`
///
/// Zero coefficients are never materialized. The builder never solves.
///
/// # Examples
///
/// ```
/// use u_wave::builder::{ModelBuilder, Scope};
/// use u_wave::catalog::Catalog;
///
/// let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 5)], vec![(0, 2)]], 1, 10).unwrap();
/// let built = ModelBuilder::new(&catalog)
///     .with_aisles(Scope::Fixed(vec![0]))
///     .build();
/// assert_eq!(built.model.var_count(), 1); // only the order is free
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder<'a> {
    catalog: &'a Catalog,
    name: String,
    wave_lb: u64,
    wave_ub: u64,
    orders: Scope,
    aisles: Scope,
}

impl<'a> ModelBuilder<'a> {
    /// Starts a builder with the catalog's wave bounds and both sides free.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            name: "wave".into(),
            wave_lb: catalog.wave_lb(),
            wave_ub: catalog.wave_ub(),
            orders: Scope::Free,
            aisles: Scope::Free,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Overrides the wave bounds (e.g. `k..=k` for a fixed wave size).
    pub fn with_wave_bounds(mut self, lb: u64, ub: u64) -> Self {
        self.wave_lb = lb;
        self.wave_ub = ub;
        self
    }

    pub fn with_orders(mut self, scope: Scope) -> Self {
        self.orders = scope;
        self
    }

    pub fn with_aisles(mut self, scope: Scope) -> Self {
        self.aisles = scope;
        self
    }

    pub fn build(self) -> BuiltModel {
        let catalog = self.catalog;
        let mut model = MipModel::new(self.name);

        let mut fixed_order = vec![false; catalog.n_orders()];
        let fixed_orders = in_range(self.orders.constants(), catalog.n_orders());
        for &o in &fixed_orders {
            fixed_order[o] = true;
        }
        let mut order_var: Vec<Option<VarId>> = vec![None; catalog.n_orders()];
        let mut order_vars = Vec::new();
        if self.orders.has_free() {
            for order in catalog.orders() {
                if !fixed_order[order.id] {
                    let v = model.add_bool_var(format!("order_{}", order.id));
                    order_var[order.id] = Some(v);
                    order_vars.push((order.id, v));
                }
            }
        }

        let mut fixed_aisle = vec![false; catalog.n_aisles()];
        let fixed_aisles = in_range(self.aisles.constants(), catalog.n_aisles());
        for &a in &fixed_aisles {
            fixed_aisle[a] = true;
        }
        let mut aisle_var: Vec<Option<VarId>> = vec![None; catalog.n_aisles()];
        let mut aisle_vars = Vec::new();
        if self.aisles.has_free() {
            for aisle in catalog.aisles() {
                if !fixed_aisle[aisle.id] {
                    let v = model.add_bool_var(format!("aisle_{}", aisle.id));
                    aisle_var[aisle.id] = Some(v);
                    aisle_vars.push((aisle.id, v));
                }
            }
        }

        let fixed_units = catalog.units_of(&fixed_orders);
        let lower = saturating_i64(self.wave_lb) - saturating_i64(fixed_units);
        let upper = saturating_i64(self.wave_ub) - saturating_i64(fixed_units);
        let wave_terms: Vec<(VarId, i64)> = order_vars
            .iter()
            .map(|&(o, v)| (v, catalog.orders()[o].size as i64))
            .collect();
        // a constant wave only needs a row when it is out of bounds
        if !wave_terms.is_empty() || lower > 0 || upper < 0 {
            model.add_constraint(LinearConstraint::range(
                "wave",
                wave_terms,
                Some(lower),
                Some(upper),
            ));
        }

        for item in catalog.items() {
            let mut terms = Vec::new();
            let mut fixed_demand = 0i64;
            for &(o, q) in &item.demand {
                if let Some(v) = order_var[o] {
                    terms.push((v, q as i64));
                } else if fixed_order[o] {
                    fixed_demand += q as i64;
                }
            }
            if terms.is_empty() && fixed_demand == 0 {
                continue;
            }

            let mut fixed_supply = 0i64;
            for &(a, q) in &item.supply {
                if let Some(v) = aisle_var[a] {
                    terms.push((v, -(q as i64)));
                } else if fixed_aisle[a] {
                    fixed_supply += q as i64;
                }
            }

            let rhs = fixed_supply - fixed_demand;
            if terms.is_empty() && rhs >= 0 {
                continue;
            }
            model.add_constraint(LinearConstraint::le(
                format!("item_{}", item.id),
                terms,
                rhs,
            ));
        }

        BuiltModel {
            model,
            order_vars,
            aisle_vars,
            fixed_orders,
            fixed_aisles,
            fixed_units,
        }
    }
}

/// Sorted, deduplicated ids below `n`.
fn in_range(ids: &[usize], n: usize) -> Vec<usize> {
    let mut ids: Vec<usize> = ids.iter().copied().filter(|&id| id < n).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// A built model plus the mapping between variables and catalog ids.
#[derive(Debug, Clone)]
pub struct BuiltModel {
    pub model: MipModel,
    order_vars: Vec<(usize, VarId)>,
    aisle_vars: Vec<(usize, VarId)>,
    fixed_orders: Vec<usize>,
    fixed_aisles: Vec<usize>,
    fixed_units: u64,
}

impl BuiltModel {
    /// `(order id, variable)` for every free order.
    pub fn order_vars(&self) -> &[(usize, VarId)] {
        &self.order_vars
    }

    /// `(aisle id, variable)` for every free aisle.
    pub fn aisle_vars(&self) -> &[(usize, VarId)] {
        &self.aisle_vars
    }

    pub fn fixed_orders(&self) -> &[usize] {
        &self.fixed_orders
    }

    pub fn fixed_aisles(&self) -> &[usize] {
        &self.fixed_aisles
    }

    /// Units contributed by fixed/pinned orders.
    pub fn fixed_units(&self) -> u64 {
        self.fixed_units
    }

    /// `Σ size·x` over free orders.
    pub fn units_terms(&self, catalog: &Catalog) -> Vec<(VarId, i64)> {
        self.order_vars
            .iter()
            .map(|&(o, v)| (v, catalog.orders()[o].size as i64))
            .collect()
    }

    /// `Σ y` over free aisles.
    pub fn aisle_count_terms(&self) -> Vec<(VarId, i64)> {
        self.aisle_vars.iter().map(|&(_, v)| (v, 1)).collect()
    }

    /// Turns a 0/1 assignment into a candidate, adding fixed selections.
    pub fn decode(&self, values: &[bool]) -> Candidate {
        let orders = self
            .fixed_orders
            .iter()
            .copied()
            .chain(
                self.order_vars
                    .iter()
                    .filter(|(_, v)| values[v.index()])
                    .map(|&(o, _)| o),
            )
            .collect();
        let aisles = self
            .fixed_aisles
            .iter()
            .copied()
            .chain(
                self.aisle_vars
                    .iter()
                    .filter(|(_, v)| values[v.index()])
                    .map(|&(a, _)| a),
            )
            .collect();
        Candidate::new(orders, aisles)
    }
}
