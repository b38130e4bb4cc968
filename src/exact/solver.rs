//! Exact subproblem solver.

use super::types::{OracleStats, PartialResult, Subproblem};
use crate::budget::TimeBudget;
use crate::builder::{BuiltModel, ModelBuilder, Scope};
use crate::catalog::Catalog;
use crate::eval::Candidate;
use crate::mip::{LinearConstraint, Objective, Oracle, OracleConfig, OracleStatus};
use std::time::Duration;
use tracing::{debug, warn};

/// Parametric subproblem solver over a shared time budget.
///
/// Each method builds one model, hands it to the oracle with the remaining
/// budget as its time limit, and normalizes the native objective to the
/// `units / aisles` ratio. Non-optimal outcomes come back as values, never
/// as errors.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_wave::budget::TimeBudget;
/// use u_wave::catalog::Catalog;
/// use u_wave::exact::{ExactSolver, PartialResult};
/// use u_wave::mip::EnumerationOracle;
///
/// let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 5)]], 1, 10).unwrap();
/// let oracle = EnumerationOracle::new();
/// let mut solver = ExactSolver::new(&catalog, &oracle, TimeBudget::new(Duration::from_secs(5)));
///
/// let result = solver.fixed_aisle_count(1);
/// assert_eq!(result.value(), Some(3.0));
/// ```
pub struct ExactSolver<'a> {
    catalog: &'a Catalog,
    oracle: &'a dyn Oracle,
    budget: TimeBudget,
    verbose: bool,
    stats: OracleStats,
}

impl<'a> ExactSolver<'a> {
    pub fn new(catalog: &'a Catalog, oracle: &'a dyn Oracle, budget: TimeBudget) -> Self {
        Self {
            catalog,
            oracle,
            budget,
            verbose: false,
            stats: OracleStats::default(),
        }
    }

    /// Passes the verbose flag through to the oracle.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn budget(&self) -> &TimeBudget {
        &self.budget
    }

    /// Call counts so far.
    pub fn stats(&self) -> OracleStats {
        self.stats
    }

    /// Exactly `k` aisles; maximize units. Value is `units / k`.
    pub fn fixed_aisle_count(&mut self, k: usize) -> PartialResult {
        let subproblem = Subproblem::FixedAisleCount(k);
        if k == 0 || k > self.catalog.n_aisles() {
            return skipped(subproblem);
        }

        let mut built = ModelBuilder::new(self.catalog)
            .with_name(format!("aisle_count_{k}"))
            .build();
        let count = built.aisle_count_terms();
        built
            .model
            .add_constraint(LinearConstraint::eq("aisle_count", count, k as i64));
        let units = built.units_terms(self.catalog);
        built.model.set_objective(Objective::maximize(units));

        self.call(subproblem, &built, None, |_, raw| Some(raw / k as f64))
    }

    /// Wave of exactly `k` units; minimize aisles. Value is `k / aisles`.
    pub fn fixed_wave_size(&mut self, k: u64) -> PartialResult {
        let subproblem = Subproblem::FixedWaveSize(k);
        if k == 0 {
            return skipped(subproblem);
        }

        let mut built = ModelBuilder::new(self.catalog)
            .with_name(format!("wave_size_{k}"))
            .with_wave_bounds(k, k)
            .build();
        let count = built.aisle_count_terms();
        built.model.set_objective(Objective::minimize(count));

        self.call(subproblem, &built, None, |_, raw| {
            (raw > 0.0).then(|| k as f64 / raw)
        })
    }

    /// Wave within `[LB, UB]`; minimize aisles. Value is `units / aisles`.
    ///
    /// `cap` bounds this call below the remaining budget.
    pub fn minimum_feasible_aisles(&mut self, cap: Option<Duration>) -> PartialResult {
        let mut built = ModelBuilder::new(self.catalog)
            .with_name("min_aisles")
            .build();
        let count = built.aisle_count_terms();
        built.model.set_objective(Objective::minimize(count));

        let catalog = self.catalog;
        self.call(Subproblem::MinimumFeasibleAisles, &built, cap, |c, raw| {
            (raw > 0.0).then(|| catalog.units_of(c.orders()) as f64 / raw)
        })
    }

    /// Given aisles; maximize units. Value is `units / |aisles|`.
    pub fn fixed_aisle_subset(&mut self, aisles: &[usize]) -> PartialResult {
        let Some(aisles) = normalize_ids(aisles, self.catalog.n_aisles()) else {
            return skipped(Subproblem::FixedAisleSubset { aisles: aisles.len() });
        };
        let size = aisles.len();
        let subproblem = Subproblem::FixedAisleSubset { aisles: size };

        let mut built = ModelBuilder::new(self.catalog)
            .with_name("aisle_subset")
            .with_aisles(Scope::Fixed(aisles))
            .build();
        let units = built.units_terms(self.catalog);
        built.model.set_objective(Objective::maximize(units));

        self.call(subproblem, &built, None, |_, raw| Some(raw / size as f64))
    }

    /// Given aisles with `pinned` orders already in the wave; the rest of
    /// the orders are free. Value is `(pinned + free units) / |aisles|`.
    pub fn fixed_aisle_subset_with_orders(
        &mut self,
        aisles: &[usize],
        pinned: &[usize],
    ) -> PartialResult {
        let n_aisles = self.catalog.n_aisles();
        let n_orders = self.catalog.n_orders();
        let (Some(aisles), Some(pinned)) = (
            normalize_ids(aisles, n_aisles),
            normalize_ids_allow_empty(pinned, n_orders),
        ) else {
            return skipped(Subproblem::FixedAisleSubsetWithOrders {
                aisles: aisles.len(),
                pinned: pinned.len(),
            });
        };
        let size = aisles.len();
        let subproblem = Subproblem::FixedAisleSubsetWithOrders {
            aisles: size,
            pinned: pinned.len(),
        };

        let mut built = ModelBuilder::new(self.catalog)
            .with_name("aisle_subset_pinned")
            .with_orders(Scope::Pinned(pinned))
            .with_aisles(Scope::Fixed(aisles))
            .build();
        let units = built.units_terms(self.catalog);
        let constant = built.fixed_units() as i64;
        built
            .model
            .set_objective(Objective::maximize(units).with_constant(constant));

        self.call(subproblem, &built, None, |_, raw| Some(raw / size as f64))
    }

    /// Given orders; minimize aisles covering them. Value is
    /// `wave / aisles`.
    ///
    /// An order set whose wave falls outside `[LB, UB]` is infeasible
    /// without an oracle call.
    pub fn fixed_order_subset(&mut self, orders: &[usize]) -> PartialResult {
        let Some(orders) = normalize_ids(orders, self.catalog.n_orders()) else {
            return skipped(Subproblem::FixedOrderSubset { orders: orders.len() });
        };
        let subproblem = Subproblem::FixedOrderSubset {
            orders: orders.len(),
        };
        let wave = self.catalog.units_of(&orders);
        if wave < self.catalog.wave_lb() || wave > self.catalog.wave_ub() {
            return skipped(subproblem);
        }

        let mut built = ModelBuilder::new(self.catalog)
            .with_name("order_subset")
            .with_orders(Scope::Fixed(orders))
            .build();
        let count = built.aisle_count_terms();
        built.model.set_objective(Objective::minimize(count));

        self.call(subproblem, &built, None, |_, raw| {
            (raw > 0.0).then(|| wave as f64 / raw)
        })
    }

    fn call<F>(
        &mut self,
        subproblem: Subproblem,
        built: &BuiltModel,
        cap: Option<Duration>,
        normalize: F,
    ) -> PartialResult
    where
        F: FnOnce(&Candidate, f64) -> Option<f64>,
    {
        let result = self.dispatch(subproblem, built, cap, normalize);
        self.stats.record(&result);
        result
    }

    fn dispatch<F>(
        &self,
        subproblem: Subproblem,
        built: &BuiltModel,
        cap: Option<Duration>,
        normalize: F,
    ) -> PartialResult
    where
        F: FnOnce(&Candidate, f64) -> Option<f64>,
    {
        let limit = self.budget.limit(cap);
        if limit.is_zero() {
            debug!(%subproblem, "no time left");
            return PartialResult::TimedOut;
        }

        let config = OracleConfig::default()
            .with_time_limit(limit)
            .with_verbose(self.verbose);
        debug!(
            %subproblem,
            oracle = self.oracle.name(),
            vars = built.model.var_count(),
            constraints = built.model.constraint_count(),
            limit_ms = limit.as_millis() as u64,
            "solving subproblem"
        );

        let solution = match self.oracle.solve(&built.model, &config) {
            Ok(solution) => solution,
            Err(e) => {
                warn!(%subproblem, oracle = self.oracle.name(), error = %e, "oracle call failed");
                return PartialResult::Unavailable;
            }
        };

        match solution.status {
            OracleStatus::Optimal => {
                if solution.values.len() != built.model.var_count() {
                    warn!(
                        %subproblem,
                        expected = built.model.var_count(),
                        got = solution.values.len(),
                        "oracle returned a malformed assignment"
                    );
                    return PartialResult::Unavailable;
                }
                let candidate = built.decode(&solution.values);
                let raw = solution.objective_value.unwrap_or(0.0);
                match normalize(&candidate, raw) {
                    Some(value) => {
                        debug!(
                            %subproblem,
                            raw,
                            value,
                            solve_ms = solution.solve_time.as_millis() as u64,
                            "optimal"
                        );
                        PartialResult::Optimal { candidate, value }
                    }
                    None => PartialResult::Infeasible,
                }
            }
            OracleStatus::Infeasible => {
                debug!(%subproblem, "infeasible");
                PartialResult::Infeasible
            }
            OracleStatus::TimeLimitFeasible | OracleStatus::TimeLimit => {
                debug!(%subproblem, status = ?solution.status, "time limit reached");
                PartialResult::TimedOut
            }
        }
    }
}

fn skipped(subproblem: Subproblem) -> PartialResult {
    debug!(%subproblem, "structurally infeasible, skipped");
    PartialResult::Infeasible
}

/// Sorted, deduplicated, non-empty and in range.
fn normalize_ids(ids: &[usize], n: usize) -> Option<Vec<usize>> {
    normalize_ids_allow_empty(ids, n).filter(|ids| !ids.is_empty())
}

fn normalize_ids_allow_empty(ids: &[usize], n: usize) -> Option<Vec<usize>> {
    if ids.iter().any(|&id| id >= n) {
        return None;
    }
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mip::{EnumerationOracle, MipModel, OracleError, OracleSolution};

    // o0 {0:3}, o1 {1:2}, o2 {0:1, 1:1}; a0 {0:4}, a1 {1:3}, a2 {0:1, 1:1}
    fn catalog(ub: u64) -> Catalog {
        Catalog::new(
            2,
            vec![vec![(0, 3)], vec![(1, 2)], vec![(0, 1), (1, 1)]],
            vec![vec![(0, 4)], vec![(1, 3)], vec![(0, 1), (1, 1)]],
            1,
            ub,
        )
        .unwrap()
    }

    fn budget() -> TimeBudget {
        TimeBudget::new(Duration::from_secs(30))
    }

    struct Offline;

    impl Oracle for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn solve(&self, _: &MipModel, _: &OracleConfig) -> Result<OracleSolution, OracleError> {
            Err(OracleError::Unavailable("no license".into()))
        }
    }

    #[test]
    fn test_fixed_aisle_count() {
        let catalog = catalog(10);
        let oracle = EnumerationOracle::new();
        let mut solver = ExactSolver::new(&catalog, &oracle, budget());

        let one = solver.fixed_aisle_count(1);
        assert_eq!(one.value(), Some(3.0));
        assert_eq!(one.candidate().unwrap().aisles(), &[0]);

        let two = solver.fixed_aisle_count(2);
        assert_eq!(two.value(), Some(3.5));
        let candidate = two.candidate().unwrap();
        assert_eq!(candidate.aisles(), &[0, 1]);
        assert_eq!(candidate.orders(), &[0, 1, 2]);

        let three = solver.fixed_aisle_count(3);
        assert!((three.value().unwrap() - 7.0 / 3.0).abs() < 1e-9);

        assert_eq!(solver.fixed_aisle_count(4), PartialResult::Infeasible);
        assert_eq!(solver.fixed_aisle_count(0), PartialResult::Infeasible);
        assert_eq!(solver.stats().optimal, 3);
        // structural skips are not oracle calls
        assert_eq!(solver.stats().total(), 3);
    }

    #[test]
    fn test_fixed_wave_size() {
        let catalog = catalog(10);
        let oracle = EnumerationOracle::new();
        let mut solver = ExactSolver::new(&catalog, &oracle, budget());

        let seven = solver.fixed_wave_size(7);
        assert_eq!(seven.value(), Some(3.5));
        assert_eq!(seven.candidate().unwrap().aisles().len(), 2);

        // total demand is 7
        assert_eq!(solver.fixed_wave_size(8), PartialResult::Infeasible);
        // no order subset sums to 6
        assert_eq!(solver.fixed_wave_size(6), PartialResult::Infeasible);
    }

    #[test]
    fn test_minimum_feasible_aisles() {
        let catalog = catalog(10);
        let oracle = EnumerationOracle::new();
        let mut solver = ExactSolver::new(&catalog, &oracle, budget());

        let result = solver.minimum_feasible_aisles(Some(Duration::from_secs(5)));
        let candidate = result.candidate().unwrap();
        assert_eq!(candidate.aisles().len(), 1);
        let units = catalog.units_of(candidate.orders()) as f64;
        assert_eq!(result.value(), Some(units));
    }

    #[test]
    fn test_fixed_aisle_subset_dedups() {
        let catalog = catalog(10);
        let oracle = EnumerationOracle::new();
        let mut solver = ExactSolver::new(&catalog, &oracle, budget());

        let result = solver.fixed_aisle_subset(&[1, 0, 1]);
        assert_eq!(result.value(), Some(3.5));
        assert_eq!(result.candidate().unwrap().aisles(), &[0, 1]);

        assert_eq!(solver.fixed_aisle_subset(&[]), PartialResult::Infeasible);
        assert_eq!(solver.fixed_aisle_subset(&[7]), PartialResult::Infeasible);
    }

    #[test]
    fn test_fixed_aisle_subset_with_pinned_orders() {
        let catalog = catalog(10);
        let oracle = EnumerationOracle::new();
        let mut solver = ExactSolver::new(&catalog, &oracle, budget());

        // a0 only stocks item 0: nothing beyond the pinned o0 fits
        let result = solver.fixed_aisle_subset_with_orders(&[0], &[0]);
        assert_eq!(result.value(), Some(3.0));
        assert_eq!(result.candidate().unwrap().orders(), &[0]);

        let result = solver.fixed_aisle_subset_with_orders(&[0, 1], &[1]);
        assert_eq!(result.value(), Some(3.5));
    }

    #[test]
    fn test_fixed_order_subset() {
        let catalog = catalog(10);
        let oracle = EnumerationOracle::new();
        let mut solver = ExactSolver::new(&catalog, &oracle, budget());

        assert_eq!(solver.fixed_order_subset(&[0, 1]).value(), Some(2.5));
        let single = solver.fixed_order_subset(&[2]);
        assert_eq!(single.value(), Some(2.0));
        assert_eq!(single.candidate().unwrap().aisles(), &[2]);
    }

    #[test]
    fn test_fixed_order_subset_out_of_bounds_skips_oracle() {
        let catalog = catalog(4);
        let mut solver = ExactSolver::new(&catalog, &Offline, budget());

        assert_eq!(solver.fixed_order_subset(&[0, 1]), PartialResult::Infeasible);
        assert_eq!(solver.stats().total(), 0);
    }

    #[test]
    fn test_exhausted_budget_times_out() {
        let catalog = catalog(10);
        let oracle = EnumerationOracle::new();
        let mut solver =
            ExactSolver::new(&catalog, &oracle, TimeBudget::new(Duration::ZERO));

        assert_eq!(solver.fixed_aisle_count(1), PartialResult::TimedOut);
        assert_eq!(solver.minimum_feasible_aisles(None), PartialResult::TimedOut);
        assert_eq!(solver.stats().timed_out, 2);
    }

    #[test]
    fn test_unavailable_oracle() {
        let catalog = catalog(10);
        let mut solver = ExactSolver::new(&catalog, &Offline, budget());

        assert_eq!(solver.fixed_aisle_count(1), PartialResult::Unavailable);
        assert_eq!(solver.fixed_wave_size(3), PartialResult::Unavailable);
        assert_eq!(solver.stats().unavailable, 2);
    }
}
