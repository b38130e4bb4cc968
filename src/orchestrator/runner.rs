//! Phased wave optimization.
//!
//! # Algorithm
//!
//! 1. **Seed**: super-aisle aggregation over the top-`k` capacity aisles
//! 2. **Exactify** (small instances): minimum-feasible-aisles with a short
//!    cap; its aisle count becomes the sweep's lower end
//! 3. **Sweep refine**: exact subproblems per [`SweepStrategy`], stopping on
//!    the analytic bound, the non-improving cap, or the budget
//! 4. **Local search**: tabu over aisle subsets of the incumbent's size
//!
//! The seed always completes; every later phase reads the shared budget
//! before it starts. Every candidate passes through the [`Evaluator`]
//! before it can replace the incumbent.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use super::config::WaveConfig;
use super::strategy::{Phase, SweepStrategy};
use crate::budget::TimeBudget;
use crate::catalog::Catalog;
use crate::eval::{Candidate, Evaluator, Incumbent};
use crate::exact::{ExactSolver, OracleStats, PartialResult};
use crate::greedy::{seed_sweep, CapacityProfile, SingleAisleMatcher, SuperAisleAggregator};
use crate::mip::Oracle;
use crate::tabu::{AisleSwapProblem, TabuRunner};

/// Errors that prevent a run from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Outcome of a [`WaveRunner`] run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveResult {
    /// Best feasible candidate, `None` if none was found.
    pub best: Option<Candidate>,
    /// Ratio of `best` (0 if none).
    pub ratio: f64,
    /// Units picked by `best`.
    pub units: u64,
    /// Phase that produced `best`.
    pub phase: Option<Phase>,
    /// Strategy used by the sweep.
    pub strategy: SweepStrategy,
    /// Proven minimum aisle count from the exactify phase, if it ran.
    pub min_aisles: Option<usize>,
    /// Oracle calls by outcome.
    pub oracle: OracleStats,
    /// Wall-clock time used.
    pub elapsed: Duration,
}

/// Wave optimization runner.
pub struct WaveRunner;

impl WaveRunner {
    /// Runs all phases with a budget of `config.time_ceiling` starting now.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use u_wave::catalog::Catalog;
    /// use u_wave::mip::EnumerationOracle;
    /// use u_wave::orchestrator::{WaveConfig, WaveRunner};
    ///
    /// let catalog = Catalog::new(1, vec![vec![(0, 3)]], vec![vec![(0, 5)]], 1, 10).unwrap();
    /// let config = WaveConfig::default().with_time_ceiling(Duration::from_secs(5));
    /// let result = WaveRunner::run(&catalog, &EnumerationOracle::new(), &config).unwrap();
    /// assert_eq!(result.ratio, 3.0);
    /// ```
    pub fn run(
        catalog: &Catalog,
        oracle: &dyn Oracle,
        config: &WaveConfig,
    ) -> Result<WaveResult, WaveError> {
        Self::run_with_budget(catalog, oracle, config, TimeBudget::new(config.time_ceiling))
    }

    /// Runs all phases against an existing budget.
    pub fn run_with_budget(
        catalog: &Catalog,
        oracle: &dyn Oracle,
        config: &WaveConfig,
        budget: TimeBudget,
    ) -> Result<WaveResult, WaveError> {
        config.validate().map_err(WaveError::InvalidConfig)?;

        let strategy = config
            .strategy
            .unwrap_or_else(|| SweepStrategy::select(catalog, config.multi_item_threshold));
        info!(
            orders = catalog.n_orders(),
            aisles = catalog.n_aisles(),
            items = catalog.n_items(),
            lb = catalog.wave_lb(),
            ub = catalog.wave_ub(),
            %strategy,
            oracle = oracle.name(),
            "wave run started"
        );

        let mut run = Run {
            catalog,
            config,
            budget,
            evaluator: Evaluator::new(catalog),
            incumbent: Incumbent::new(),
            phase: None,
            min_aisles: None,
        };
        let mut solver = ExactSolver::new(catalog, oracle, budget).with_verbose(config.verbose_oracle);

        if catalog.n_orders() == 0 || catalog.n_aisles() == 0 {
            info!("empty catalog, no solution");
        } else if catalog.total_capacity() < catalog.wave_lb() {
            info!(
                capacity = catalog.total_capacity(),
                lb = catalog.wave_lb(),
                "wave lower bound exceeds total capacity, no solution"
            );
        } else {
            let profile = CapacityProfile::new(catalog);
            run.seed(&profile);
            run.exactify(&mut solver);
            run.sweep(&mut solver, &profile, strategy);
            run.local_search();
        }

        Ok(run.finish(strategy, solver.stats()))
    }
}

/// Mutable state shared by the phases of one run.
struct Run<'a> {
    catalog: &'a Catalog,
    config: &'a WaveConfig,
    budget: TimeBudget,
    evaluator: Evaluator<'a>,
    incumbent: Incumbent,
    phase: Option<Phase>,
    min_aisles: Option<usize>,
}

impl Run<'_> {
    fn credit(&mut self, phase: Phase, improved: bool) {
        if improved {
            self.phase = Some(phase);
        }
    }

    fn report(&self, phase: Phase) {
        info!(
            %phase,
            ratio = self.incumbent.ratio(),
            aisles = ?self.incumbent.best().map(|b| b.candidate.aisles().len()),
            remaining_ms = self.budget.remaining().as_millis() as u64,
            "phase finished"
        );
    }

    fn seed(&mut self, profile: &CapacityProfile) {
        let mut aggregator = SuperAisleAggregator::new(self.catalog);
        let outcome = seed_sweep(&mut aggregator, profile, &self.evaluator, &mut self.incumbent);
        debug!(evaluated = outcome.evaluated, improvements = outcome.improvements, "seed sweep");
        self.credit(Phase::Seed, outcome.improvements > 0);
        self.report(Phase::Seed);
    }

    fn exactify(&mut self, solver: &mut ExactSolver<'_>) {
        if self.catalog.nonzeros() > self.config.exact_size_threshold {
            debug!(
                nonzeros = self.catalog.nonzeros(),
                threshold = self.config.exact_size_threshold,
                "instance too large, skipping exactify"
            );
            return;
        }
        if self.budget.is_exhausted() {
            return;
        }

        let result = solver.minimum_feasible_aisles(Some(self.config.exactify_cap));
        if let PartialResult::Optimal { candidate, .. } = &result {
            self.min_aisles = Some(candidate.aisles().len());
        }
        let improved = result.fold_into(&self.evaluator, &mut self.incumbent);
        self.credit(Phase::Exactify, improved);
        self.report(Phase::Exactify);
    }

    fn sweep(
        &mut self,
        solver: &mut ExactSolver<'_>,
        profile: &CapacityProfile,
        strategy: SweepStrategy,
    ) {
        let min_k = self.min_aisles.unwrap_or(1);
        match strategy {
            SweepStrategy::AisleCount | SweepStrategy::AisleSubset => {
                self.estimate_sweep(solver, profile, strategy, min_k);
            }
            SweepStrategy::AscendingAisleCount => {
                let outcome = solver.sweep_aisle_count(
                    min_k,
                    self.config.max_non_improving,
                    &self.evaluator,
                    &mut self.incumbent,
                );
                debug!(steps = outcome.steps, stop = ?outcome.stop, "ascending aisle-count sweep");
                self.credit(Phase::SweepRefine, outcome.improvements > 0);
            }
            SweepStrategy::DescendingWaveSize => {
                let outcome = solver.sweep_wave_size(
                    self.config.max_non_improving,
                    &self.evaluator,
                    &mut self.incumbent,
                );
                debug!(steps = outcome.steps, stop = ?outcome.stop, "descending wave-size sweep");
                self.credit(Phase::SweepRefine, outcome.improvements > 0);
            }
        }
        self.report(Phase::SweepRefine);
    }

    /// Visits aisle counts by decreasing `min(UB, C_k) / k`.
    ///
    /// Equal estimates are ordered by increasing `k`, so once an estimate
    /// cannot beat the incumbent (counting the fewer-aisles tie break), no
    /// later candidate can either.
    fn estimate_sweep(
        &mut self,
        solver: &mut ExactSolver<'_>,
        profile: &CapacityProfile,
        strategy: SweepStrategy,
        min_k: usize,
    ) {
        let mut matcher = SingleAisleMatcher::new(self.catalog);
        let mut non_improving = 0;

        for k in profile.candidates(min_k) {
            let estimate = profile.estimate(k);
            if !self.incumbent.admits(estimate, k) {
                debug!(k, estimate, "estimate cannot beat incumbent");
                break;
            }
            if self.budget.is_exhausted() {
                debug!(k, "budget exhausted during sweep");
                break;
            }
            if non_improving >= self.config.max_non_improving {
                debug!(k, non_improving, "non-improving cap reached");
                break;
            }

            let result = match strategy {
                SweepStrategy::AisleSubset => {
                    let aisles = profile.top(k);
                    if matcher.aisles().len() > k {
                        matcher = SingleAisleMatcher::new(self.catalog);
                    }
                    for &a in &aisles[matcher.aisles().len()..] {
                        matcher.add_aisle(a);
                    }
                    let prefill = matcher.aggregation().into_candidate(aisles);
                    let pinned = prefill.orders().to_vec();
                    if self.incumbent.offer(&self.evaluator, prefill) {
                        self.phase = Some(Phase::SweepRefine);
                    }
                    solver.fixed_aisle_subset_with_orders(aisles, &pinned)
                }
                _ => solver.fixed_aisle_count(k),
            };

            if result.fold_into(&self.evaluator, &mut self.incumbent) {
                non_improving = 0;
                self.phase = Some(Phase::SweepRefine);
                info!(k, ratio = self.incumbent.ratio(), "sweep improved incumbent");
            } else {
                non_improving += 1;
            }
        }
    }

    fn local_search(&mut self) {
        if !self.config.local_search || self.budget.is_exhausted() {
            return;
        }
        let Some(start) = self.incumbent.best().map(|b| b.candidate.aisles().to_vec()) else {
            return;
        };
        if start.len() >= self.catalog.n_aisles() {
            return;
        }

        let aggregator = SuperAisleAggregator::new(self.catalog);
        let mut problem = AisleSwapProblem::new(aggregator, start, self.config.swap_size);
        let result = TabuRunner::run_with_budget(&mut problem, &self.config.tabu, &self.budget);
        debug!(
            k = problem.subset_size(),
            iterations = result.iterations,
            evaluations = result.evaluations,
            best_score = result.best_score,
            stop = ?result.stop,
            "tabu search"
        );

        let candidate = problem.candidate(&result.best);
        let improved = self.incumbent.offer(&self.evaluator, candidate);
        self.credit(Phase::LocalSearch, improved);
        self.report(Phase::LocalSearch);
    }

    fn finish(self, strategy: SweepStrategy, oracle: OracleStats) -> WaveResult {
        let elapsed = self.budget.elapsed();
        let best = self.incumbent.into_best();
        let (ratio, units) = best.as_ref().map_or((0.0, 0), |b| (b.ratio, b.units));

        match &best {
            Some(b) => info!(
                ratio,
                units,
                orders = b.candidate.orders().len(),
                aisles = b.candidate.aisles().len(),
                phase = ?self.phase,
                elapsed_ms = elapsed.as_millis() as u64,
                "wave run finished"
            ),
            None => info!(elapsed_ms = elapsed.as_millis() as u64, "wave run finished without a solution"),
        }

        WaveResult {
            best: best.map(|b| b.candidate),
            ratio,
            units,
            phase: self.phase,
            strategy,
            min_aisles: self.min_aisles,
            oracle,
            elapsed,
        }
    }
}
