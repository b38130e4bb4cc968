//! Oracle interface and a built-in enumeration solver.

use super::model::{MipModel, ModelError, Sense};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Status reported by an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleStatus {
    /// Proven optimal assignment found.
    Optimal,
    /// Proven that no feasible assignment exists.
    Infeasible,
    /// Time limit reached with a feasible (unproven) incumbent.
    TimeLimitFeasible,
    /// Time limit reached without any feasible assignment.
    TimeLimit,
}

/// Why an oracle call could not run at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    #[error("model rejected: {0}")]
    ModelRejected(#[from] ModelError),
    #[error("oracle backend failure: {0}")]
    Backend(String),
}

/// Result of an oracle call.
#[derive(Debug, Clone)]
pub struct OracleSolution {
    pub status: OracleStatus,
    /// Objective value of the returned assignment (including the constant).
    pub objective_value: Option<f64>,
    /// Variable values, indexed by [`VarId`](super::VarId); empty if no
    /// assignment is available.
    pub values: Vec<bool>,
    pub solve_time: Duration,
}

impl OracleSolution {
    /// Creates a solution without an assignment.
    pub fn empty(status: OracleStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            solve_time: Duration::ZERO,
        }
    }

    /// Only a proven optimum is usable by the decomposition.
    pub fn is_optimal(&self) -> bool {
        self.status == OracleStatus::Optimal
    }
}

/// Per-call oracle settings.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OracleConfig {
    /// Wall-clock limit for this call.
    pub time_limit: Duration,
    /// Let the backend print its own progress log.
    pub verbose: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            verbose: false,
        }
    }
}

impl OracleConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// External exact solver for 0/1 linear models.
///
/// Calls block until the model is solved or `config.time_limit` elapses.
/// Implementations may parallelize internally.
pub trait Oracle {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Solves the model.
    fn solve(&self, model: &MipModel, config: &OracleConfig)
        -> Result<OracleSolution, OracleError>;
}

/// Depth-first branch and bound over boolean variables.
///
/// Prunes on constraint activity bounds and on the objective bound. Exact
/// and dependency-free, but exponential: meant for small models and tests.
#[derive(Debug, Clone)]
pub struct EnumerationOracle {
    /// Nodes between deadline checks.
    pub check_interval: u64,
}

impl EnumerationOracle {
    pub fn new() -> Self {
        Self {
            check_interval: 1024,
        }
    }
}

impl Default for EnumerationOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for EnumerationOracle {
    fn name(&self) -> &str {
        "enumeration"
    }

    fn solve(
        &self,
        model: &MipModel,
        config: &OracleConfig,
    ) -> Result<OracleSolution, OracleError> {
        model.validate()?;
        let start = Instant::now();
        let mut search = Search::new(model, start + config.time_limit, self.check_interval.max(1));

        if search.root_feasible() {
            search.run();
        }

        let status = match (search.timed_out, search.best.is_some()) {
            (false, true) => OracleStatus::Optimal,
            (false, false) => OracleStatus::Infeasible,
            (true, true) => OracleStatus::TimeLimitFeasible,
            (true, false) => OracleStatus::TimeLimit,
        };
        let mut solution = OracleSolution::empty(status);
        if let Some((_, values)) = search.best {
            solution.objective_value = model.objective.as_ref().map(|o| o.value(&values) as f64);
            solution.values = values;
        }
        solution.solve_time = start.elapsed();
        Ok(solution)
    }
}

/// One open node: `var` is being branched on, `tried` branches are done.
#[derive(Debug, Clone, Copy)]
struct Frame {
    var: usize,
    tried: u8,
}

struct Search<'m> {
    model: &'m MipModel,
    var_cons: Vec<Vec<(usize, i64)>>,
    activity: Vec<i64>,
    pos_rest: Vec<i64>,
    neg_rest: Vec<i64>,
    // objective in maximization form: sign * coef
    obj: Vec<i64>,
    obj_value: i64,
    obj_rest: i64,
    values: Vec<bool>,
    best: Option<(i64, Vec<bool>)>,
    deadline: Instant,
    check_interval: u64,
    nodes: u64,
    timed_out: bool,
}

impl<'m> Search<'m> {
    fn new(model: &'m MipModel, deadline: Instant, check_interval: u64) -> Self {
        let n = model.vars.len();
        let m = model.constraints.len();
        let mut var_cons = vec![Vec::new(); n];
        let mut pos_rest = vec![0; m];
        let mut neg_rest = vec![0; m];
        for (ci, c) in model.constraints.iter().enumerate() {
            for &(v, coef) in &c.terms {
                var_cons[v.0].push((ci, coef));
                if coef > 0 {
                    pos_rest[ci] += coef;
                } else {
                    neg_rest[ci] += coef;
                }
            }
        }

        let mut obj = vec![0; n];
        if let Some(o) = &model.objective {
            let sign = match o.sense {
                Sense::Maximize => 1,
                Sense::Minimize => -1,
            };
            for &(v, coef) in &o.terms {
                obj[v.0] += sign * coef;
            }
        }
        let obj_rest = obj.iter().filter(|&&c| c > 0).sum();

        Self {
            model,
            var_cons,
            activity: vec![0; m],
            pos_rest,
            neg_rest,
            obj,
            obj_value: 0,
            obj_rest,
            values: vec![false; n],
            best: None,
            deadline,
            check_interval,
            nodes: 0,
            timed_out: false,
        }
    }

    fn root_feasible(&self) -> bool {
        (0..self.model.constraints.len()).all(|ci| self.constraint_open(ci))
    }

    fn constraint_open(&self, ci: usize) -> bool {
        let c = &self.model.constraints[ci];
        let min = self.activity[ci] + self.neg_rest[ci];
        let max = self.activity[ci] + self.pos_rest[ci];
        c.upper.is_none_or(|u| min <= u) && c.lower.is_none_or(|l| max >= l)
    }

    /// Depth-first search over an explicit frame stack.
    fn run(&mut self) {
        let mut stack = Vec::with_capacity(self.values.len() + 1);
        if self.enter(0) {
            stack.push(Frame { var: 0, tried: 0 });
        }

        while let Some(top) = stack.len().checked_sub(1) {
            if self.timed_out {
                return;
            }
            let Frame { var, tried } = stack[top];
            if tried > 0 {
                self.unassign(var, self.branch(var, tried - 1));
            }
            if tried == 2 {
                stack.pop();
                continue;
            }

            let value = self.branch(var, tried);
            stack[top].tried += 1;
            if self.assign(var, value) && self.enter(var + 1) {
                stack.push(Frame {
                    var: var + 1,
                    tried: 0,
                });
            }
        }
    }

    /// Value tried on the `nth` branch of `var`: the objective-improving
    /// value first.
    fn branch(&self, var: usize, nth: u8) -> bool {
        let first = self.obj[var] > 0;
        if nth == 0 {
            first
        } else {
            !first
        }
    }

    /// Visits a node at `depth`; returns whether it needs branching.
    fn enter(&mut self, depth: usize) -> bool {
        if self.nodes % self.check_interval == 0 && Instant::now() >= self.deadline {
            self.timed_out = true;
        }
        self.nodes += 1;
        if self.timed_out {
            return false;
        }

        if let Some((best, _)) = &self.best {
            if self.obj_value + self.obj_rest <= *best {
                return false;
            }
        }

        if depth == self.values.len() {
            self.best = Some((self.obj_value, self.values.clone()));
            return false;
        }
        true
    }

    /// Assigns `var` and reports whether all touched constraints stay open.
    fn assign(&mut self, var: usize, value: bool) -> bool {
        let coef = self.obj[var];
        if coef > 0 {
            self.obj_rest -= coef;
        }
        if value {
            self.obj_value += coef;
            self.values[var] = true;
        }

        let mut open = true;
        for k in 0..self.var_cons[var].len() {
            let (ci, a) = self.var_cons[var][k];
            if a > 0 {
                self.pos_rest[ci] -= a;
            } else {
                self.neg_rest[ci] -= a;
            }
            if value {
                self.activity[ci] += a;
            }
            if open && !self.constraint_open(ci) {
                open = false;
            }
        }
        open
    }

    fn unassign(&mut self, var: usize, value: bool) {
        let coef = self.obj[var];
        if coef > 0 {
            self.obj_rest += coef;
        }
        if value {
            self.obj_value -= coef;
            self.values[var] = false;
        }
        for k in 0..self.var_cons[var].len() {
            let (ci, a) = self.var_cons[var][k];
            if a > 0 {
                self.pos_rest[ci] += a;
            } else {
                self.neg_rest[ci] += a;
            }
            if value {
                self.activity[ci] -= a;
            }
        }
    }
}
