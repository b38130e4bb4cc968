//! SCIP backend (feature `scip`).

use super::model::{MipModel, Sense};
use super::solver::{Oracle, OracleConfig, OracleError, OracleSolution, OracleStatus};
use russcip::prelude::*;
use russcip::{Status, Variable};
use std::time::Instant;

/// Oracle backed by the SCIP optimization suite via `russcip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScipOracle;

impl ScipOracle {
    pub fn new() -> Self {
        Self
    }
}

impl Oracle for ScipOracle {
    fn name(&self) -> &str {
        "scip"
    }

    fn solve(
        &self,
        model: &MipModel,
        config: &OracleConfig,
    ) -> Result<OracleSolution, OracleError> {
        model.validate()?;
        let start = Instant::now();

        let mut scip = Model::default();
        if !config.verbose {
            scip = scip.hide_output();
        }
        let scip = scip
            .set_real_param("limits/time", config.time_limit.as_secs_f64())
            .map_err(|e| OracleError::Backend(format!("{e:?}")))?;
        let mut scip = match model.objective.as_ref().map(|o| o.sense) {
            Some(Sense::Maximize) => scip.maximize(),
            _ => scip.minimize(),
        };

        let mut obj = vec![0.0; model.vars.len()];
        if let Some(o) = &model.objective {
            for &(v, c) in &o.terms {
                obj[v.0] += c as f64;
            }
        }
        let vars: Vec<Variable> = model
            .vars
            .iter()
            .zip(&obj)
            .map(|(v, &c)| scip.add(var().bin().obj(c).name(&v.name)))
            .collect();

        for c in &model.constraints {
            let terms = || c.terms.iter().map(|&(v, a)| (&vars[v.0], a as f64));
            match (c.lower, c.upper) {
                (Some(l), Some(u)) if l == u => {
                    scip.add(cons().name(&c.name).expr(terms()).eq(l as f64));
                }
                (lower, upper) => {
                    if let Some(l) = lower {
                        scip.add(cons().name(&c.name).expr(terms()).ge(l as f64));
                    }
                    if let Some(u) = upper {
                        scip.add(cons().name(&c.name).expr(terms()).le(u as f64));
                    }
                }
            }
        }

        let solved = scip.solve();
        let status = match solved.status() {
            Status::Optimal => OracleStatus::Optimal,
            Status::Infeasible => OracleStatus::Infeasible,
            Status::TimeLimit if solved.best_sol().is_some() => OracleStatus::TimeLimitFeasible,
            Status::TimeLimit => OracleStatus::TimeLimit,
            other => return Err(OracleError::Backend(format!("unexpected status {other:?}"))),
        };

        let mut solution = OracleSolution::empty(status);
        if let Some(best) = solved.best_sol() {
            solution.values = vars.iter().map(|v| best.val(v) > 0.5).collect();
            let constant = model.objective.as_ref().map_or(0, |o| o.constant) as f64;
            solution.objective_value = Some(solved.obj_val() + constant);
        }
        solution.solve_time = start.elapsed();
        Ok(solution)
    }
}
