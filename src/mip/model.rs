//! 0/1 linear model definition.

use super::variables::{BoolVar, VarId};
use thiserror::Error;

/// Structural problems detected by [`MipModel::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("constraint `{constraint}` references undefined variable {var}")]
    UndefinedVariable { constraint: String, var: usize },
    #[error("objective references undefined variable {0}")]
    UndefinedObjectiveVariable(usize),
    #[error("constraint `{constraint}` has empty range [{lower}, {upper}]")]
    EmptyRange {
        constraint: String,
        lower: i64,
        upper: i64,
    },
}

/// A linear constraint `lower <= Σ coef·x <= upper`.
///
/// Missing bounds are unbounded. Terms with a zero coefficient are never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, i64)>,
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl LinearConstraint {
    /// `Σ terms <= upper`.
    pub fn le(name: impl Into<String>, terms: Vec<(VarId, i64)>, upper: i64) -> Self {
        Self::range(name, terms, None, Some(upper))
    }

    /// `Σ terms >= lower`.
    pub fn ge(name: impl Into<String>, terms: Vec<(VarId, i64)>, lower: i64) -> Self {
        Self::range(name, terms, Some(lower), None)
    }

    /// `Σ terms == value`.
    pub fn eq(name: impl Into<String>, terms: Vec<(VarId, i64)>, value: i64) -> Self {
        Self::range(name, terms, Some(value), Some(value))
    }

    /// `lower <= Σ terms <= upper` with optional sides.
    pub fn range(
        name: impl Into<String>,
        mut terms: Vec<(VarId, i64)>,
        lower: Option<i64>,
        upper: Option<i64>,
    ) -> Self {
        terms.retain(|&(_, c)| c != 0);
        Self {
            name: name.into(),
            terms,
            lower,
            upper,
        }
    }

    /// Left-hand side value under a full assignment.
    pub fn activity(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(v, _)| values[v.0])
            .map(|&(_, c)| c)
            .sum()
    }

    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let a = self.activity(values);
        self.lower.is_none_or(|l| a >= l) && self.upper.is_none_or(|u| a <= u)
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Linear objective `constant + Σ coef·x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub sense: Sense,
    pub terms: Vec<(VarId, i64)>,
    pub constant: i64,
}

impl Objective {
    pub fn maximize(terms: Vec<(VarId, i64)>) -> Self {
        Self::new(Sense::Maximize, terms)
    }

    pub fn minimize(terms: Vec<(VarId, i64)>) -> Self {
        Self::new(Sense::Minimize, terms)
    }

    fn new(sense: Sense, mut terms: Vec<(VarId, i64)>) -> Self {
        terms.retain(|&(_, c)| c != 0);
        Self {
            sense,
            terms,
            constant: 0,
        }
    }

    /// Adds a constant offset.
    pub fn with_constant(mut self, constant: i64) -> Self {
        self.constant = constant;
        self
    }

    pub fn value(&self, values: &[bool]) -> i64 {
        self.constant
            + self
                .terms
                .iter()
                .filter(|(v, _)| values[v.0])
                .map(|&(_, c)| c)
                .sum::<i64>()
    }
}

/// A 0/1 linear program: boolean variables, linear constraints and an
/// optional objective (feasibility problem if absent).
///
/// # Examples
///
/// ```
/// use u_wave::mip::{LinearConstraint, MipModel, Objective};
///
/// let mut model = MipModel::new("knapsack");
/// let a = model.add_bool_var("a");
/// let b = model.add_bool_var("b");
/// model.add_constraint(LinearConstraint::le("cap", vec![(a, 3), (b, 4)], 5));
/// model.set_objective(Objective::maximize(vec![(a, 2), (b, 3)]));
/// assert!(model.validate().is_ok());
/// assert_eq!(model.var_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MipModel {
    pub name: String,
    pub vars: Vec<BoolVar>,
    pub constraints: Vec<LinearConstraint>,
    pub objective: Option<Objective>,
}

impl MipModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a boolean variable and returns its handle.
    pub fn add_bool_var(&mut self, name: impl Into<String>) -> VarId {
        self.vars.push(BoolVar::new(name));
        VarId(self.vars.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Checks that every referenced variable exists and every range is
    /// non-empty.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.vars.len();
        for c in &self.constraints {
            if let Some(&(v, _)) = c.terms.iter().find(|(v, _)| v.0 >= n) {
                return Err(ModelError::UndefinedVariable {
                    constraint: c.name.clone(),
                    var: v.0,
                });
            }
            if let (Some(lower), Some(upper)) = (c.lower, c.upper) {
                if lower > upper {
                    return Err(ModelError::EmptyRange {
                        constraint: c.name.clone(),
                        lower,
                        upper,
                    });
                }
            }
        }
        if let Some(obj) = &self.objective {
            if let Some(&(v, _)) = obj.terms.iter().find(|(v, _)| v.0 >= n) {
                return Err(ModelError::UndefinedObjectiveVariable(v.0));
            }
        }
        Ok(())
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Whether a full assignment satisfies every constraint.
    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.vars.len() && self.constraints.iter().all(|c| c.is_satisfied(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_coefficients_dropped() {
        let c = LinearConstraint::le("c", vec![(VarId(0), 0), (VarId(1), 2)], 4);
        assert_eq!(c.terms, vec![(VarId(1), 2)]);
        let o = Objective::minimize(vec![(VarId(0), 0)]);
        assert!(o.terms.is_empty());
    }

    #[test]
    fn test_activity_and_satisfaction() {
        let c = LinearConstraint::range("r", vec![(VarId(0), 3), (VarId(1), -2)], Some(0), Some(2));
        assert_eq!(c.activity(&[true, true]), 1);
        assert!(c.is_satisfied(&[true, true]));
        assert!(!c.is_satisfied(&[true, false]));
        assert!(!c.is_satisfied(&[false, true]));
    }

    #[test]
    fn test_undefined_variable() {
        let mut model = MipModel::new("m");
        model.add_bool_var("x");
        model.add_constraint(LinearConstraint::le("bad", vec![(VarId(3), 1)], 1));
        assert_eq!(
            model.validate(),
            Err(ModelError::UndefinedVariable {
                constraint: "bad".into(),
                var: 3
            })
        );
    }

    #[test]
    fn test_empty_range() {
        let mut model = MipModel::new("m");
        let x = model.add_bool_var("x");
        model.add_constraint(LinearConstraint::range("r", vec![(x, 1)], Some(2), Some(1)));
        assert!(matches!(model.validate(), Err(ModelError::EmptyRange { .. })));
    }

    #[test]
    fn test_objective_value_with_constant() {
        let o = Objective::maximize(vec![(VarId(0), 4), (VarId(1), 1)]).with_constant(10);
        assert_eq!(o.value(&[true, false]), 14);
        assert_eq!(o.value(&[false, false]), 10);
    }

    #[test]
    fn test_undefined_objective_variable() {
        let mut model = MipModel::new("m");
        model.set_objective(Objective::maximize(vec![(VarId(0), 1)]));
        assert_eq!(
            model.validate(),
            Err(ModelError::UndefinedObjectiveVariable(0))
        );
    }
}
