//! 0/1 linear modeling layer and the exact-solver oracle interface.
//!
//! # Key Components
//!
//! - **Variables**: [`BoolVar`], addressed by [`VarId`]
//! - **Constraints**: [`LinearConstraint`] with optional lower/upper sides
//! - **Model**: [`MipModel`]: variables, constraints, [`Objective`]
//! - **Oracle**: [`Oracle`] trait, a blocking, time-limited exact solve
//!
//! # Design
//!
//! This module defines the modeling layer only. Branch-and-bound/cut
//! mechanics belong to the backend: [`EnumerationOracle`] is a small
//! built-in search for tests and tiny models; `ScipOracle` (feature
//! `scip`) delegates to SCIP.

mod model;
#[cfg(feature = "scip")]
mod scip;
mod solver;
mod variables;

pub use model::{LinearConstraint, MipModel, ModelError, Objective, Sense};
#[cfg(feature = "scip")]
pub use scip::ScipOracle;
pub use solver::{
    EnumerationOracle, Oracle, OracleConfig, OracleError, OracleSolution, OracleStatus,
};
pub use variables::{BoolVar, VarId};
