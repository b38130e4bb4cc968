//! Constraint/model builder.
//!
//! Turns a [`Catalog`](crate::catalog::Catalog) plus subproblem parameters
//! (wave bounds, fixed or pinned selections) into a
//! [`MipModel`](crate::mip::MipModel). Purely declarative.

mod model_builder;

pub use model_builder::{BuiltModel, ModelBuilder, Scope};
