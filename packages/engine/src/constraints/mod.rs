//! Constraint trees and their resolution into display rows.
//!
//! - [`types`]: the declared constraint tree, one enum variant per tag
//! - [`resolved`]: the rows produced for the output layer
//! - [`resolver`]: the per-field resolution walk

mod resolved;
mod resolver;
pub mod types;

pub use resolved::{ConstraintName, Override, ResolvedConstraint};
pub use resolver::{resolve_field, ConstraintResolver, Resolution};
pub use types::{
    CardConstraint, Constraint, ConstraintTree, FixedValueConstraint, IncludesCodeItem,
    IncludesTypeItem, TypeConstraint, ValueSetConstraint,
};
