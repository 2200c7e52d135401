//! Registries of data elements and namespaces.
//!
//! Both registries iterate in insertion order so the generated pages follow
//! the order of the source model.

mod elements;
mod namespaces;

pub use elements::ElementRegistry;
pub use namespaces::{Namespace, NamespaceRegistry};
