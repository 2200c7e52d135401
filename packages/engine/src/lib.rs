//! SHR Javadoc engine - resolve data-model constraints for documentation.
//!
//! This crate turns an SHR model (namespaces containing data elements with
//! fields, cardinalities and nested constraints) into the resolved view that
//! the HTML exporter renders. It performs no I/O beyond parsing strings.
//!
//! # Example
//!
//! ```
//! use shr_javadoc_engine::cardinality::format_card;
//!
//! assert_eq!(format_card(None), "0..*");
//! ```
//!
//! # Architecture
//!
//! - [`cardinality`]: cardinality values and their `min..max` display form
//! - [`model`]: the model document (namespaces, data elements, fields)
//! - [`registry`]: element and namespace registries, hierarchy flattening
//! - [`constraints`]: constraint trees and the per-field resolver
//! - [`assembler`]: per-element and per-namespace page data
//! - [`compile`]: build entry point with an explicit logging dispatcher
//! - [`config`]: limits and naming rules
//! - [`error`]: error types and Result alias

pub mod assembler;
pub mod cardinality;
pub mod compile;
pub mod config;
pub mod constraints;
pub mod error;
pub mod model;
pub mod registry;

// Re-export commonly used items
pub use assembler::{Documentation, ElementDoc, ElementRef, FieldDoc, NamespaceDoc};
pub use cardinality::{format_card, Cardinality};
pub use compile::{CompiledModel, Compiler};
pub use constraints::{resolve_field, ConstraintName, ConstraintTree, ResolvedConstraint};
pub use error::{EngineError, Result};
pub use model::{DataElement, Field, Model, ProjectInfo};
pub use registry::{ElementRegistry, NamespaceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
