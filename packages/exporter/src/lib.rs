//! SHR Javadoc - Render SHR data-model definitions as Javadoc-style HTML.
//!
//! This crate loads a model file, resolves it with
//! [`shr_javadoc_engine`] and writes a static, frame-based documentation
//! site: one page per data element, two per namespace, and the overview
//! frames.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use shr_javadoc::{export, load_model, Compiler};
//!
//! let model = load_model(Path::new("shr.json"))?;
//! let doc = Compiler::new().document(model)?;
//! let summary = export(&doc, Path::new("out"))?;
//! println!("{} pages", summary.pages);
//! # Ok::<(), shr_javadoc::ExportError>(())
//! ```
//!
//! # Architecture
//!
//! - [`config`]: output file names and defaults
//! - [`error`]: error types and Result alias
//! - [`loader`]: JSON/YAML model loading
//! - [`render`]: handlebars templates and page contexts
//! - [`assets`]: static files embedded in the binary
//! - [`writer`]: atomic file writes
//! - [`export`]: the site export steps
//! - [`cli`]: command-line interface

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod render;
pub mod writer;

pub use error::{ExportError, Result};
pub use export::{export, ExportSummary, Exporter};
pub use loader::{load_model, ModelFormat};
pub use render::Renderer;
pub use shr_javadoc_engine::{Compiler, Documentation, Model};
