//! Build entry point: model document in, resolved documentation out.
//!
//! # Example
//!
//! ```
//! use shr_javadoc_engine::{Compiler, Model};
//!
//! let model = Model::from_json_str(r#"{
//!     "namespaces": { "shr.core": {} },
//!     "dataElements": [
//!         { "fqn": "shr.core.Quantity", "name": "Quantity", "namespace": "shr.core",
//!           "fields": [ { "name": "Units", "card": { "min": 0, "max": 1 } } ] }
//!     ]
//! }"#).unwrap();
//!
//! let doc = Compiler::new().document(model).unwrap();
//! assert_eq!(doc.elements[0].fields[0].constraints[1].value, "0..1");
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::Dispatch;

use crate::assembler::{assemble, Documentation};
use crate::error::{EngineError, Result};
use crate::model::{Model, ProjectInfo};
use crate::registry::{ElementRegistry, NamespaceRegistry};

/// A loaded model: registries filled and ancestor chains flattened.
#[derive(Debug)]
pub struct CompiledModel {
    pub project: ProjectInfo,
    pub elements: ElementRegistry,
    pub namespaces: NamespaceRegistry,
}

impl CompiledModel {
    /// Fill the registries from a model document and flatten the hierarchy.
    ///
    /// Namespace descriptions are read first, then every data element is
    /// added to the element registry and to its (possibly new) namespace.
    ///
    /// Every namespace must own its output directory and every element its
    /// page file; a clash is `OutputPathClash`.
    pub fn from_model(model: Model) -> Result<Self> {
        tracing::info!(
            namespaces = model.namespaces.len(),
            elements = model.data_elements.len(),
            "Compiling documentation"
        );

        let mut namespaces = NamespaceRegistry::new();
        for (name, definition) in &model.namespaces {
            namespaces.describe(name, definition.description.as_deref())?;
        }

        let mut elements = ElementRegistry::new();
        let mut pages = OutputPaths::default();
        for mut element in model.data_elements {
            let namespace = namespaces.add_element(&element)?;
            element.namespace_path = namespace.path.clone();
            let page = format!("{}/{}", element.namespace_path, element.file_name());
            let fqn = element.fqn.clone();
            elements.add(element)?;
            pages.claim(page, &fqn)?;
        }

        let mut directories = OutputPaths::default();
        for namespace in namespaces.list() {
            directories.claim(namespace.path.clone(), &namespace.name)?;
        }

        elements.flatten()?;

        Ok(Self {
            project: model.project_info,
            elements,
            namespaces,
        })
    }

    /// Resolve every element into page data.
    pub fn assemble(&self) -> Result<Documentation> {
        assemble(&self.project, &self.elements, &self.namespaces)
    }
}

/// Relative output paths already taken, with the name of their owner.
#[derive(Debug, Default)]
struct OutputPaths {
    claimed: HashMap<String, String>,
}

impl OutputPaths {
    fn claim(&mut self, path: String, owner: &str) -> Result<()> {
        match self.claimed.entry(path) {
            Entry::Occupied(entry) => Err(EngineError::OutputPathClash {
                path: entry.key().clone(),
                first: entry.get().clone(),
                second: owner.to_string(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(owner.to_string());
                Ok(())
            }
        }
    }
}

/// Runs compilation, optionally under an explicit tracing dispatcher.
///
/// Without a dispatcher, events go to whatever subscriber is current for the
/// calling thread.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    dispatch: Option<Dispatch>,
}

impl Compiler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send all events emitted during compilation to `dispatch`.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Load the model into flattened registries.
    pub fn compile(&self, model: Model) -> Result<CompiledModel> {
        self.scoped(|| CompiledModel::from_model(model))
    }

    /// Load the model and resolve it into documentation.
    pub fn document(&self, model: Model) -> Result<Documentation> {
        self.scoped(|| CompiledModel::from_model(model)?.assemble())
    }

    fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}
