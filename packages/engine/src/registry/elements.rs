//! Element registry keyed by fully-qualified name.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::config;
use crate::error::{EngineError, Result};
use crate::model::DataElement;

/// Registry of data elements, in model insertion order.
///
/// Elements are added once, then [`ElementRegistry::flatten`] computes every
/// element's ancestor chain. Constraint resolution refuses to run on a
/// registry that has not been flattened.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: IndexMap<String, DataElement>,
    /// Direct parent fqn to child fqns, in insertion order.
    children: HashMap<String, Vec<String>>,
    flattened: bool,
}

impl ElementRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element.
    ///
    /// # Errors
    /// * `InvalidElementName` if the name is not a plain identifier
    /// * `DuplicateElement` if the fqn is already registered
    /// * `AlreadyFlattened` once ancestor chains have been computed
    pub fn add(&mut self, element: DataElement) -> Result<()> {
        if self.flattened {
            return Err(EngineError::AlreadyFlattened);
        }
        config::validate_element_name(&element.name)?;
        if self.elements.contains_key(&element.fqn) {
            return Err(EngineError::DuplicateElement(element.fqn));
        }

        tracing::debug!(fqn = %element.fqn, "Adding data element");
        if let Some(parent) = &element.parent {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(element.fqn.clone());
        }
        self.elements.insert(element.fqn.clone(), element);
        Ok(())
    }

    /// Get an element that the model requires to exist.
    ///
    /// # Errors
    /// Returns `ElementNotFound` if no element has this fqn.
    pub fn get(&self, fqn: &str) -> Result<&DataElement> {
        self.elements
            .get(fqn)
            .ok_or_else(|| EngineError::ElementNotFound(fqn.to_string()))
    }

    /// Look up an element that may legitimately be absent.
    #[must_use]
    pub fn lookup(&self, fqn: &str) -> Option<&DataElement> {
        self.elements.get(fqn)
    }

    #[must_use]
    pub fn contains(&self, fqn: &str) -> bool {
        self.elements.contains_key(fqn)
    }

    /// All elements in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &DataElement> {
        self.elements.values()
    }

    /// Elements whose direct parent is `fqn`, in insertion order.
    pub fn children_of<'a>(&'a self, fqn: &str) -> impl Iterator<Item = &'a DataElement> + 'a {
        self.children
            .get(fqn)
            .into_iter()
            .flatten()
            .filter_map(move |child| self.elements.get(child))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn is_flattened(&self) -> bool {
        self.flattened
    }

    /// Compute every element's ancestor chain (closest ancestor first).
    ///
    /// # Errors
    /// * `AlreadyFlattened` on a second call
    /// * `ElementNotFound` if a parent fqn is not registered
    /// * `CycleDetected` if a parent chain loops
    /// * `DepthExceeded` if a chain is longer than [`config::MAX_HIERARCHY_DEPTH`]
    pub fn flatten(&mut self) -> Result<()> {
        if self.flattened {
            return Err(EngineError::AlreadyFlattened);
        }

        let mut hierarchies = Vec::with_capacity(self.elements.len());
        for fqn in self.elements.keys() {
            hierarchies.push(self.ancestors_of(fqn)?);
        }

        for (element, hierarchy) in self.elements.values_mut().zip(hierarchies) {
            element.hierarchy = hierarchy;
        }
        self.flattened = true;

        tracing::debug!(elements = self.elements.len(), "Element hierarchy flattened");
        Ok(())
    }

    /// Walk the parent chain of `fqn` with a visited set.
    fn ancestors_of(&self, fqn: &str) -> Result<Vec<String>> {
        let mut chain: Vec<String> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([fqn]);
        let mut current = self.get(fqn)?.parent.as_deref();

        while let Some(parent) = current {
            if !visited.insert(parent) {
                let mut path = Vec::with_capacity(chain.len() + 2);
                path.push(fqn.to_string());
                path.extend(chain);
                path.push(parent.to_string());
                return Err(EngineError::CycleDetected {
                    fqn: fqn.to_string(),
                    path,
                });
            }
            if chain.len() >= config::MAX_HIERARCHY_DEPTH {
                return Err(EngineError::DepthExceeded {
                    what: "Inheritance chain",
                    max: config::MAX_HIERARCHY_DEPTH,
                    at: fqn.to_string(),
                });
            }

            let element = self.get(parent)?;
            chain.push(parent.to_string());
            current = element.parent.as_deref();
        }

        Ok(chain)
    }
}
