//! Namespace registry.

use indexmap::IndexMap;

use crate::config;
use crate::error::Result;
use crate::model::DataElement;

/// A namespace and the elements that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    /// Output directory, relative to the site root.
    pub path: String,
    pub description: Option<String>,
    /// Fqns of member elements, in the order they were added.
    pub elements: Vec<String>,
}

impl Namespace {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: config::namespace_path(name),
            description: None,
            elements: Vec::new(),
        }
    }
}

/// Registry of namespaces in first-seen order.
///
/// Elements may name a namespace before its description has been read, so
/// namespaces are created on demand through [`NamespaceRegistry::ensure`].
#[derive(Debug, Default)]
pub struct NamespaceRegistry {
    namespaces: IndexMap<String, Namespace>,
}

impl NamespaceRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a namespace without creating it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Get a namespace, creating it if absent.
    ///
    /// Returns the namespace and whether it was created by this call.
    ///
    /// # Errors
    /// Returns `InvalidNamespace` if the name cannot be used as a directory.
    pub fn ensure(&mut self, name: &str) -> Result<(&mut Namespace, bool)> {
        config::validate_namespace(name)?;

        let created = !self.namespaces.contains_key(name);
        if created {
            tracing::debug!(namespace = %name, "Creating namespace");
        }
        let namespace = self
            .namespaces
            .entry(name.to_string())
            .or_insert_with(|| Namespace::new(name));
        Ok((namespace, created))
    }

    /// Record a description for a namespace.
    ///
    /// A description that is already set is kept; an empty one never
    /// replaces anything.
    pub fn describe(&mut self, name: &str, description: Option<&str>) -> Result<()> {
        let (namespace, _) = self.ensure(name)?;
        if namespace.description.is_none() {
            namespace.description = description
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string);
        }
        Ok(())
    }

    /// Append an element to its namespace, creating the namespace if needed.
    pub fn add_element(&mut self, element: &DataElement) -> Result<&Namespace> {
        let (namespace, _) = self.ensure(&element.namespace)?;
        namespace.elements.push(element.fqn.clone());
        Ok(&*namespace)
    }

    /// All namespaces in first-seen order.
    pub fn list(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}
