//! Data model loader
//!
//! Deserializes the canonical JSON export of an SHR data model: project
//! metadata, a namespace table and a flat list of data elements. YAML
//! documents with the same shape are accepted too.
//!
//! # Example
//!
//! ```
//! use shr_javadoc_engine::Model;
//!
//! let model = Model::from_json_str(r#"{
//!     "namespaces": { "shr.core": { "description": "Core types" } },
//!     "dataElements": [
//!         { "fqn": "shr.core.Quantity", "name": "Quantity", "namespace": "shr.core" }
//!     ]
//! }"#).unwrap();
//! assert_eq!(model.data_elements.len(), 1);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cardinality::Cardinality;
use crate::config;
use crate::constraints::ConstraintTree;
use crate::error::{EngineError, Result};

/// Top-level model document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(default)]
    pub project_info: ProjectInfo,
    /// Namespace name to namespace description, in document order.
    #[serde(default)]
    pub namespaces: IndexMap<String, NamespaceDef>,
    #[serde(default)]
    pub data_elements: Vec<DataElement>,
}

impl Model {
    /// Parse a model from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        check_size(json.len())?;
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a model from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        check_size(yaml.len())?;
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

fn check_size(len: usize) -> Result<()> {
    if len > config::MAX_MODEL_SIZE {
        return Err(EngineError::LoadError(format!(
            "model document is {len} bytes, maximum is {} bytes",
            config::MAX_MODEL_SIZE
        )));
    }
    Ok(())
}

/// Project metadata shown in page headers and footers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Any further keys are passed through to the templates untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Namespace entry of the model document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NamespaceDef {
    #[serde(default)]
    pub description: Option<String>,
}

/// A coded concept attached to a data element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// How a field came to be present on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inheritance {
    /// Declared by an ancestor, unchanged here.
    Inherited,
    /// Declared by an ancestor, constrained further here.
    Overridden,
}

/// A named, typed, cardinality-bounded member of a data element.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    /// Fqn of the field's own type.
    #[serde(default)]
    pub fqn: Option<String>,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub card: Option<Cardinality>,
    #[serde(default)]
    pub constraints: Option<ConstraintTree>,
    /// Namespace path of the field's type page.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub inheritance: Option<Inheritance>,
    #[serde(default)]
    pub inherited_from: Option<String>,
}

impl Field {
    /// Create a plain field with no cardinality and no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: Cardinality) -> Self {
        self.card = Some(card);
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: ConstraintTree) -> Self {
        self.constraints = Some(constraints);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn as_ref_value(mut self) -> Self {
        self.value_type = Some(config::REF_VALUE_TYPE.to_string());
        self
    }

    #[must_use]
    pub fn inherited_from(mut self, fqn: impl Into<String>) -> Self {
        self.inheritance = Some(Inheritance::Inherited);
        self.inherited_from = Some(fqn.into());
        self
    }

    /// Whether the field holds a reference to another element.
    #[must_use]
    pub fn is_ref(&self) -> bool {
        self.value_type.as_deref() == Some(config::REF_VALUE_TYPE)
    }

    /// Whether the field is present only because an ancestor declares it.
    #[must_use]
    pub fn is_inherited(&self) -> bool {
        self.inheritance.is_some()
    }

    /// Display name of the field's type, decorated for references.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_ref() {
            format!("ref({})", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// A named, namespaced type definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElement {
    pub fqn: String,
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// Direct parent fqn; at most one.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub value: Option<Field>,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Ancestor fqns, closest first. Computed by `ElementRegistry::flatten`.
    #[serde(skip)]
    pub hierarchy: Vec<String>,
    /// Output directory of the owning namespace.
    #[serde(skip)]
    pub namespace_path: String,
}

impl DataElement {
    /// Create an element in `namespace` named `name`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        Self {
            fqn: format!("{namespace}.{name}"),
            namespace_path: config::namespace_path(&namespace),
            name,
            namespace,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parent(mut self, fqn: impl Into<String>) -> Self {
        self.parent = Some(fqn.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Field) -> Self {
        self.value = Some(value);
        self
    }

    /// Relative link to this element's page.
    #[must_use]
    pub fn href(&self) -> String {
        config::element_href(&self.namespace_path, &self.name)
    }

    /// File name of this element's page inside its namespace directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.html", self.name)
    }
}
