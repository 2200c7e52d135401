//! Document assembly.
//!
//! Walks every namespace and element of a flattened registry, resolves the
//! constraints of each field and produces the serializable view the output
//! layer renders. Nothing here touches the filesystem.

use serde::Serialize;

use crate::cardinality::format_card;
use crate::constraints::{resolve_field, ResolvedConstraint};
use crate::error::Result;
use crate::model::{Concept, DataElement, Field, Inheritance, ProjectInfo};
use crate::registry::{ElementRegistry, Namespace, NamespaceRegistry};

/// Link to an element page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRef {
    pub fqn: String,
    pub name: String,
    pub namespace: String,
    pub href: String,
}

impl From<&DataElement> for ElementRef {
    fn from(element: &DataElement) -> Self {
        Self {
            fqn: element.fqn.clone(),
            name: element.name.clone(),
            namespace: element.namespace.clone(),
            href: element.href(),
        }
    }
}

/// A field with its resolved constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDoc {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqn: Option<String>,
    pub card: String,
    pub is_ref: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<Inheritance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<ElementRef>,
    pub constraints: Vec<ResolvedConstraint>,
}

/// Everything the element page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDoc {
    pub fqn: String,
    pub name: String,
    pub namespace: String,
    pub namespace_path: String,
    pub file_name: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_abstract: bool,
    pub is_entry: bool,
    pub concepts: Vec<Concept>,
    /// Ancestors, closest first.
    pub hierarchy: Vec<ElementRef>,
    /// Elements naming this one as their direct parent.
    pub children: Vec<ElementRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldDoc>,
    pub fields: Vec<FieldDoc>,
    pub inherited_fields: Vec<FieldDoc>,
}

/// Namespace page data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceDoc {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub elements: Vec<ElementRef>,
}

/// Fully resolved documentation for a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    pub project: ProjectInfo,
    pub namespaces: Vec<NamespaceDoc>,
    pub elements: Vec<ElementDoc>,
    /// Non-fatal problems found during resolution.
    pub warnings: Vec<String>,
}

impl Documentation {
    /// Elements listed in the "all classes" frame: those with at least one
    /// ancestor.
    pub fn all_classes(&self) -> impl Iterator<Item = &ElementDoc> {
        self.elements.iter().filter(|e| !e.hierarchy.is_empty())
    }

    #[must_use]
    pub fn element(&self, fqn: &str) -> Option<&ElementDoc> {
        self.elements.iter().find(|e| e.fqn == fqn)
    }

    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&NamespaceDoc> {
        self.namespaces.iter().find(|n| n.name == name)
    }
}

/// Resolve every element of a flattened registry.
///
/// # Errors
/// Any resolution error aborts assembly; no partial documentation is
/// returned.
pub fn assemble(
    project: &ProjectInfo,
    elements: &ElementRegistry,
    namespaces: &NamespaceRegistry,
) -> Result<Documentation> {
    tracing::info!(
        namespaces = namespaces.len(),
        elements = elements.len(),
        "Assembling documentation"
    );

    let mut warnings = Vec::new();

    let namespace_docs = namespaces
        .list()
        .map(|namespace| namespace_doc(namespace, elements))
        .collect::<Result<Vec<_>>>()?;

    let element_docs = elements
        .list()
        .map(|element| element_doc(element, elements, &mut warnings))
        .collect::<Result<Vec<_>>>()?;

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Documentation assembled with warnings");
    }

    Ok(Documentation {
        project: project.clone(),
        namespaces: namespace_docs,
        elements: element_docs,
        warnings,
    })
}

fn namespace_doc(namespace: &Namespace, elements: &ElementRegistry) -> Result<NamespaceDoc> {
    let members = namespace
        .elements
        .iter()
        .map(|fqn| elements.get(fqn).map(ElementRef::from))
        .collect::<Result<Vec<_>>>()?;

    Ok(NamespaceDoc {
        name: namespace.name.clone(),
        path: namespace.path.clone(),
        description: namespace.description.clone(),
        elements: members,
    })
}

/// Assemble the page data of one element.
pub fn element_doc(
    element: &DataElement,
    elements: &ElementRegistry,
    warnings: &mut Vec<String>,
) -> Result<ElementDoc> {
    tracing::debug!(fqn = %element.fqn, fields = element.fields.len(), "Resolving element");

    let hierarchy = element
        .hierarchy
        .iter()
        .map(|fqn| elements.get(fqn).map(ElementRef::from))
        .collect::<Result<Vec<_>>>()?;
    let children = elements
        .children_of(&element.fqn)
        .map(ElementRef::from)
        .collect();

    let value = element
        .value
        .as_ref()
        .map(|field| field_doc(field, element, elements, warnings))
        .transpose()?;

    let mut fields = Vec::new();
    let mut inherited_fields = Vec::new();
    for field in &element.fields {
        let doc = field_doc(field, element, elements, warnings)?;
        if field.is_inherited() {
            inherited_fields.push(doc);
        } else {
            fields.push(doc);
        }
    }

    Ok(ElementDoc {
        fqn: element.fqn.clone(),
        name: element.name.clone(),
        namespace: element.namespace.clone(),
        namespace_path: element.namespace_path.clone(),
        file_name: element.file_name(),
        href: element.href(),
        description: element.description.clone(),
        is_abstract: element.is_abstract,
        is_entry: element.is_entry,
        concepts: element.concepts.clone(),
        hierarchy,
        children,
        value,
        fields,
        inherited_fields,
    })
}

fn field_doc(
    field: &Field,
    owner: &DataElement,
    elements: &ElementRegistry,
    warnings: &mut Vec<String>,
) -> Result<FieldDoc> {
    let resolution = resolve_field(field, owner, elements, field.is_inherited())?;
    warnings.extend(resolution.warnings);

    let inherited_from = field
        .inherited_from
        .as_deref()
        .map(|fqn| elements.get(fqn).map(ElementRef::from))
        .transpose()?;

    Ok(FieldDoc {
        name: field.name.clone(),
        fqn: field.fqn.clone(),
        card: format_card(field.card.as_ref()),
        is_ref: field.is_ref(),
        inheritance: field.inheritance,
        inherited_from,
        constraints: resolution.constraints,
    })
}
