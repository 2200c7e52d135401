//! Resolution of one field's declared constraints into display rows.
//!
//! The resolver walks the field's constraint tree in declaration order and
//! emits one [`ResolvedConstraint`] per effective constraint. Fields declared
//! on the element itself (not inherited) first get a reserved DataType and
//! Cardinality pair; a top-level `type` constraint narrows that reserved
//! DataType instead of adding a row.

use indexmap::IndexMap;

use crate::cardinality::format_card;
use crate::config;
use crate::error::{EngineError, Result};
use crate::model::{DataElement, Field};
use crate::registry::ElementRegistry;

use super::resolved::{ConstraintName, Override, ResolvedConstraint};
use super::types::{
    CardConstraint, Constraint, ConstraintTree, FixedValueConstraint, IncludesCodeItem,
    IncludesTypeItem, TypeConstraint, ValueSetConstraint,
};

/// Output of resolving one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub constraints: Vec<ResolvedConstraint>,
    /// Non-fatal problems, such as skipped constraint tags.
    pub warnings: Vec<String>,
}

/// Reserved DataType/Cardinality rows of a non-inherited field.
#[derive(Debug)]
struct Baseline {
    data_type: ResolvedConstraint,
    cardinality: ResolvedConstraint,
}

/// Resolve the effective constraints of `field` as declared on `owner`.
///
/// `inherited` is true when the field is present on `owner` only because an
/// ancestor declares it.
///
/// # Errors
/// * `NotFlattened` if the registry's ancestor chains were not computed yet
/// * `ElementNotFound` if a narrowed type, sub-type or `lastModifiedBy`
///   fqn is missing from the registry
/// * `UnsupportedFixedValue` / `MalformedFixedValue` for fixed values
///   that cannot be rendered
pub fn resolve_field(
    field: &Field,
    owner: &DataElement,
    elements: &ElementRegistry,
    inherited: bool,
) -> Result<Resolution> {
    ConstraintResolver::new(field, owner, elements, inherited)?.resolve()
}

/// Single-use resolver for one field.
pub struct ConstraintResolver<'a> {
    field: &'a Field,
    owner: &'a DataElement,
    elements: &'a ElementRegistry,
    inherited: bool,
    baseline: Option<Baseline>,
    rows: Vec<ResolvedConstraint>,
    warnings: Vec<String>,
}

impl<'a> ConstraintResolver<'a> {
    pub fn new(
        field: &'a Field,
        owner: &'a DataElement,
        elements: &'a ElementRegistry,
        inherited: bool,
    ) -> Result<Self> {
        if !elements.is_flattened() {
            return Err(EngineError::NotFlattened);
        }
        Ok(Self {
            field,
            owner,
            elements,
            inherited,
            baseline: None,
            rows: Vec::new(),
            warnings: Vec::new(),
        })
    }

    /// Run the resolution and return the ordered rows.
    pub fn resolve(mut self) -> Result<Resolution> {
        if !self.inherited {
            self.baseline = Some(self.baseline_rows());
        }

        let field = self.field;
        if let Some(tree) = field.constraints.as_ref() {
            self.resolve_tree(tree, &field.name, 0)?;
        }

        Ok(self.finish())
    }

    fn baseline_rows(&self) -> Baseline {
        let path = self.field.name.as_str();
        let href = self
            .field
            .path
            .as_deref()
            .map(|p| config::element_href(p, &self.field.name));

        Baseline {
            data_type: self
                .row(ConstraintName::DataType, self.field.display_name(), path)
                .with_href(href),
            cardinality: self.row(
                ConstraintName::Cardinality,
                format_card(self.field.card.as_ref()),
                path,
            ),
        }
    }

    fn resolve_tree(&mut self, tree: &ConstraintTree, subpath: &str, depth: usize) -> Result<()> {
        if depth > config::MAX_SUBPATH_DEPTH {
            return Err(EngineError::DepthExceeded {
                what: "Sub-path nesting",
                max: config::MAX_SUBPATH_DEPTH,
                at: format!("{}.{}", self.owner.fqn, subpath),
            });
        }

        for constraint in tree.iter() {
            self.dispatch(constraint, subpath, depth)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, constraint: &Constraint, subpath: &str, depth: usize) -> Result<()> {
        match constraint {
            Constraint::IncludesType(items) => self.includes_type(items, subpath),
            Constraint::IncludesCode(items) => self.includes_code(items, subpath),
            Constraint::ValueSet(value_set) => self.value_set(value_set, subpath),
            Constraint::Subpaths(paths) => self.subpaths(paths, subpath, depth),
            Constraint::Type(type_constraint) => self.type_constraint(type_constraint, subpath),
            Constraint::FixedValue(fixed) => self.fixed_value(fixed, subpath),
            Constraint::Card(card) => self.card(card, subpath),
            Constraint::Unrecognized { tag } => {
                self.unrecognized(tag, subpath);
                Ok(())
            }
        }
    }

    fn includes_type(&mut self, items: &[IncludesTypeItem], subpath: &str) -> Result<()> {
        let elements = self.elements;
        for item in items {
            let sub_type = elements.get(&item.fqn)?;
            let value = format!("{} {}", format_card(item.card.as_ref()), item.fqn);
            let row = self
                .row(ConstraintName::IncludesType, value, subpath)
                .with_href(Some(sub_type.href()));
            self.push(row, item.last_modified_by.as_deref())?;
        }
        Ok(())
    }

    fn includes_code(&mut self, items: &[IncludesCodeItem], subpath: &str) -> Result<()> {
        for item in items {
            let system = item.system.as_deref().unwrap_or("");
            let value = format!("{system}#{}", item.code);
            let row = self.row(ConstraintName::IncludesCode, value, subpath);
            self.push(row, item.last_modified_by.as_deref())?;
        }
        Ok(())
    }

    fn value_set(&mut self, value_set: &ValueSetConstraint, subpath: &str) -> Result<()> {
        let binding = value_set
            .binding_strength
            .as_deref()
            .map(|strength| format!("({strength})"));
        let row = self
            .row(ConstraintName::ValueSet, value_set.uri.as_str(), subpath)
            .with_href(Some(value_set.uri.clone()))
            .with_binding(binding);
        self.push(row, value_set.last_modified_by.as_deref())
    }

    fn subpaths(
        &mut self,
        paths: &IndexMap<String, ConstraintTree>,
        subpath: &str,
        depth: usize,
    ) -> Result<()> {
        let elements = self.elements;
        for (segment, tree) in paths {
            // Segments that are not element fqns leave the path untouched.
            let path = match elements.lookup(segment) {
                Some(element) if subpath.is_empty() => element.name.clone(),
                Some(element) => format!("{subpath}.{}", element.name),
                None => subpath.to_string(),
            };
            self.resolve_tree(tree, &path, depth + 1)?;
        }
        Ok(())
    }

    fn type_constraint(&mut self, constraint: &TypeConstraint, subpath: &str) -> Result<()> {
        let target = self.elements.get(&constraint.fqn)?;
        let name = target.name.clone();
        let href = target.href();

        if subpath == self.field.name && !self.inherited {
            if let Some(baseline) = self.baseline.as_mut() {
                baseline.data_type.value = name;
                baseline.data_type.href = Some(href);
                return Ok(());
            }
        }

        let row = self
            .row(ConstraintName::DataType, name, subpath)
            .with_href(Some(href));
        self.push(row, constraint.last_modified_by.as_deref())
    }

    fn fixed_value(&mut self, constraint: &FixedValueConstraint, subpath: &str) -> Result<()> {
        let value = self.fixed_value_text(constraint)?;
        let row = self.row(ConstraintName::FixedValue, value, subpath);
        self.push(row, constraint.last_modified_by.as_deref())
    }

    fn fixed_value_text(&self, constraint: &FixedValueConstraint) -> Result<String> {
        let malformed = |reason: &str| EngineError::MalformedFixedValue {
            kind: constraint.kind.clone(),
            field: format!("{}.{}", self.owner.fqn, self.field.name),
            reason: reason.to_string(),
        };

        match constraint.kind.as_str() {
            "code" => {
                let code = constraint
                    .value
                    .get("code")
                    .and_then(serde_json::Value::as_str)
                    .ok_or_else(|| malformed("missing 'code'"))?;
                let system = constraint
                    .value
                    .get("system")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("");
                Ok(format!("{system}#{code}"))
            }
            "boolean" => constraint
                .value
                .as_bool()
                .map(|b| b.to_string())
                .ok_or_else(|| malformed("value is not a boolean")),
            other => Err(EngineError::UnsupportedFixedValue {
                kind: other.to_string(),
                field: format!("{}.{}", self.owner.fqn, self.field.name),
            }),
        }
    }

    fn card(&mut self, card: &CardConstraint, subpath: &str) -> Result<()> {
        let value = format_card(Some(&card.cardinality()));
        let row = self.row(ConstraintName::Cardinality, value, subpath);
        self.push(row, card.last_modified_by.as_deref())
    }

    fn unrecognized(&mut self, tag: &str, subpath: &str) {
        tracing::warn!(
            tag = %tag,
            element = %self.owner.fqn,
            path = %subpath,
            "Unrecognized constraint tag, skipping"
        );
        self.warnings.push(format!(
            "{}: unrecognized constraint tag '{tag}' at {subpath}",
            self.owner.fqn
        ));
    }

    /// New row sourced from this field, linked to the owning element.
    fn row(&self, name: ConstraintName, value: impl Into<String>, path: &str) -> ResolvedConstraint {
        let mut row = ResolvedConstraint::new(name, self.field.name.as_str(), value, path);
        row.source_href = Some(self.owner.href());
        row
    }

    fn push(&mut self, mut row: ResolvedConstraint, last_modified_by: Option<&str>) -> Result<()> {
        if let Some(fqn) = last_modified_by {
            row.overridden_by = Some(Override::from(self.elements.get(fqn)?));
        }
        self.rows.push(row);
        Ok(())
    }

    fn finish(self) -> Resolution {
        let mut constraints = Vec::with_capacity(self.rows.len() + 2);
        if let Some(baseline) = self.baseline {
            constraints.push(baseline.data_type);
            constraints.push(baseline.cardinality);
        }
        constraints.extend(self.rows);

        Resolution {
            constraints,
            warnings: self.warnings,
        }
    }
}
