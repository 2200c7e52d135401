//! Resolved constraint rows handed to the output layer.

use std::fmt;

use serde::Serialize;

use crate::model::DataElement;

/// Human label of a resolved constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintName {
    #[serde(rename = "DataType")]
    DataType,
    #[serde(rename = "Cardinality")]
    Cardinality,
    #[serde(rename = "Includes Type")]
    IncludesType,
    #[serde(rename = "Includes Code")]
    IncludesCode,
    #[serde(rename = "Value Set")]
    ValueSet,
    #[serde(rename = "Fixed Value")]
    FixedValue,
}

impl ConstraintName {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataType => "DataType",
            Self::Cardinality => "Cardinality",
            Self::IncludesType => "Includes Type",
            Self::IncludesCode => "Includes Code",
            Self::ValueSet => "Value Set",
            Self::FixedValue => "Fixed Value",
        }
    }
}

impl fmt::Display for ConstraintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ancestor element that last modified a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Override {
    pub name: String,
    pub href: String,
}

impl From<&DataElement> for Override {
    fn from(element: &DataElement) -> Self {
        Self {
            name: element.name.clone(),
            href: element.href(),
        }
    }
}

/// One effective constraint on a field or one of its sub-paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConstraint {
    pub name: ConstraintName,
    /// Name of the field the constraint was resolved for.
    pub source: String,
    pub value: String,
    /// Dotted path of the (possibly nested) target.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Link to the element performing the resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub overridden_by: Option<Override>,
}

impl ResolvedConstraint {
    #[must_use]
    pub fn new(
        name: ConstraintName,
        source: impl Into<String>,
        value: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name,
            source: source.into(),
            value: value.into(),
            path: path.into(),
            href: None,
            source_href: None,
            binding: None,
            overridden_by: None,
        }
    }

    #[must_use]
    pub fn with_href(mut self, href: Option<String>) -> Self {
        self.href = href;
        self
    }

    #[must_use]
    pub fn with_binding(mut self, binding: Option<String>) -> Self {
        self.binding = binding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names() {
        let row = ResolvedConstraint::new(
            ConstraintName::IncludesType,
            "Units",
            "0..1 shr.core.Coding",
            "Units",
        );
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["name"], "Includes Type");
        assert_eq!(json["path"], "Units");
        assert!(json.get("href").is_none());
        assert!(json.get("override").is_none());
    }

    #[test]
    fn test_override_from_element() {
        let element = DataElement::new("shr.base", "Entry");
        let over = Override::from(&element);
        assert_eq!(over.name, "Entry");
        assert_eq!(over.href, "../shr_base/Entry.html");
    }

    #[test]
    fn test_display() {
        assert_eq!(ConstraintName::ValueSet.to_string(), "Value Set");
        assert_eq!(ConstraintName::FixedValue.to_string(), "Fixed Value");
    }
}
