//! Constraint trees as declared in the model.
//!
//! A constraint tree is an ordered map from constraint tag to payload. Tag
//! order is significant: resolved constraints are emitted in the order the
//! tags appear in the source document, so the tree is deserialized into a
//! list rather than a hash map.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::cardinality::Cardinality;

pub const INCLUDES_TYPE: &str = "includesType";
pub const INCLUDES_CODE: &str = "includesCode";
pub const VALUE_SET: &str = "valueSet";
pub const SUBPATHS: &str = "subpaths";
pub const TYPE: &str = "type";
pub const FIXED_VALUE: &str = "fixedValue";
pub const CARD: &str = "card";

/// One tagged entry of a constraint tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    IncludesType(Vec<IncludesTypeItem>),
    IncludesCode(Vec<IncludesCodeItem>),
    ValueSet(ValueSetConstraint),
    /// Nested constraints keyed by sub-path segment (usually an fqn).
    Subpaths(IndexMap<String, ConstraintTree>),
    Type(TypeConstraint),
    FixedValue(FixedValueConstraint),
    Card(CardConstraint),
    /// A tag this resolver does not know. The payload is discarded.
    Unrecognized { tag: String },
}

impl Constraint {
    /// The tag this constraint was declared under.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::IncludesType(_) => INCLUDES_TYPE,
            Self::IncludesCode(_) => INCLUDES_CODE,
            Self::ValueSet(_) => VALUE_SET,
            Self::Subpaths(_) => SUBPATHS,
            Self::Type(_) => TYPE,
            Self::FixedValue(_) => FIXED_VALUE,
            Self::Card(_) => CARD,
            Self::Unrecognized { tag } => tag,
        }
    }
}

/// Ordered list of constraints declared on a field or sub-path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintTree {
    entries: Vec<Constraint>,
}

impl ConstraintTree {
    #[must_use]
    pub fn new(entries: Vec<Constraint>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Constraint>> for ConstraintTree {
    fn from(entries: Vec<Constraint>) -> Self {
        Self::new(entries)
    }
}

impl<'de> Deserialize<'de> for ConstraintTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConstraintTreeVisitor)
    }
}

struct ConstraintTreeVisitor;

impl<'de> Visitor<'de> for ConstraintTreeVisitor {
    type Value = ConstraintTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of constraint tags to constraint payloads")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConstraintTree, A::Error> {
        let mut entries = Vec::new();
        while let Some(tag) = map.next_key::<String>()? {
            let constraint = match tag.as_str() {
                INCLUDES_TYPE => Constraint::IncludesType(map.next_value()?),
                INCLUDES_CODE => Constraint::IncludesCode(map.next_value()?),
                VALUE_SET => Constraint::ValueSet(map.next_value()?),
                SUBPATHS => Constraint::Subpaths(map.next_value()?),
                TYPE => Constraint::Type(map.next_value()?),
                FIXED_VALUE => Constraint::FixedValue(map.next_value()?),
                CARD => Constraint::Card(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    Constraint::Unrecognized { tag }
                }
            };
            entries.push(constraint);
        }
        Ok(ConstraintTree { entries })
    }
}

/// Sub-type allowed in a field, with its own cardinality.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludesTypeItem {
    pub fqn: String,
    #[serde(default)]
    pub card: Option<Cardinality>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

/// Code allowed in a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludesCodeItem {
    pub code: String,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

/// Value set binding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetConstraint {
    pub uri: String,
    #[serde(default)]
    pub binding_strength: Option<String>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

/// Narrowing of the field's data type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeConstraint {
    pub fqn: String,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

/// Literal the field is pinned to. `kind` selects how `value` is read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedValueConstraint {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

/// Narrowed cardinality.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConstraint {
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

impl CardConstraint {
    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        Cardinality::new(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_preserves_tag_order() {
        let tree: ConstraintTree = serde_json::from_str(
            r#"{
                "card": { "min": 1 },
                "valueSet": { "uri": "http://hl7.org/fhir/ValueSet/v", "bindingStrength": "REQUIRED" },
                "includesCode": [ { "code": "a", "system": "http://s" } ]
            }"#,
        )
        .unwrap();

        let tags: Vec<&str> = tree.iter().map(Constraint::tag).collect();
        assert_eq!(tags, vec![CARD, VALUE_SET, INCLUDES_CODE]);
    }

    #[test]
    fn test_unknown_tag_is_kept_as_unrecognized() {
        let tree: ConstraintTree = serde_json::from_str(
            r#"{ "frobnicate": { "deep": [1, 2, { "x": null }] }, "card": { "max": 1 } }"#,
        )
        .unwrap();

        assert_eq!(tree.len(), 2);
        let mut entries = tree.iter();
        assert_eq!(
            entries.next(),
            Some(&Constraint::Unrecognized {
                tag: "frobnicate".to_string()
            })
        );
        assert!(matches!(entries.next(), Some(Constraint::Card(c)) if c.max == Some(1)));
    }

    #[test]
    fn test_nested_subpaths() {
        let tree: ConstraintTree = serde_json::from_str(
            r#"{
                "subpaths": {
                    "shr.core.Units": {
                        "subpaths": {
                            "shr.core.Coding": { "fixedValue": { "type": "code", "value": { "code": "mg" } } }
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let Some(Constraint::Subpaths(outer)) = tree.iter().next() else {
            panic!("expected subpaths");
        };
        let units = &outer["shr.core.Units"];
        let Some(Constraint::Subpaths(inner)) = units.iter().next() else {
            panic!("expected nested subpaths");
        };
        assert!(matches!(
            inner["shr.core.Coding"].iter().next(),
            Some(Constraint::FixedValue(f)) if f.kind == "code"
        ));
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let result: Result<ConstraintTree, _> =
            serde_json::from_str(r#"{ "type": { "lastModifiedBy": "shr.a.B" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_tree() {
        let tree: ConstraintTree = serde_yaml_ng::from_str(
            "type:\n  fqn: shr.core.SimpleQuantity\n  lastModifiedBy: shr.core.Base\ncard:\n  min: 0\n  max: 1\n",
        )
        .unwrap();
        let tags: Vec<&str> = tree.iter().map(Constraint::tag).collect();
        assert_eq!(tags, vec![TYPE, CARD]);
    }
}
