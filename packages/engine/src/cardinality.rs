//! Cardinality values and their display form.

use serde::{Deserialize, Serialize};

use crate::config::UNBOUNDED;

/// Lower and upper occurrence bounds of a field.
///
/// A missing `min` means 0, a missing `max` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl Cardinality {
    #[must_use]
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

/// Format an optional cardinality as `"<min>..<max>"`.
///
/// # Examples
/// ```
/// use shr_javadoc_engine::cardinality::{format_card, Cardinality};
///
/// assert_eq!(format_card(None), "0..*");
/// assert_eq!(format_card(Some(&Cardinality::new(Some(1), None))), "1..*");
/// assert_eq!(format_card(Some(&Cardinality::new(Some(0), Some(1)))), "0..1");
/// ```
#[must_use]
pub fn format_card(card: Option<&Cardinality>) -> String {
    let min = card.and_then(|c| c.min).unwrap_or(0);
    match card.and_then(|c| c.max) {
        Some(max) => format!("{min}..{max}"),
        None => format!("{min}..{UNBOUNDED}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_missing_card() {
        assert_eq!(format_card(None), "0..*");
        assert_eq!(format_card(Some(&Cardinality::default())), "0..*");
    }

    #[test]
    fn test_format_min_only() {
        assert_eq!(format_card(Some(&Cardinality::new(Some(1), None))), "1..*");
    }

    #[test]
    fn test_format_max_only() {
        assert_eq!(format_card(Some(&Cardinality::new(None, Some(3)))), "0..3");
    }

    #[test]
    fn test_format_bounded() {
        assert_eq!(format_card(Some(&Cardinality::new(Some(0), Some(1)))), "0..1");
        assert_eq!(format_card(Some(&Cardinality::new(Some(1), Some(1)))), "1..1");
    }

    #[test]
    fn test_unbounded_has_no_numeric_form() {
        let card: Cardinality = serde_json::from_str(r#"{"min": 2}"#).unwrap();
        assert!(card.is_unbounded());
        assert_eq!(format_card(Some(&card)), "2..*");
    }
}
