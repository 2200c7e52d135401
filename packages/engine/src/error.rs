//! Error types for the documentation engine.

use thiserror::Error;

/// Main error type for engine operations.
///
/// Every variant except a skipped constraint tag is fatal: a failed element
/// aborts the whole build rather than producing partial documentation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced fqn (parent, override source, sub-type, narrowed type)
    /// is absent from the element registry.
    #[error("Data element not found: {0}")]
    ElementNotFound(String),

    /// The same fqn was added to the element registry twice.
    #[error("Duplicate data element: {0}")]
    DuplicateElement(String),

    /// The parent chain of an element loops back on itself.
    #[error("Inheritance cycle detected at {fqn}: {}", .path.join(" -> "))]
    CycleDetected { fqn: String, path: Vec<String> },

    /// `flatten` was called on a registry that is already flattened.
    #[error("Element registry has already been flattened")]
    AlreadyFlattened,

    /// Resolution was attempted before the ancestor chains were computed.
    #[error("Element registry must be flattened before resolving constraints")]
    NotFlattened,

    /// A fixed value literal of a kind the model does not define.
    #[error("Unsupported fixed value kind '{kind}' on {field}")]
    UnsupportedFixedValue { kind: String, field: String },

    /// A fixed value literal whose payload does not match its declared kind.
    #[error("Malformed {kind} fixed value on {field}: {reason}")]
    MalformedFixedValue {
        kind: String,
        field: String,
        reason: String,
    },

    /// A walk exceeded one of the configured depth limits.
    #[error("{what} exceeds maximum depth of {max} at {at}")]
    DepthExceeded {
        what: &'static str,
        max: usize,
        at: String,
    },

    /// Namespace name cannot be turned into an output directory.
    #[error("Invalid namespace name: '{0}'")]
    InvalidNamespace(String),

    /// Element name cannot be used as a page file name.
    #[error("Invalid data element name: '{0}'")]
    InvalidElementName(String),

    /// Two namespaces or two elements would be written to the same output
    /// path.
    #[error("Output path {path} is claimed by both {first} and {second}")]
    OutputPathClash {
        path: String,
        first: String,
        second: String,
    },

    /// Failed to load or parse a model document.
    #[error("Failed to load model: {0}")]
    LoadError(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found_display() {
        let err = EngineError::ElementNotFound("shr.core.Quantity".to_string());
        assert_eq!(err.to_string(), "Data element not found: shr.core.Quantity");
    }

    #[test]
    fn test_cycle_display() {
        let err = EngineError::CycleDetected {
            fqn: "shr.test.A".to_string(),
            path: vec![
                "shr.test.A".to_string(),
                "shr.test.B".to_string(),
                "shr.test.A".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Inheritance cycle detected at shr.test.A: shr.test.A -> shr.test.B -> shr.test.A"
        );
    }

    #[test]
    fn test_unsupported_fixed_value_display() {
        let err = EngineError::UnsupportedFixedValue {
            kind: "decimal".to_string(),
            field: "Amount".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported fixed value kind 'decimal' on Amount"
        );
    }

    #[test]
    fn test_output_path_clash_display() {
        let err = EngineError::OutputPathClash {
            path: "shr_core/Same.html".to_string(),
            first: "shr.core.Same".to_string(),
            second: "shr.core.Same".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Output path shr_core/Same.html is claimed by both shr.core.Same and shr.core.Same"
        );
    }
}
