//! Configuration constants for the documentation engine
//!
//! Centralized limits and naming rules used while loading and resolving a
//! model:
//! - Size limits for model documents
//! - Depth limits for ancestor chains and nested sub-paths
//! - Namespace naming rules (namespaces become output directories)
//! - Element naming rules (element names become page file names)

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{EngineError, Result};

/// Maximum model document size in bytes (64 MB).
///
/// A full SHR export with every namespace is in the low tens of megabytes.
pub const MAX_MODEL_SIZE: usize = 64 * 1024 * 1024;

/// Maximum length of an ancestor chain.
///
/// Deeper chains are treated as malformed input before cycle detection
/// would even be needed.
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Maximum nesting depth of `subpaths` constraints within one field.
pub const MAX_SUBPATH_DEPTH: usize = 32;

/// Marker rendered for an unbounded upper cardinality.
pub const UNBOUNDED: &str = "*";

/// `valueType` marking a field that holds a reference rather than a value.
pub const REF_VALUE_TYPE: &str = "RefValue";

/// Dotted identifier: `shr.core`, `shr.entity-test`, `obf_datatype`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAMESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*(\.[A-Za-z_][A-Za-z0-9_-]*)*$").expect("valid regex")
});

/// Validate a namespace name.
///
/// Namespace names become directory names in the generated site, so only
/// dotted identifiers are accepted (no separators, no `..`).
///
/// # Examples
/// ```
/// use shr_javadoc_engine::config::validate_namespace;
///
/// assert!(validate_namespace("shr.core").is_ok());
/// assert!(validate_namespace("../etc").is_err());
/// ```
pub fn validate_namespace(name: &str) -> Result<()> {
    if NAMESPACE_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(EngineError::InvalidNamespace(name.to_string()))
    }
}

/// Plain identifier: `Quantity`, `BodyWeight`, `_Value`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ELEMENT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// Validate a data element name.
///
/// Element names become page file names inside their namespace directory.
/// Separators, dots and hyphens are rejected, so a name can neither leave
/// that directory nor collide with the `-pkg` and `-info` namespace pages.
///
/// # Examples
/// ```
/// use shr_javadoc_engine::config::validate_element_name;
///
/// assert!(validate_element_name("Quantity").is_ok());
/// assert!(validate_element_name("../../escaped").is_err());
/// ```
pub fn validate_element_name(name: &str) -> Result<()> {
    if ELEMENT_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(EngineError::InvalidElementName(name.to_string()))
    }
}

/// Output directory name for a namespace.
///
/// # Examples
/// ```
/// use shr_javadoc_engine::config::namespace_path;
///
/// assert_eq!(namespace_path("shr.core"), "shr_core");
/// ```
#[must_use]
pub fn namespace_path(name: &str) -> String {
    name.replace('.', "_")
}

/// Relative hyperlink to an element page, as seen from another element or
/// namespace page (all of which live one directory below the site root).
#[must_use]
pub fn element_href(namespace_path: &str, name: &str) -> String {
    format!("../{namespace_path}/{name}.html")
}
