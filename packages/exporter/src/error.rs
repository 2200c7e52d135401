//! Error types for the exporter.

use std::path::PathBuf;

use shr_javadoc_engine::EngineError;
use thiserror::Error;

/// Main error type for the exporter library.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Model loading or constraint resolution failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The model file could not be read.
    #[error("Failed to read model {}: {source}", .path.display())]
    ReadModel {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Model file extension is not one we can parse.
    #[error("Unsupported model format: '{}'. Expected a .json, .yaml or .yml file", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The output path exists but is not a directory.
    #[error("Output path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// An embedded template failed to compile.
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Rendering a page failed.
    #[error("Failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: handlebars::RenderError,
    },
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_transparent() {
        let err = ExportError::from(EngineError::ElementNotFound("shr.core.Gone".to_string()));
        assert_eq!(err.to_string(), EngineError::ElementNotFound("shr.core.Gone".to_string()).to_string());
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = ExportError::UnsupportedFormat(PathBuf::from("model.xml"));
        assert!(err.to_string().contains("model.xml"));
        assert!(err.to_string().contains(".yaml"));
    }
}
