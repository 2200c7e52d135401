//! Model file loading.

use std::fs;
use std::path::Path;

use shr_javadoc_engine::config::MAX_MODEL_SIZE;
use shr_javadoc_engine::{EngineError, Model};

use crate::error::{ExportError, Result};

/// Serialization format of a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
}

impl ModelFormat {
    /// Pick the format from the file extension.
    ///
    /// # Errors
    /// Returns `UnsupportedFormat` for anything but `.json`, `.yaml` and `.yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ExportError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read and parse a model file.
///
/// The file size is checked before reading so an oversized model is
/// rejected without loading it into memory.
pub fn load_model(path: &Path) -> Result<Model> {
    let format = ModelFormat::from_path(path)?;

    let read_error = |source| ExportError::ReadModel {
        path: path.to_path_buf(),
        source,
    };
    let size = fs::metadata(path).map_err(read_error)?.len();
    if size > MAX_MODEL_SIZE as u64 {
        return Err(EngineError::LoadError(format!(
            "{} is {size} bytes, maximum is {MAX_MODEL_SIZE} bytes",
            path.display()
        ))
        .into());
    }

    let content = fs::read_to_string(path).map_err(read_error)?;
    tracing::info!(path = %path.display(), bytes = size, ?format, "Loading model");

    let model = match format {
        ModelFormat::Json => Model::from_json_str(&content)?,
        ModelFormat::Yaml => Model::from_yaml_str(&content)?,
    };
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ModelFormat::from_path(Path::new("shr.json")).unwrap(),
            ModelFormat::Json
        );
        assert_eq!(
            ModelFormat::from_path(Path::new("shr.YML")).unwrap(),
            ModelFormat::Yaml
        );
        assert!(matches!(
            ModelFormat::from_path(Path::new("shr.xml")),
            Err(ExportError::UnsupportedFormat(p)) if p == PathBuf::from("shr.xml")
        ));
        assert!(ModelFormat::from_path(Path::new("model")).is_err());
    }

    #[test]
    fn test_load_yaml_model() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.yaml");
        fs::write(
            &path,
            "dataElements:\n  - fqn: shr.core.Coding\n    name: Coding\n    namespace: shr.core\n",
        )
        .unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.data_elements[0].fqn, "shr.core.Coding");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_model(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ExportError::ReadModel { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_invalid_json_is_engine_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_model(&path),
            Err(ExportError::Engine(EngineError::JsonError(_)))
        ));
    }
}
