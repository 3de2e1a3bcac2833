use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::model::{Endpoint, OutputFormat};

/// HTTP methods we recognize in path items.
const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Parse a document from a YAML/JSON string.
///
/// Object key order is preserved, so later summaries follow the source order.
pub fn load_str(input: &str) -> Result<Value, LoadError> {
    // Parse YAML (also handles JSON since JSON is valid YAML)
    serde_yaml::from_str(input).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Parse a document from a file path.
pub fn load_file(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path)?;
    load_str(&content)
}

/// Render any serializable value in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, LoadError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| LoadError::Serialize(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| LoadError::Serialize(e.to_string()))
        }
    }
}

/// List every operation of a document in source order.
///
/// Non-object path items and unknown keys (`parameters`, `summary`,
/// extensions) are skipped.
pub fn list_endpoints(document: &Value) -> Vec<Endpoint> {
    let Some(paths) = document.get("paths").and_then(|v| v.as_object()) else {
        return Vec::new(); // No paths is valid (empty API)
    };

    let mut endpoints = Vec::new();
    for (path, path_item) in paths {
        let Some(path_obj) = path_item.as_object() else {
            continue;
        };
        for method in path_obj.keys() {
            if HTTP_METHODS.contains(&method.as_str()) {
                endpoints.push(Endpoint {
                    path: path.clone(),
                    method: method.to_uppercase(),
                });
            }
        }
    }
    endpoints
}
