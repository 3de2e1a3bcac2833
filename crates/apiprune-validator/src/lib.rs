//! Validation of Swagger 2.0 and OpenAPI 3.0 / 3.1 documents.
//!
//! Checks the handful of root fields every document needs, then runs the
//! document against the official OpenAPI Initiative JSON Schema for its
//! version. Used by the CLI on both the input and the pruned output.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use apiprune_core::{ShakeError, SpecVersion};

const SWAGGER_2_0_SCHEMA: &str = include_str!("../schemas/swagger-2.0.json");
const OPENAPI_3_0_SCHEMA: &str = include_str!("../schemas/openapi-3.0.json");
const OPENAPI_3_1_SCHEMA: &str = include_str!("../schemas/openapi-3.1.json");

/// Published schema a document is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSchema {
    Swagger20,
    OpenApi30,
    OpenApi31,
}

impl DocumentSchema {
    pub const ALL: [DocumentSchema; 3] = [Self::Swagger20, Self::OpenApi30, Self::OpenApi31];

    /// Pick the schema for a document of `version`.
    ///
    /// `openapi: 3.1.x` selects the 3.1 schema. Any other `openapi` value
    /// selects 3.0, whose version pattern rejects everything but `3.0.x`.
    pub fn select(version: SpecVersion, root: &Map<String, Value>) -> Self {
        match version {
            SpecVersion::V2 => Self::Swagger20,
            SpecVersion::V3 => {
                let declared = root
                    .get(version.marker())
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if declared.split('.').take(2).eq(["3", "1"]) {
                    Self::OpenApi31
                } else {
                    Self::OpenApi30
                }
            }
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Swagger20 => SWAGGER_2_0_SCHEMA,
            Self::OpenApi30 => OPENAPI_3_0_SCHEMA,
            Self::OpenApi31 => OPENAPI_3_1_SCHEMA,
        }
    }
}

impl fmt::Display for DocumentSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Swagger20 => "Swagger 2.0",
            Self::OpenApi30 => "OpenAPI 3.0",
            Self::OpenApi31 => "OpenAPI 3.1",
        })
    }
}

/// Why a document was rejected.
///
/// Schema violations are collected, not short-circuited, so a single error
/// lists every problem found.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid OpenAPI specification: Input must be an object")]
    NotAnObject,

    #[error("Invalid OpenAPI specification: Missing or invalid info object")]
    MissingInfo,

    #[error("Invalid OpenAPI specification: Missing or invalid paths object")]
    MissingPaths,

    #[error("Invalid OpenAPI specification: Missing openapi or swagger version")]
    MissingVersion,

    #[error("Invalid OpenAPI specification: Both openapi and swagger version fields are present")]
    AmbiguousVersion,

    #[error("Invalid OpenAPI specification:\n{}", .0.join("\n"))]
    Schema(Vec<String>),

    #[error("failed to compile the {schema} document schema: {reason}")]
    SchemaCompile {
        schema: DocumentSchema,
        reason: String,
    },
}

impl ValidationError {
    /// Individual schema violations, empty for the structural checks.
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Schema(violations) => violations,
            _ => &[],
        }
    }
}

/// Validate `document` and return its detected version.
pub fn validate_document(document: &Value) -> Result<SpecVersion, ValidationError> {
    let root = document.as_object().ok_or(ValidationError::NotAnObject)?;

    if !root.get("info").is_some_and(Value::is_object) {
        return Err(ValidationError::MissingInfo);
    }
    if !root.get("paths").is_some_and(Value::is_object) {
        return Err(ValidationError::MissingPaths);
    }

    let version = SpecVersion::detect(root).map_err(|e| match e {
        ShakeError::AmbiguousVersion => ValidationError::AmbiguousVersion,
        _ => ValidationError::MissingVersion,
    })?;

    let schema = DocumentSchema::select(version, root);
    let validator = compile_document_schema(schema)?;
    let violations: Vec<String> = validator
        .iter_errors(document)
        .map(|error| {
            let location = error.instance_path.to_string();
            if location.is_empty() {
                error.to_string()
            } else {
                format!("{location}: {error}")
            }
        })
        .collect();

    if !violations.is_empty() {
        debug!(%schema, violations = violations.len(), "document rejected");
        return Err(ValidationError::Schema(violations));
    }

    Ok(version)
}

/// Compile one of the embedded schemas. The draft is taken from its
/// `$schema` (draft-04 for Swagger 2.0 and OpenAPI 3.0, 2020-12 for 3.1).
pub fn compile_document_schema(
    schema: DocumentSchema,
) -> Result<jsonschema::Validator, ValidationError> {
    let source: Value =
        serde_json::from_str(schema.source()).map_err(|e| ValidationError::SchemaCompile {
            schema,
            reason: e.to_string(),
        })?;

    jsonschema::options()
        .build(&source)
        .map_err(|e| ValidationError::SchemaCompile {
            schema,
            reason: e.to_string(),
        })
}
