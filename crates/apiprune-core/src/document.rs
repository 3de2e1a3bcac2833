//! Version-tagged view over a raw API description document.
//!
//! Swagger 2.0 keeps schemas and security schemes in two flat root sections
//! (`definitions`, `securityDefinitions`); OpenAPI 3.x nests every reusable
//! component under `components.<kind>`. All lookups dispatch on the tag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ShakeError;
use crate::reference::{ComponentKind, ComponentRef};

/// Root key marking a Swagger 2.0 document.
pub const SWAGGER_MARKER: &str = "swagger";
/// Root key marking an OpenAPI 3.x document.
pub const OPENAPI_MARKER: &str = "openapi";

/// Major document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecVersion {
    V2,
    V3,
}

impl SpecVersion {
    /// Detect the shape from the version marker present at the root.
    pub fn detect(root: &Map<String, Value>) -> Result<Self, ShakeError> {
        match (
            root.contains_key(SWAGGER_MARKER),
            root.contains_key(OPENAPI_MARKER),
        ) {
            (true, false) => Ok(Self::V2),
            (false, true) => Ok(Self::V3),
            (true, true) => Err(ShakeError::AmbiguousVersion),
            (false, false) => Err(ShakeError::UnknownVersion),
        }
    }

    /// Root key carrying the version string.
    pub fn marker(self) -> &'static str {
        match self {
            Self::V2 => SWAGGER_MARKER,
            Self::V3 => OPENAPI_MARKER,
        }
    }

    /// Flat Swagger 2.0 section holding components of `kind`.
    ///
    /// Only schemas and security schemes have a pointer family in 2.0.
    pub fn flat_section(kind: ComponentKind) -> Option<&'static str> {
        match kind {
            ComponentKind::Schema => Some("definitions"),
            ComponentKind::SecurityScheme => Some("securityDefinitions"),
            _ => None,
        }
    }
}

/// A borrowed, version-tagged document.
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
    V2(&'a Map<String, Value>),
    V3(&'a Map<String, Value>),
}

impl<'a> Document<'a> {
    /// Wrap a parsed document, rejecting anything that is not a recognizable
    /// Swagger 2.0 or OpenAPI 3.x object.
    pub fn from_value(value: &'a Value) -> Result<Self, ShakeError> {
        let root = value.as_object().ok_or(ShakeError::NotAnObject)?;

        if root.get("paths").is_some_and(|paths| !paths.is_object()) {
            return Err(ShakeError::InvalidPaths);
        }

        Ok(match SpecVersion::detect(root)? {
            SpecVersion::V2 => Self::V2(root),
            SpecVersion::V3 => Self::V3(root),
        })
    }

    pub fn version(&self) -> SpecVersion {
        match self {
            Self::V2(_) => SpecVersion::V2,
            Self::V3(_) => SpecVersion::V3,
        }
    }

    /// The version string, e.g. `"2.0"` or `"3.1.0"`, when it is a string.
    pub fn version_string(&self) -> Option<&'a str> {
        self.root().get(self.version().marker())?.as_str()
    }

    pub fn root(&self) -> &'a Map<String, Value> {
        match self {
            Self::V2(root) | Self::V3(root) => root,
        }
    }

    /// The `paths` mapping, if any.
    pub fn paths(&self) -> Option<&'a Map<String, Value>> {
        self.root().get("paths")?.as_object()
    }

    /// The document-level security requirement list, if it is an array.
    pub fn security(&self) -> Option<&'a Value> {
        self.root().get("security").filter(|value| value.is_array())
    }

    /// The container holding every component of `kind`.
    pub fn section(&self, kind: ComponentKind) -> Option<&'a Map<String, Value>> {
        match self {
            Self::V2(root) => root.get(SpecVersion::flat_section(kind)?)?.as_object(),
            Self::V3(root) => root
                .get("components")?
                .get(kind.section())?
                .as_object(),
        }
    }

    /// Body of the component `reference` points at, if it exists.
    pub fn component(&self, reference: &ComponentRef) -> Option<&'a Value> {
        self.section(reference.kind)?.get(&reference.name)
    }
}
