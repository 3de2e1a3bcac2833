use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of reusable component a pointer can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Schema,
    Parameter,
    Response,
    RequestBody,
    SecurityScheme,
}

impl ComponentKind {
    /// All kinds, in the order the projector rebuilds `components`.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Schema,
        ComponentKind::Parameter,
        ComponentKind::Response,
        ComponentKind::RequestBody,
        ComponentKind::SecurityScheme,
    ];

    /// Key of this kind's container under OpenAPI 3.x `components`.
    pub fn section(self) -> &'static str {
        match self {
            Self::Schema => "schemas",
            Self::Parameter => "parameters",
            Self::Response => "responses",
            Self::RequestBody => "requestBodies",
            Self::SecurityScheme => "securitySchemes",
        }
    }

    /// Inverse of [`section`](Self::section).
    pub fn from_section(section: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.section() == section)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// A typed pointer to a named component.
///
/// Equality and hashing are by value, so the same component found through
/// different pointers or through a security requirement collapses to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    pub kind: ComponentKind,
    pub name: String,
}

impl ComponentRef {
    pub fn new(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn schema(name: impl Into<String>) -> Self {
        Self::new(ComponentKind::Schema, name)
    }

    pub fn security_scheme(name: impl Into<String>) -> Self {
        Self::new(ComponentKind::SecurityScheme, name)
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

const DEFINITIONS_PREFIX: &str = "#/definitions/";
const SECURITY_DEFINITIONS_PREFIX: &str = "#/securityDefinitions/";
const COMPONENTS_PREFIX: &str = "#/components/";

/// Classify a `$ref` string.
///
/// Recognizes `#/definitions/NAME`, `#/securityDefinitions/NAME` and
/// `#/components/KIND/NAME` for the five component kinds. `NAME` is the rest of
/// the string and may contain `/`. Anything else (external files, other
/// sections, empty names) yields `None` and does not count toward reachability.
pub fn parse_ref(pointer: &str) -> Option<ComponentRef> {
    if let Some(name) = pointer.strip_prefix(DEFINITIONS_PREFIX) {
        return non_empty(name).map(ComponentRef::schema);
    }

    if let Some(name) = pointer.strip_prefix(SECURITY_DEFINITIONS_PREFIX) {
        return non_empty(name).map(ComponentRef::security_scheme);
    }

    let rest = pointer.strip_prefix(COMPONENTS_PREFIX)?;
    let (section, name) = rest.split_once('/')?;
    let kind = ComponentKind::from_section(section)?;
    non_empty(name).map(|name| ComponentRef::new(kind, name))
}

fn non_empty(name: &str) -> Option<&str> {
    (!name.is_empty()).then_some(name)
}
