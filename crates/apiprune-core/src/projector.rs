//! Rebuild a document from its kept paths and reachable components.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::document::{Document, SpecVersion};
use crate::reference::{ComponentKind, ComponentRef};
use crate::scanner::RefSet;

/// Names dropped from the source document, per section, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub removed_paths: Vec<String>,
    pub removed_schemas: Vec<String>,
    pub removed_parameters: Vec<String>,
    pub removed_responses: Vec<String>,
    pub removed_request_bodies: Vec<String>,
    pub removed_security_schemes: Vec<String>,
}

impl Summary {
    /// Removed component names of `kind`.
    pub fn removed(&self, kind: ComponentKind) -> &[String] {
        match kind {
            ComponentKind::Schema => &self.removed_schemas,
            ComponentKind::Parameter => &self.removed_parameters,
            ComponentKind::Response => &self.removed_responses,
            ComponentKind::RequestBody => &self.removed_request_bodies,
            ComponentKind::SecurityScheme => &self.removed_security_schemes,
        }
    }

    fn removed_mut(&mut self, kind: ComponentKind) -> &mut Vec<String> {
        match kind {
            ComponentKind::Schema => &mut self.removed_schemas,
            ComponentKind::Parameter => &mut self.removed_parameters,
            ComponentKind::Response => &mut self.removed_responses,
            ComponentKind::RequestBody => &mut self.removed_request_bodies,
            ComponentKind::SecurityScheme => &mut self.removed_security_schemes,
        }
    }

    /// Total number of removed components across all kinds.
    pub fn removed_components(&self) -> usize {
        ComponentKind::ALL
            .into_iter()
            .map(|kind| self.removed(kind).len())
            .sum()
    }

    /// `true` when nothing at all was removed.
    pub fn is_empty(&self) -> bool {
        self.removed_paths.is_empty() && self.removed_components() == 0
    }
}

/// A pruned document with the record of what was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub document: Value,
    pub summary: Summary,
}

/// Rebuild `document` with `kept_paths` as its `paths` and only the
/// components in `reachable`.
///
/// Root keys keep their source order. Sections that do not hold components
/// are copied unchanged.
pub fn project<'a>(
    document: &Document<'a>,
    kept_paths: &[(&'a str, &'a Value)],
    removed_paths: Vec<String>,
    reachable: &RefSet,
) -> Projection {
    let mut summary = Summary {
        removed_paths,
        ..Summary::default()
    };

    let paths: Map<String, Value> = kept_paths
        .iter()
        .map(|(path, item)| ((*path).to_string(), (*item).clone()))
        .collect();
    let mut paths = Some(paths);

    let mut output = Map::with_capacity(document.root().len() + 1);
    for (key, value) in document.root() {
        if key == "paths" {
            if let Some(paths) = paths.take() {
                output.insert(key.clone(), Value::Object(paths));
            }
            continue;
        }

        match (document.version(), value) {
            (SpecVersion::V2, Value::Object(section)) => {
                if let Some(kind) = flat_section_kind(key) {
                    let kept = retain_section(kind, section, reachable, &mut summary);
                    output.insert(key.clone(), Value::Object(kept));
                    continue;
                }
            }
            (SpecVersion::V3, Value::Object(components)) if key == "components" => {
                let kept = retain_components(components, reachable, &mut summary);
                if !kept.is_empty() {
                    output.insert(key.clone(), Value::Object(kept));
                }
                continue;
            }
            _ => {}
        }

        output.insert(key.clone(), value.clone());
    }

    if let Some(paths) = paths {
        output.insert("paths".to_string(), Value::Object(paths));
    }

    debug!(
        removed_paths = summary.removed_paths.len(),
        removed_components = summary.removed_components(),
        "projection rebuilt"
    );

    Projection {
        document: Value::Object(output),
        summary,
    }
}

fn flat_section_kind(key: &str) -> Option<ComponentKind> {
    [ComponentKind::Schema, ComponentKind::SecurityScheme]
        .into_iter()
        .find(|kind| SpecVersion::flat_section(*kind) == Some(key))
}

/// Rebuild `components`, dropping per-kind containers left empty. Keys that
/// are not one of the five tracked kinds are carried over as-is.
fn retain_components(
    components: &Map<String, Value>,
    reachable: &RefSet,
    summary: &mut Summary,
) -> Map<String, Value> {
    let mut kept = Map::new();
    for (key, value) in components {
        match (ComponentKind::from_section(key), value) {
            (Some(kind), Value::Object(section)) => {
                let section = retain_section(kind, section, reachable, summary);
                if !section.is_empty() {
                    kept.insert(key.clone(), Value::Object(section));
                }
            }
            _ => {
                kept.insert(key.clone(), value.clone());
            }
        }
    }
    kept
}

fn retain_section(
    kind: ComponentKind,
    section: &Map<String, Value>,
    reachable: &RefSet,
    summary: &mut Summary,
) -> Map<String, Value> {
    let mut kept = Map::new();
    for (name, body) in section {
        if reachable.contains(&ComponentRef::new(kind, name.as_str())) {
            kept.insert(name.clone(), body.clone());
        } else {
            summary.removed_mut(kind).push(name.clone());
        }
    }
    kept
}
