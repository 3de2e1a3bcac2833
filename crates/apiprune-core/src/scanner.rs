//! Deep reference collection over arbitrary document fragments.

use std::collections::HashSet;

use indexmap::IndexSet;
use serde_json::Value;

use crate::reference::{parse_ref, ComponentRef};

/// Ordered, value-deduplicated set of references in discovery order.
pub type RefSet = IndexSet<ComponentRef>;

/// Key holding a JSON pointer.
pub const REF_KEY: &str = "$ref";
/// Key holding a list of security requirement objects.
pub const SECURITY_KEY: &str = "security";

/// Depth-first collector of component references.
///
/// Remembers every composite node it has walked, by address, for as long as
/// it lives. Scanning a node a second time (directly, or because another
/// component embeds the same borrowed subtree) is a no-op, which bounds the
/// total work of one resolver run by the size of the document.
#[derive(Debug, Default)]
pub struct RefScanner<'a> {
    visited: HashSet<*const Value>,
    _doc: std::marker::PhantomData<&'a Value>,
}

impl<'a> RefScanner<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of composite nodes walked so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Collect every reference reachable inside `fragment` into `refs`.
    pub fn scan(&mut self, fragment: &'a Value, refs: &mut RefSet) {
        match fragment {
            Value::Object(map) => {
                if !self.mark(fragment) {
                    return;
                }
                for (key, value) in map {
                    match (key.as_str(), value) {
                        (REF_KEY, Value::String(pointer)) => {
                            if let Some(reference) = parse_ref(pointer) {
                                refs.insert(reference);
                            }
                        }
                        (SECURITY_KEY, Value::Array(requirements)) => {
                            collect_requirements(requirements, refs);
                        }
                        _ => self.scan(value, refs),
                    }
                }
            }
            Value::Array(items) => {
                if !self.mark(fragment) {
                    return;
                }
                for item in items {
                    self.scan(item, refs);
                }
            }
            _ => {}
        }
    }

    /// Collect scheme names from a security requirement list such as the
    /// document-level `security` array.
    pub fn scan_requirements(&mut self, requirements: &'a Value, refs: &mut RefSet) {
        match requirements {
            Value::Array(items) => {
                if self.mark(requirements) {
                    collect_requirements(items, refs);
                }
            }
            other => self.scan(other, refs),
        }
    }

    fn mark(&mut self, node: &'a Value) -> bool {
        self.visited.insert(std::ptr::from_ref(node))
    }
}

/// Every key of every requirement object names a security scheme; the scope
/// lists are irrelevant.
fn collect_requirements(requirements: &[Value], refs: &mut RefSet) {
    for requirement in requirements {
        if let Value::Object(schemes) = requirement {
            for name in schemes.keys() {
                refs.insert(ComponentRef::security_scheme(name.as_str()));
            }
        }
    }
}
