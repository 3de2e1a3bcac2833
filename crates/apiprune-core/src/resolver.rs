//! Transitive closure of component references.

use std::collections::{HashSet, VecDeque};

use serde_json::Value;
use tracing::{debug, trace};

use crate::document::Document;
use crate::reference::ComponentRef;
use crate::scanner::{RefScanner, RefSet};

/// Compute every component reachable from the kept path items and the
/// document-level security requirement.
///
/// Worklist over the reference graph: each reference is expanded at most once,
/// so the loop ends after at most one iteration per distinct `{kind, name}` in
/// the document, whatever cycles the components form. The returned set is in
/// discovery order.
pub fn resolve<'a, I>(document: &Document<'a>, kept_paths: I) -> RefSet
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut scanner = RefScanner::new();
    let mut refs = RefSet::new();

    for path_item in kept_paths {
        scanner.scan(path_item, &mut refs);
    }
    if let Some(security) = document.security() {
        scanner.scan_requirements(security, &mut refs);
    }

    let mut processed: HashSet<ComponentRef> = HashSet::new();
    let mut queued: HashSet<ComponentRef> = HashSet::new();
    let mut queue: VecDeque<ComponentRef> = VecDeque::new();

    for reference in &refs {
        if queued.insert(reference.clone()) {
            queue.push_back(reference.clone());
        }
    }

    while let Some(reference) = queue.pop_front() {
        queued.remove(&reference);
        if !processed.insert(reference.clone()) {
            continue;
        }

        let Some(body) = document.component(&reference) else {
            debug!(reference = %reference, "dangling reference, not expanded");
            continue;
        };

        let before = refs.len();
        scanner.scan(body, &mut refs);

        for discovered in refs.iter().skip(before) {
            if processed.contains(discovered) || queued.contains(discovered) {
                continue;
            }
            trace!(from = %reference, to = %discovered, "discovered reference");
            queued.insert(discovered.clone());
            queue.push_back(discovered.clone());
        }
    }

    debug!(
        reachable = refs.len(),
        expanded = processed.len(),
        nodes = scanner.visited_count(),
        "reference closure complete"
    );
    refs
}
