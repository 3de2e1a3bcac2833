//! Reachability-based pruning of OpenAPI 2.x/3.x documents.
//!
//! Keeps the operations whose path matches a set of patterns together with
//! every reusable component they transitively reference, and reports what
//! was dropped. The pipeline is:
//!
//! 1. [`PathFilter`] partitions `paths` into kept and removed entries.
//! 2. [`resolve`] closes the set of references reachable from the kept
//!    path items and the document-level `security` requirement.
//! 3. [`project`] rebuilds the document from that set and fills the
//!    [`Summary`].
//!
//! # Usage
//!
//! ```
//! use apiprune_core::shake;
//! use serde_json::json;
//!
//! let spec = json!({
//!     "openapi": "3.0.0",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "paths": {
//!         "/pets": { "get": { "responses": { "200": {
//!             "description": "ok",
//!             "content": { "application/json": {
//!                 "schema": { "$ref": "#/components/schemas/Pet" }
//!             } }
//!         } } } },
//!         "/stores": { "get": { "responses": { "200": { "description": "ok" } } } }
//!     },
//!     "components": { "schemas": { "Pet": {}, "Store": {} } }
//! });
//!
//! let result = shake(&spec, &["^/pets"]).unwrap();
//! assert_eq!(result.summary.removed_paths, vec!["/stores"]);
//! assert_eq!(result.summary.removed_schemas, vec!["Store"]);
//! ```

pub mod document;
pub mod error;
pub mod filter;
pub mod projector;
pub mod reference;
pub mod resolver;
pub mod scanner;

pub use document::{Document, SpecVersion};
pub use error::ShakeError;
pub use filter::{PathFilter, PathPartition, MATCH_ALL};
pub use projector::{project, Projection, Summary};
pub use reference::{parse_ref, ComponentKind, ComponentRef};
pub use resolver::resolve;
pub use scanner::{RefScanner, RefSet};

use serde_json::Value;
use tracing::debug;

/// Prune `document` down to the paths matching `patterns` and the components
/// they reach. An empty pattern list keeps every path.
///
/// The input is never modified.
pub fn shake<S: AsRef<str>>(document: &Value, patterns: &[S]) -> Result<Projection, ShakeError> {
    let filter = PathFilter::new(patterns)?;
    shake_with(document, &filter)
}

/// Same as [`shake`] with an already compiled filter.
pub fn shake_with(document: &Value, filter: &PathFilter) -> Result<Projection, ShakeError> {
    let doc = Document::from_value(document)?;

    let partition = doc
        .paths()
        .map(|paths| filter.partition(paths))
        .unwrap_or_default();

    let reachable = resolve(&doc, partition.kept.iter().map(|(_, item)| *item));
    let projection = project(&doc, &partition.kept, partition.removed, &reachable);

    debug!(
        version = doc.version_string().unwrap_or("unknown"),
        kept_paths = partition.kept.len(),
        removed_paths = projection.summary.removed_paths.len(),
        reachable = reachable.len(),
        removed_components = projection.summary.removed_components(),
        "document pruned"
    );

    Ok(projection)
}
