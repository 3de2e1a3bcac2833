//! Document I/O for apiprune.
//!
//! Reads Swagger 2.0 / OpenAPI 3.x documents from YAML or JSON into
//! order-preserving `serde_json::Value`s and renders results back out.

pub mod error;
pub mod model;
pub mod parser;

pub use error::LoadError;
pub use model::{Endpoint, OutputFormat};
pub use parser::{list_endpoints, load_file, load_str, render};
