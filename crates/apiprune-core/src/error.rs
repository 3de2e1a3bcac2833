use thiserror::Error;

/// Errors raised before the pruning pipeline starts.
///
/// Once the document is recognized and the patterns compile, scanning,
/// resolution and projection cannot fail.
#[derive(Debug, Error)]
pub enum ShakeError {
    /// E1004: The document root is not an object.
    #[error("E1004: document root must be an object")]
    NotAnObject,

    /// E1001: Neither `swagger` nor `openapi` is present.
    #[error("E1001: not a Swagger 2.0 or OpenAPI 3.x document (missing 'swagger' or 'openapi')")]
    UnknownVersion,

    /// E1003: Both `swagger` and `openapi` are present.
    #[error("E1003: document declares both 'swagger' and 'openapi'")]
    AmbiguousVersion,

    /// E1006: A path pattern is not a valid regular expression.
    #[error("E1006: invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// E1005: `paths` is present but not an object.
    #[error("E1005: 'paths' must be an object")]
    InvalidPaths,
}
