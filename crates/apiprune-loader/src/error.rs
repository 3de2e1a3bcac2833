use thiserror::Error;

/// Errors produced while reading or writing documents.
#[derive(Debug, Error)]
pub enum LoadError {
    /// E1002: YAML/JSON parse error.
    #[error("E1002: parse error: {0}")]
    Parse(String),

    /// E1007: The document could not be rendered.
    #[error("E1007: serialization error: {0}")]
    Serialize(String),

    /// E1008: Unknown output format name.
    #[error("E1008: unknown output format '{0}' (expected json or yaml)")]
    UnknownFormat(String),

    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
