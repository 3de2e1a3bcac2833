//! Access to the shared documents under `tests/fixtures/`.

use std::path::PathBuf;

use apiprune_loader::{load_file, LoadError};
use serde_json::Value;

/// Absolute path to the shared test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/apiprune-test
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(|root| root.join("tests/fixtures"))
        .unwrap_or_else(|| manifest_dir.join("tests/fixtures"))
}

/// Absolute path to a named fixture.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Parse a named fixture.
pub fn load_fixture(name: &str) -> Result<Value, LoadError> {
    load_file(&fixture_path(name))
}
