//! Fixtures and CLI regression tests for apiprune.
//!
//! The `cli` module drives the `apiprune` binary as a subprocess against the
//! documents in `tests/fixtures/`.

#[cfg(test)]
pub mod cli;
pub mod fixtures;

pub use fixtures::{fixture_path, fixtures_dir, load_fixture};
