//! Test fixtures
//!
//! - TARDIS configuration files
//! - Simulation results

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Path to a configuration fixture
pub fn config_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/configs")
        .join(name)
}

/// Path to a result fixture
pub fn result_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/results")
        .join(name)
}

/// The W7 example configuration
pub fn example_config() -> PathBuf {
    config_path("tardis_example.yml")
}

/// A three-shell result with plasma state
pub fn three_shell_result() -> PathBuf {
    result_path("three_shells.json")
}
