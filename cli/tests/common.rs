//! # HexMaker CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests (`command.rs`, `query.rs`, ...).
//! Each `.rs` file in `cli/tests/` is compiled as its own test crate and runs
//! the real `hexmaker` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `hexmaker` binary for the current test run, isolated from the user's config.
pub fn hexmaker_cmd() -> Command {
    Command::cargo_bin("hexmaker").expect("Failed to find hexmaker binary for testing")
}

/// `hexmaker` with `-C <project>` and a config home inside the project.
pub fn hexmaker_in(project: &Path) -> Command {
    let config_home = project.join(".config-home");
    let mut cmd = hexmaker_cmd();
    cmd.env("HOME", &config_home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env_remove("HEXMAKER_TEMPLATES_DIR")
        .env_remove("RUST_LOG")
        .arg("-C")
        .arg(project);
    cmd
}

/// An empty project directory; the `.git` marker stops the config search there.
pub fn php_project() -> TempDir {
    let project = tempfile::tempdir().expect("Failed to create temp project dir");
    fs::create_dir(project.path().join(".git")).expect("Failed to create .git marker");
    project
}

/// Writes `.hexmaker.toml` at the project root.
pub fn write_config(project: &Path, content: &str) {
    fs::write(project.join(".hexmaker.toml"), content).expect("Failed to write .hexmaker.toml");
}

/// Reads a generated file, relative to the project root.
pub fn read_generated(project: &Path, relative: &str) -> String {
    fs::read_to_string(project.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read generated '{}': {}", relative, e))
}
