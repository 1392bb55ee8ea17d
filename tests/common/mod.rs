//! Common test utilities for guicfg integration tests.
//!
//! Provides `TestEnv` so tests never read or write the user's real
//! `~/.config/guicfg/gui.kdl`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with an isolated config directory.
///
/// The `guicfg()` method returns a `Command` with `GUICFG_CONFIG_DIR` pointed
/// at a temp dir and both override variables removed, set per-invocation so
/// tests stay parallel-safe.
pub struct TestEnv {
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an empty config directory.
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the guicfg binary with an isolated config directory.
    pub fn guicfg(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_guicfg"));
        cmd.env("GUICFG_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("GUICFG_CONFIG");
        cmd.env_remove("GUI_ADDRESS_OVERRIDE");
        cmd.env_remove("GUI_APIKEY_OVERRIDE");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Path of gui.kdl inside the isolated config directory.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("gui.kdl")
    }

    /// Write raw KDL content to gui.kdl.
    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write gui.kdl");
    }

    /// Get the path to the config directory.
    pub fn config_dir_path(&self) -> &Path {
        self.config_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse JSON output from a command.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}
