//! guicfg - Resolve the effective admin GUI settings.
//!
//! Derives the listen address, TLS mode, API key and client base URL for a
//! local admin interface from stored settings (gui.kdl) and environment
//! overrides. The core lives in [`config::resolver`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod storage;

use std::path::PathBuf;

/// Library-level error type for guicfg operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    KdlParse { path: PathBuf, message: String },

    #[error("Cannot determine config directory; set GUICFG_CONFIG_DIR")]
    NoConfigDir,

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: '{value}' (expected {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}

/// Result type alias for guicfg operations.
pub type Result<T> = std::result::Result<T, Error>;
