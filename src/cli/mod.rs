//! CLI argument definitions for guicfg.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// guicfg - Show the effective admin GUI address, TLS mode, API key and URL.
///
/// Stored settings come from gui.kdl; `GUI_ADDRESS_OVERRIDE` and
/// `GUI_APIKEY_OVERRIDE` take precedence when set.
#[derive(Parser, Debug)]
#[command(name = "guicfg")]
#[command(author, version, about = "Resolve the effective admin GUI settings", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Path to gui.kdl. Defaults to $GUICFG_CONFIG_DIR/gui.kdl or the platform config dir.
    #[arg(long = "config", global = true, env = "GUICFG_CONFIG")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every resolved value and where it came from (default)
    Show {
        /// Print the API key unmasked
        #[arg(long)]
        reveal: bool,
    },

    /// Print the base URL a client should use
    Url,

    /// Stored configuration commands (gui.kdl, overrides not applied)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Stored configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the path of gui.kdl
    Path,

    /// Get a stored value
    Get {
        /// Key (enabled, address, user, password, use-tls, api-key, insecure-admin-access)
        key: String,
    },

    /// Set a stored value and write gui.kdl
    Set {
        /// Key (enabled, address, user, password, use-tls, api-key, insecure-admin-access)
        key: String,

        /// New value
        value: String,
    },
}
