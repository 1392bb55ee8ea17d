//! Admin GUI configuration.
//!
//! ## gui.kdl - Stored GUI settings
//!
//! Located at (first match wins):
//! - `--config <path>` / `GUICFG_CONFIG`
//! - `$GUICFG_CONFIG_DIR/gui.kdl`
//! - `~/.config/guicfg/gui.kdl`
//!
//! Contains `enabled`, `address`, `user`, `password`, `use-tls`, `api-key`
//! and `insecure-admin-access`. See [`schema`].
//!
//! ## Overrides
//!
//! `GUI_ADDRESS_OVERRIDE` replaces the stored address and, by its `https:`
//! prefix, the TLS mode. `GUI_APIKEY_OVERRIDE` replaces the stored API key.
//! Both are read on every call through an [`EnvLookup`].
//!
//! Use the [`resolver`] module to derive the effective values.

pub mod env;
pub mod resolver;
pub mod schema;

pub use env::{
    EnvLookup, GUI_ADDRESS_OVERRIDE_ENV, GUI_APIKEY_OVERRIDE_ENV, MapEnv, ProcessEnv,
};
pub use resolver::{
    GuiResolver, RecordOrigin, Resolved, ResolvedGui, ValueSource, connectable_host, mask_secret,
};
#[cfg(unix)]
pub use schema::GUI_CONFIG_FILE_MODE;
pub use schema::{DEFAULT_GUI_ADDRESS, GuiConfig, GuiField};
