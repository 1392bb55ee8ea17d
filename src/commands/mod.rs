//! Command implementations for the guicfg CLI.
//!
//! - `show` - every resolved value with its source
//! - `url` - the client base URL
//! - `config path|get|set` - the stored gui.kdl record

use serde::Serialize;

use crate::Result;
use crate::config::{EnvLookup, GuiField, GuiResolver, ResolvedGui, mask_secret};
use crate::storage::ConfigStore;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait CommandResult {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Result of `guicfg show`.
#[derive(Debug, Serialize)]
pub struct ShowResult {
    pub config_path: String,
    #[serde(flatten)]
    pub resolved: ResolvedGui,
    #[serde(skip)]
    pub reveal: bool,
}

impl ShowResult {
    fn display_api_key(&self) -> String {
        if self.reveal {
            self.resolved.api_key.value.clone()
        } else {
            self.resolved.masked_api_key()
        }
    }
}

impl CommandResult for ShowResult {
    fn to_json(&self) -> String {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(api_key) = value.get_mut("api_key") {
            api_key["value"] = serde_json::Value::String(self.display_api_key());
        }
        value.to_string()
    }

    fn to_human(&self) -> String {
        let r = &self.resolved;
        let api_key = if r.api_key.value.is_empty() {
            "(none)".to_string()
        } else {
            self.display_api_key()
        };

        let mut lines = vec![
            format!("Config:   {}", self.config_path),
            format!("Enabled:  {}", r.enabled),
            format!("Address:  {} ({})", r.address.value, r.address.source),
            format!("TLS:      {} ({})", r.use_tls.value, r.use_tls.source),
            format!("API key:  {} ({})", api_key, r.api_key.source),
            format!("URL:      {}", r.base_url),
        ];
        if !r.enabled {
            lines.push("Note: the admin GUI is disabled".to_string());
        }
        lines.join("\n")
    }
}

/// Result of `guicfg url`.
#[derive(Debug, Serialize)]
pub struct UrlResult {
    pub url: String,
}

impl CommandResult for UrlResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        self.url.clone()
    }
}

/// Result of `guicfg config path`.
#[derive(Debug, Serialize)]
pub struct ConfigPathResult {
    pub path: String,
    pub exists: bool,
}

impl CommandResult for ConfigPathResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        if self.exists {
            self.path.clone()
        } else {
            format!("{} (not created yet)", self.path)
        }
    }
}

/// Result of `guicfg config get` and `guicfg config set`.
#[derive(Debug, Serialize)]
pub struct ConfigValueResult {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub updated: bool,
}

impl CommandResult for ConfigValueResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        if self.updated {
            format!("Set {} = {}", self.key, self.value)
        } else {
            self.value.clone()
        }
    }
}

/// Resolve every value for display.
pub fn show(store: &ConfigStore, env: impl EnvLookup, reveal: bool) -> Result<ShowResult> {
    let loaded = store.load()?;
    let resolver = GuiResolver::with_origin(&loaded.config, env, loaded.origin);

    Ok(ShowResult {
        config_path: store.path().display().to_string(),
        resolved: resolver.resolve(),
        reveal,
    })
}

/// Resolve the base URL.
pub fn url(store: &ConfigStore, env: impl EnvLookup) -> Result<UrlResult> {
    let loaded = store.load()?;
    let resolver = GuiResolver::with_origin(&loaded.config, env, loaded.origin);

    Ok(UrlResult {
        url: resolver.base_url(),
    })
}

/// Report where gui.kdl lives.
pub fn config_path(store: &ConfigStore) -> ConfigPathResult {
    ConfigPathResult {
        path: store.path().display().to_string(),
        exists: store.exists(),
    }
}

/// Get a stored value. Overrides are not applied.
pub fn config_get(store: &ConfigStore, key: &str) -> Result<ConfigValueResult> {
    let field: GuiField = key.parse()?;
    let loaded = store.load()?;

    Ok(ConfigValueResult {
        key: field.as_str().to_string(),
        value: loaded.config.get(field),
        updated: false,
    })
}

/// Set a stored value and write gui.kdl.
pub fn config_set(store: &ConfigStore, key: &str, value: &str) -> Result<ConfigValueResult> {
    let field: GuiField = key.parse()?;
    let mut config = store.load()?.config;
    config.set(field, value)?;
    store.save(&config)?;

    let shown = if field.is_secret() {
        mask_secret(&config.get(field))
    } else {
        config.get(field)
    };

    Ok(ConfigValueResult {
        key: field.as_str().to_string(),
        value: shown,
        updated: true,
    })
}
