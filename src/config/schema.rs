//! KDL schema for gui.kdl, the stored admin GUI settings.
//!
//! # KDL Schema
//!
//! ```kdl
//! enabled #true
//! address "127.0.0.1:8384"
//! user "admin"
//! password "$2a$10$..."
//! use-tls #false
//! api-key "abc123"
//! insecure-admin-access #false
//! ```
//!
//! Every node is optional. Unknown nodes are ignored and a node with a value
//! of the wrong type leaves the field at its default.

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default listen address for the admin GUI.
pub const DEFAULT_GUI_ADDRESS: &str = "127.0.0.1:8384";

/// Stored admin GUI settings.
///
/// A pure snapshot: the resolver reads it and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Whether the admin GUI is served at all
    pub enabled: bool,

    /// Stored host:port pair
    pub address: String,

    /// Basic auth user name
    pub user: String,

    /// Stored (already encoded) password
    pub password: String,

    /// Stored TLS preference
    #[serde(rename = "useTLS")]
    pub use_tls: bool,

    /// Stored API key
    #[serde(rename = "apiKey")]
    pub api_key: String,

    /// Allow admin access without authentication
    #[serde(rename = "insecureAdminAccess")]
    pub insecure_admin_access: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            address: DEFAULT_GUI_ADDRESS.to_string(),
            user: String::new(),
            password: String::new(),
            use_tls: false,
            api_key: String::new(),
            insecure_admin_access: false,
        }
    }
}

impl GuiConfig {
    /// Create a config holding the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from a KDL document.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        for field in GuiField::ALL {
            let Some(value) = doc
                .get(field.as_str())
                .and_then(|node| node.entries().first())
                .map(|entry| entry.value())
            else {
                continue;
            };

            match config.slot_mut(field) {
                SlotMut::Bool(slot) => {
                    if let Some(b) = value.as_bool() {
                        *slot = b;
                    }
                }
                SlotMut::Str(slot) => {
                    if let Some(s) = value.as_string() {
                        *slot = s.to_string();
                    }
                }
            }
        }

        config
    }

    /// Convert config to a KDL document.
    ///
    /// Only fields that differ from the defaults are written.
    pub fn to_kdl(&self) -> KdlDocument {
        let defaults = Self::default();
        let mut doc = KdlDocument::new();

        for field in GuiField::ALL {
            if self.get(field) == defaults.get(field) {
                continue;
            }

            let value = match self.slot(field) {
                Slot::Bool(b) => KdlValue::Bool(b),
                Slot::Str(s) => KdlValue::String(s.to_string()),
            };

            let mut node = KdlNode::new(field.as_str());
            node.push(KdlEntry::new(value));
            doc.nodes_mut().push(node);
        }

        doc.autoformat();
        doc
    }

    /// Get a stored field as its string form.
    pub fn get(&self, field: GuiField) -> String {
        match self.slot(field) {
            Slot::Bool(b) => b.to_string(),
            Slot::Str(s) => s.to_string(),
        }
    }

    /// Set a stored field from its string form.
    ///
    /// Boolean fields accept `true/false`, `yes/no`, `on/off` and `1/0`.
    pub fn set(&mut self, field: GuiField, value: &str) -> Result<()> {
        match self.slot_mut(field) {
            SlotMut::Bool(slot) => {
                *slot = parse_bool(value).ok_or_else(|| Error::InvalidValue {
                    key: field.as_str().to_string(),
                    value: value.to_string(),
                    expected: "a boolean (true/false)".to_string(),
                })?;
            }
            SlotMut::Str(slot) => *slot = value.to_string(),
        }
        Ok(())
    }

    fn slot(&self, field: GuiField) -> Slot<'_> {
        match field {
            GuiField::Enabled => Slot::Bool(self.enabled),
            GuiField::Address => Slot::Str(&self.address),
            GuiField::User => Slot::Str(&self.user),
            GuiField::Password => Slot::Str(&self.password),
            GuiField::UseTls => Slot::Bool(self.use_tls),
            GuiField::ApiKey => Slot::Str(&self.api_key),
            GuiField::InsecureAdminAccess => Slot::Bool(self.insecure_admin_access),
        }
    }

    fn slot_mut(&mut self, field: GuiField) -> SlotMut<'_> {
        match field {
            GuiField::Enabled => SlotMut::Bool(&mut self.enabled),
            GuiField::Address => SlotMut::Str(&mut self.address),
            GuiField::User => SlotMut::Str(&mut self.user),
            GuiField::Password => SlotMut::Str(&mut self.password),
            GuiField::UseTls => SlotMut::Bool(&mut self.use_tls),
            GuiField::ApiKey => SlotMut::Str(&mut self.api_key),
            GuiField::InsecureAdminAccess => SlotMut::Bool(&mut self.insecure_admin_access),
        }
    }
}

/// Borrowed view of one stored field.
enum Slot<'a> {
    Bool(bool),
    Str(&'a str),
}

/// Mutable view of one stored field.
enum SlotMut<'a> {
    Bool(&'a mut bool),
    Str(&'a mut String),
}

/// A settable key in gui.kdl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiField {
    Enabled,
    Address,
    User,
    Password,
    UseTls,
    ApiKey,
    InsecureAdminAccess,
}

impl GuiField {
    /// All fields in file order.
    pub const ALL: [GuiField; 7] = [
        GuiField::Enabled,
        GuiField::Address,
        GuiField::User,
        GuiField::Password,
        GuiField::UseTls,
        GuiField::ApiKey,
        GuiField::InsecureAdminAccess,
    ];

    /// Parse from a KDL node name. Underscores are accepted in place of dashes.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
    }

    /// KDL node name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuiField::Enabled => "enabled",
            GuiField::Address => "address",
            GuiField::User => "user",
            GuiField::Password => "password",
            GuiField::UseTls => "use-tls",
            GuiField::ApiKey => "api-key",
            GuiField::InsecureAdminAccess => "insecure-admin-access",
        }
    }

    /// Whether the field holds a boolean.
    pub fn is_bool(&self) -> bool {
        match self {
            GuiField::Enabled | GuiField::UseTls | GuiField::InsecureAdminAccess => true,
            GuiField::Address | GuiField::User | GuiField::Password | GuiField::ApiKey => false,
        }
    }

    /// Whether the field holds a secret that should be masked for display.
    pub fn is_secret(&self) -> bool {
        match self {
            GuiField::Password | GuiField::ApiKey => true,
            GuiField::Enabled
            | GuiField::Address
            | GuiField::User
            | GuiField::UseTls
            | GuiField::InsecureAdminAccess => false,
        }
    }
}

impl std::fmt::Display for GuiField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GuiField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::UnknownKey(s.to_string()))
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Required permissions for gui.kdl (Unix: 0600, it may hold a password and API key).
#[cfg(unix)]
pub const GUI_CONFIG_FILE_MODE: u32 = 0o600;
