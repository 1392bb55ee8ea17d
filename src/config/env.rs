//! Environment lookup used by the resolver.
//!
//! The resolver never calls `std::env` directly. It reads overrides through an
//! [`EnvLookup`] so tests can hand it a [`MapEnv`] instead of mutating the
//! process environment.

use std::collections::HashMap;

/// Environment variable overriding the stored GUI address (and, by prefix, TLS).
pub const GUI_ADDRESS_OVERRIDE_ENV: &str = "GUI_ADDRESS_OVERRIDE";

/// Environment variable overriding the stored API key.
pub const GUI_APIKEY_OVERRIDE_ENV: &str = "GUI_APIKEY_OVERRIDE";

/// Read-only key/value lookup.
pub trait EnvLookup {
    /// Return the value for `key`, or `None` if unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Return the value for `key` only when it is set and non-empty.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

impl<T: EnvLookup + ?Sized> EnvLookup for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// The real process environment, read fresh on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are treated as unset.
        std::env::var(key).ok()
    }
}

/// In-memory lookup for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
