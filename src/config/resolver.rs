//! Override resolution for the admin GUI settings.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. `GUI_ADDRESS_OVERRIDE` / `GUI_APIKEY_OVERRIDE`, when set and non-empty
//! 2. gui.kdl
//! 3. Built-in defaults
//!
//! Nothing here returns an error. A malformed address override is passed
//! through as-is so the listener that tries to bind it reports the failure.

use serde::Serialize;
use url::{Position, Url};

use crate::config::GuiConfig;
use crate::config::env::{EnvLookup, GUI_ADDRESS_OVERRIDE_ENV, GUI_APIKEY_OVERRIDE_ENV};

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from a loaded gui.kdl
    Config,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::Config => write!(f, "config"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether the record was read from a file or built from defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordOrigin {
    /// Loaded from gui.kdl
    File,
    /// No file; all fields are defaults
    #[default]
    Defaults,
}

impl RecordOrigin {
    fn source(self) -> ValueSource {
        match self {
            RecordOrigin::File => ValueSource::Config,
            RecordOrigin::Defaults => ValueSource::Default,
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Snapshot of every derived value, with sources.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedGui {
    pub enabled: bool,
    pub address: Resolved<String>,
    pub use_tls: Resolved<bool>,
    pub api_key: Resolved<String>,
    pub base_url: String,
}

impl ResolvedGui {
    /// Get the API key masked for display.
    ///
    /// Keys of eight characters or fewer are fully hidden.
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.api_key.value)
    }
}

/// Placeholder shown for secrets too short to reveal any part of.
const SHORT_SECRET_MASK: &str = "****";

/// Mask a secret for display purposes.
///
/// Up to 8 characters: fully hidden. Up to 12: first four shown. Longer:
/// first and last four shown.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 8 {
        SHORT_SECRET_MASK.to_string()
    } else if chars.len() <= 12 {
        let prefix: String = chars[..4].iter().collect();
        format!("{}...", prefix)
    } else {
        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    }
}

/// Derives the effective GUI address, TLS mode, API key and base URL.
///
/// Every accessor reads the environment lookup afresh, so changes made while
/// the process is running are observed on the next call.
#[derive(Debug, Clone)]
pub struct GuiResolver<'a, E> {
    config: &'a GuiConfig,
    env: E,
    origin: RecordOrigin,
}

impl<'a, E: EnvLookup> GuiResolver<'a, E> {
    /// Create a resolver for a record of unknown origin.
    ///
    /// Stored values report [`ValueSource::Default`]; use [`Self::with_origin`]
    /// when the record was loaded from gui.kdl.
    pub fn new(config: &'a GuiConfig, env: E) -> Self {
        Self::with_origin(config, env, RecordOrigin::default())
    }

    /// Create a resolver that knows whether its record came from a file.
    pub fn with_origin(config: &'a GuiConfig, env: E, origin: RecordOrigin) -> Self {
        Self {
            config,
            env,
            origin,
        }
    }

    /// The stored record.
    pub fn config(&self) -> &GuiConfig {
        self.config
    }

    /// Effective listen address (host:port).
    pub fn address(&self) -> String {
        self.resolve_address().value
    }

    /// Effective TLS mode.
    pub fn use_tls(&self) -> bool {
        self.resolve_use_tls().value
    }

    /// Effective API key.
    pub fn api_key(&self) -> String {
        self.resolve_api_key().value
    }

    /// Base URL a client should use to reach the GUI, e.g. `http://127.0.0.1:8384/`.
    ///
    /// Wildcard bind hosts are rewritten to loopback.
    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls() { "https" } else { "http" };
        format!("{}://{}/", scheme, connectable_host(&self.address()))
    }

    /// Resolve everything at once, with sources.
    pub fn resolve(&self) -> ResolvedGui {
        let address = self.resolve_address();
        let use_tls = self.resolve_use_tls();
        let scheme = if use_tls.value { "https" } else { "http" };
        let base_url = format!("{}://{}/", scheme, connectable_host(&address.value));

        ResolvedGui {
            enabled: self.config.enabled,
            address,
            use_tls,
            api_key: self.resolve_api_key(),
            base_url,
        }
    }

    /// Resolve the address with its source.
    pub fn resolve_address(&self) -> Resolved<String> {
        match self.env.non_empty(GUI_ADDRESS_OVERRIDE_ENV) {
            Some(raw) => {
                tracing::debug!(
                    env = GUI_ADDRESS_OVERRIDE_ENV,
                    value = %raw,
                    "using GUI address override"
                );
                Resolved::new(
                    address_from_override(&raw),
                    self.env_source(GUI_ADDRESS_OVERRIDE_ENV),
                )
            }
            None => Resolved::new(self.config.address.clone(), self.origin.source()),
        }
    }

    /// Resolve the TLS mode with its source.
    ///
    /// An override decides TLS purely by its `https:` prefix, so a bare
    /// host:port override always means plain HTTP.
    pub fn resolve_use_tls(&self) -> Resolved<bool> {
        match self.env.non_empty(GUI_ADDRESS_OVERRIDE_ENV) {
            Some(raw) => Resolved::new(
                raw.starts_with("https:"),
                self.env_source(GUI_ADDRESS_OVERRIDE_ENV),
            ),
            None => Resolved::new(self.config.use_tls, self.origin.source()),
        }
    }

    /// Resolve the API key with its source.
    pub fn resolve_api_key(&self) -> Resolved<String> {
        match self.env.non_empty(GUI_APIKEY_OVERRIDE_ENV) {
            Some(key) => {
                tracing::debug!(env = GUI_APIKEY_OVERRIDE_ENV, "using GUI API key override");
                Resolved::new(key, self.env_source(GUI_APIKEY_OVERRIDE_ENV))
            }
            None => Resolved::new(self.config.api_key.clone(), self.origin.source()),
        }
    }

    fn env_source(&self, name: &str) -> ValueSource {
        ValueSource::EnvVar(name.to_string())
    }
}

/// Turn an address override into host:port.
///
/// The override may be `scheme://host:port/...` or a bare `host:port`. Only
/// values containing a slash are treated as URLs; if those fail to parse the
/// raw value is returned unchanged.
fn address_from_override(raw: &str) -> String {
    if !raw.contains('/') {
        return raw.to_string();
    }

    match Url::parse(raw) {
        Ok(url) => url_host(&url, raw),
        Err(e) => {
            tracing::warn!(
                env = GUI_ADDRESS_OVERRIDE_ENV,
                value = %raw,
                error = %e,
                "GUI address override is not a valid URL, using it verbatim"
            );
            raw.to_string()
        }
    }
}

/// The host[:port] part of an already-validated URL.
///
/// When the text after `scheme:` starts with `//` the authority is taken as
/// written, so an explicit default port (`https://host:443/`) is kept and
/// userinfo is dropped. Special schemes also accept `http:host` and
/// `http:/host`; those fall back to the normalized host from the parsed URL.
/// Empty when the URL has no authority.
fn url_host(url: &Url, raw: &str) -> String {
    if !url.has_authority() {
        return String::new();
    }
    let written = raw
        .trim_start()
        .split_once(':')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(url.scheme()))
        .and_then(|(_, rest)| rest.strip_prefix("//"));
    let Some(rest) = written else {
        return url[Position::BeforeHost..Position::AfterPort].to_string();
    };
    let authority = rest.split(['/', '\\', '?', '#']).next().unwrap_or_default();
    match authority.rsplit_once('@') {
        Some((_, host)) => host.to_string(),
        None => authority.to_string(),
    }
}

/// Rewrite a wildcard bind host into a loopback host a client can connect to.
pub fn connectable_host(host: &str) -> String {
    if host.starts_with(':') {
        // ":port", empty host
        format!("127.0.0.1{}", host)
    } else if let Some(port) = host.strip_prefix("0.0.0.0:") {
        format!("127.0.0.1:{}", port)
    } else if let Some(port) = host.strip_prefix("[::]:") {
        format!("[::1]:{}", port)
    } else {
        host.to_string()
    }
}
