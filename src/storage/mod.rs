//! Storage for gui.kdl.
//!
//! ## Location
//!
//! 1. An explicit path (the CLI's `--config` / `GUICFG_CONFIG`)
//! 2. `$GUICFG_CONFIG_DIR/gui.kdl`
//! 3. `~/.config/guicfg/gui.kdl` (platform config dir)
//!
//! A missing file is not an error: the record falls back to defaults and is
//! reported with [`RecordOrigin::Defaults`].

use kdl::KdlDocument;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{EnvLookup, GuiConfig, RecordOrigin};
use crate::{Error, Result};

/// Environment variable naming the config directory.
pub const GUICFG_CONFIG_DIR_ENV: &str = "GUICFG_CONFIG_DIR";

/// File name of the stored GUI settings.
pub const GUI_CONFIG_FILE_NAME: &str = "gui.kdl";

/// Resolve the config directory.
///
/// `GUICFG_CONFIG_DIR` wins over the platform config dir.
pub fn config_dir(env: &impl EnvLookup) -> Result<PathBuf> {
    if let Some(dir) = env.non_empty(GUICFG_CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join("guicfg"))
        .ok_or(Error::NoConfigDir)
}

/// Default location of gui.kdl.
pub fn default_config_path(env: &impl EnvLookup) -> Result<PathBuf> {
    Ok(config_dir(env)?.join(GUI_CONFIG_FILE_NAME))
}

/// A loaded record and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: GuiConfig,
    pub origin: RecordOrigin,
}

/// Reads and writes a single gui.kdl file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the explicit path if given, otherwise the default location.
    pub fn locate(explicit: Option<&Path>, env: &impl EnvLookup) -> Result<Self> {
        match explicit {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(default_config_path(env)?)),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the raw KDL document. A missing file reads as an empty document.
    pub fn read_kdl(&self) -> Result<KdlDocument> {
        if !self.exists() {
            return Ok(KdlDocument::new());
        }

        let content = fs::read_to_string(&self.path)?;
        content
            .parse::<KdlDocument>()
            .map_err(|e| Error::KdlParse {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Load the record.
    pub fn load(&self) -> Result<LoadedConfig> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "no gui config file, using defaults");
            return Ok(LoadedConfig {
                config: GuiConfig::default(),
                origin: RecordOrigin::Defaults,
            });
        }

        let doc = self.read_kdl()?;
        tracing::debug!(path = %self.path.display(), "loaded gui config");
        Ok(LoadedConfig {
            config: GuiConfig::from_kdl(&doc),
            origin: RecordOrigin::File,
        })
    }

    /// Write the record, creating parent directories as needed.
    ///
    /// On Unix the file is left at 0600 since it may hold a password and API key.
    pub fn save(&self, config: &GuiConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut content = String::from("// Admin GUI settings\n");
        content.push_str(&config.to_kdl().to_string());
        fs::write(&self.path, content)?;

        #[cfg(unix)]
        {
            use crate::config::GUI_CONFIG_FILE_MODE;
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(GUI_CONFIG_FILE_MODE))?;
        }

        tracing::debug!(path = %self.path.display(), "wrote gui config");
        Ok(())
    }
}
