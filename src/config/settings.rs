use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SecretError};

/// Project-level configuration, loaded from `.secret.toml`.
///
/// Every field has a default, so no config file is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Store file used when `-f` is not given.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Take the advisory writer lock during `set`.
    #[serde(default = "default_lock")]
    pub lock: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_path() -> String {
    "secrets.db".to_string()
}

fn default_lock() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            lock: default_lock(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".secret.toml";

    /// Load settings from `<dir>/.secret.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SecretError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the store path: explicit override first, then the
    /// configured path.  Relative paths are taken from `dir`.
    pub fn resolve_store_path(&self, dir: &Path, explicit: Option<&str>) -> PathBuf {
        dir.join(explicit.unwrap_or(&self.store_path))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
