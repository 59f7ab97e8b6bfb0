//! Layered configuration for retryctl: named [`RetryPolicy`] presets.
//!
//! Follows the same `Config::load` pattern the rest of this house style
//! uses for its own `Config`: start from built-in defaults, overlay a
//! TOML file if one exists, fail loudly on a malformed file but fall back
//! silently to defaults when no file was explicitly requested.

use crate::policy::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A named set of retry policies plus which one callers get when they
/// don't ask for a preset by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub policies: HashMap<String, RetryPolicy>,
    pub default_policy: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut policies = HashMap::new();
        policies.insert("default".to_string(), RetryPolicy::bounded_default());
        policies.insert("unbounded".to_string(), RetryPolicy::unbounded());
        Self {
            policies,
            default_policy: "default".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or `.retryctl.toml` in the
    /// current directory if `path` is `None`. Falls back to
    /// [`Config::default`] when the file doesn't exist; fails loudly on
    /// a malformed file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(".retryctl.toml"),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content).with_context(|| {
                format!(
                    "Failed to parse config: {}\n  Tip: each [policies.<name>] table needs initial_interval, maximum_interval, backoff_coefficient, maximum_attempts",
                    config_path.display()
                )
            })?;
            Ok(config)
        } else {
            if path.is_some() {
                eprintln!("WARNING: config file not found: {}", config_path.display());
                eprintln!("   Using default presets (\"default\", \"unbounded\").");
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Resolves a named preset, or [`Config::default_policy`] if `name`
    /// is `None`.
    pub fn resolve_policy(&self, name: Option<&str>) -> Result<&RetryPolicy, crate::error::ConfigError> {
        let key = name.unwrap_or(&self.default_policy);
        self.policies
            .get(key)
            .ok_or_else(|| crate::error::ConfigError::UnknownPreset(key.to_string()))
    }
}
