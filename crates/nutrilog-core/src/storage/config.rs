//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Remote mirror endpoint and account identity
//! - The fixed day-boundary offset used by the streak engine
//!
//! Configuration is stored at `~/.config/nutrilog/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;

/// Remote mirror configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base URL of the realtime database, e.g. `https://example.firebaseio.com`.
    #[serde(default)]
    pub database_url: String,
    /// Authenticated account identifier. Empty means local-only operation.
    #[serde(default)]
    pub user_id: String,
}

/// Streak engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Whole hours east of UTC used to cut calendar days at midnight.
    /// Fixed rather than device-local so travel does not move the boundary.
    #[serde(default)]
    pub timezone_offset_hours: i32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/nutrilog/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub streak: StreakConfig,
}

fn default_true() -> bool {
    true
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            database_url: String::new(),
            user_id: String::new(),
        }
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            timezone_offset_hours: 0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            streak: StreakConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Mirror identity, present only when sync is enabled and both the
    /// endpoint and the account are configured.
    pub fn identity(&self) -> Option<(&str, &str)> {
        if self.enabled && !self.database_url.is_empty() && !self.user_id.is_empty() {
            Some((self.database_url.as_str(), self.user_id.as_str()))
        } else {
            None
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the key's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    fn set_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        if let Some(parents) = parents {
            for part in parents.split('.') {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
            }
        }

        let obj = current
            .as_object_mut()
            .ok_or_else(|| format!("unknown config key: {key}"))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| format!("unknown config key: {key}"))?;

        // New value must keep the existing type.
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<i64>() {
                    serde_json::Value::Number(n.into())
                } else {
                    return Err(format!("cannot parse '{value}' as number").into());
                }
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }
}
