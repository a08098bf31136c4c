//! TOML-based application configuration.
//!
//! Stores display preferences that are not part of the tracked settings:
//! - Currency symbol and decimal places for money saved
//! - Default output format for the CLI
//! - Refresh interval for `watch`
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// How statistics are rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub currency_decimals: u32,
    /// Print JSON instead of text when a command supports both.
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Upper bound for `display.currency_decimals`.
pub const MAX_CURRENCY_DECIMALS: u32 = 6;

fn default_currency_symbol() -> String {
    "¥".into()
}
fn default_interval_secs() -> u64 {
    1
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            currency_decimals: 0,
            json: false,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the key's type, or it is out of range.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        if updated.display.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("must be at most {MAX_CURRENCY_DECIMALS}"),
            }
            .into());
        }
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Render a money amount with the configured symbol and precision.
    pub fn format_money(&self, amount: f64) -> String {
        format!(
            "{}{:.*}",
            self.display.currency_symbol,
            self.display.currency_decimals.min(MAX_CURRENCY_DECIMALS) as usize,
            amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.display.currency_symbol, "¥");
        assert_eq!(parsed.refresh.interval_secs, 1);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[display]\ncurrency_symbol = \"$\"\n").unwrap();
        assert_eq!(parsed.display.currency_symbol, "$");
        assert_eq!(parsed.display.currency_decimals, 0);
        assert_eq!(parsed.refresh.interval_secs, 1);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("display.json").as_deref(), Some("false"));
        assert_eq!(cfg.get("refresh.interval_secs").as_deref(), Some("1"));
        assert_eq!(cfg.get("display.currency_symbol").as_deref(), Some("¥"));
        assert!(cfg.get("display.missing_key").is_none());
        assert!(cfg.get("display").is_none());
    }

    #[test]
    fn apply_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.apply("display.json", "true").unwrap();
        cfg.apply("display.currency_decimals", "2").unwrap();
        cfg.apply("display.currency_symbol", "€").unwrap();
        assert!(cfg.display.json);
        assert_eq!(cfg.display.currency_decimals, 2);
        assert_eq!(cfg.display.currency_symbol, "€");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.apply("display.nonexistent_key", "value").is_err());
        assert!(cfg.apply("", "value").is_err());
        assert!(cfg.apply("display", "value").is_err());
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("display.json", "not_a_bool").is_err());
        assert!(cfg.apply("refresh.interval_secs", "-1").is_err());
        assert!(!cfg.display.json);
    }

    #[test]
    fn apply_rejects_excessive_decimals() {
        let mut cfg = Config::default();
        assert!(cfg.apply("display.currency_decimals", "4000000000").is_err());
        assert_eq!(cfg.display.currency_decimals, 0);
        cfg.apply("display.currency_decimals", "6").unwrap();
        assert_eq!(cfg.display.currency_decimals, 6);
    }

    #[test]
    fn format_money_clamps_decimals_from_file() {
        let parsed: Config = toml::from_str("[display]\ncurrency_decimals = 4000000000\n").unwrap();
        assert_eq!(parsed.format_money(1.5), "¥1.500000");
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.refresh.interval_secs, 1);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "display = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn format_money_uses_precision() {
        let mut cfg = Config::default();
        assert_eq!(cfg.format_money(1259.6), "¥1260");
        cfg.display.currency_decimals = 2;
        cfg.display.currency_symbol = "$".into();
        assert_eq!(cfg.format_money(12.5), "$12.50");
    }
}
