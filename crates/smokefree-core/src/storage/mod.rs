mod config;
pub mod database;
pub mod kv;

pub use config::{Config, DisplayConfig, RefreshConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryKv};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the directory holding `smokefree.db` and `config.toml`.
///
/// `SMOKEFREE_DATA_DIR` wins if set. Otherwise `~/.config/smokefree[-dev]/`,
/// with the `-dev` suffix selected by `SMOKEFREE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("SMOKEFREE_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SMOKEFREE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("smokefree-dev")
            } else {
                base_dir.join("smokefree")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
