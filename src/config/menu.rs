//! Menu configuration loading from config.toml
//!
//! The items listed under `[[menu_items]]` seed the catalog on first run, when
//! the `menu_items` table is still empty.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Catalog entries to seed
    #[serde(default)]
    pub menu_items: Vec<MenuItemConfig>,
}

/// Configuration for a single menu item
#[derive(Debug, Deserialize, Clone)]
pub struct MenuItemConfig {
    /// Display name
    pub name: String,
    /// Menu section: `veg`, `nonVeg` or `water`
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Optional size label
    #[serde(default)]
    pub size: Option<String>,
    /// Optional temperature variant
    #[serde(default)]
    pub temperature: Option<String>,
}

/// Loads menu configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading menu configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads menu configuration from `MENU_CONFIG`, or `./config.toml` when unset
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("MENU_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
