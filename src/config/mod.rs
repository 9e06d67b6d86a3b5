/// Database configuration and connection management
pub mod database;

/// Menu seed configuration from config.toml
pub mod menu;
