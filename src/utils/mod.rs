//! Utility modules for configuration

pub mod config;

pub use config::{ConfigError, TrilaterationConfig, CONFIG_ENV_VAR};
