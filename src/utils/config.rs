use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::{EARTH_RADIUS_KM, METERS_TO_KILOMETERS};

/// Environment variable naming an optional JSON configuration file
pub const CONFIG_ENV_VAR: &str = "GEO_TRILAT_CONFIG";

/// Tunable parameters of the trilateration solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrilaterationConfig {
    /// Radius of the spherical Earth model (km)
    pub earth_radius_km: f64,
    /// Multiplier converting input distances to kilometers
    pub distance_scale: f64,
    /// Negative z² values down to `-height_tolerance_km2` are rounded to zero
    pub height_tolerance_km2: f64,
}

impl Default for TrilaterationConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            distance_scale: METERS_TO_KILOMETERS,
            height_tolerance_km2: 1e-9,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl TrilaterationConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: TrilaterationConfig = serde_json::from_str(content).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to parse config: {}", e),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to serialize config: {}", e),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "earth_radius_km".to_string(),
                value: self.earth_radius_km.to_string(),
                reason: "must be a positive finite number".to_string(),
            });
        }

        if !(self.distance_scale.is_finite() && self.distance_scale > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "distance_scale".to_string(),
                value: self.distance_scale.to_string(),
                reason: "must be a positive finite number".to_string(),
            });
        }

        if !(self.height_tolerance_km2.is_finite() && self.height_tolerance_km2 >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "height_tolerance_km2".to_string(),
                value: self.height_tolerance_km2.to_string(),
                reason: "must be zero or a positive finite number".to_string(),
            });
        }

        Ok(())
    }
}
