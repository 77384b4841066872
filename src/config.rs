//! Mapping configuration file support
//!
//! Handles parsing of `.pi-mapping.toml` configuration files and
//! environment variable overrides:
//!
//! ```toml
//! [mapping]
//! custom_attribute = "b8KbU93phhz"
//! generate_indicators = true
//!
//! [limits]
//! cross_product_warning = 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::validation::validate_uid;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".pi-mapping.toml";

/// Environment variable for the data element custom attribute UID
pub const ENV_CUSTOM_ATTRIBUTE: &str = "PI_MAPPING_CUSTOM_ATTRIBUTE";

/// Environment variable toggling indicator generation
pub const ENV_GENERATE_INDICATORS: &str = "PI_MAPPING_GENERATE_INDICATORS";

/// Environment variable for the cross product warning threshold
pub const ENV_CROSS_PRODUCT_WARNING: &str = "PI_MAPPING_CROSS_PRODUCT_WARNING";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Configuration error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Mapping section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MappingSection {
    /// Custom attribute stamped with the mapped data element UID on every
    /// generated program indicator and indicator
    #[serde(default)]
    pub custom_attribute: String,

    /// Generate an indicator and indicator group alongside program indicators
    #[serde(default)]
    pub generate_indicators: bool,
}

/// Limits section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitsSection {
    /// Log a warning when one row generates more program indicators than this
    #[serde(default = "default_cross_product_warning")]
    pub cross_product_warning: usize,
}

fn default_cross_product_warning() -> usize {
    500
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            cross_product_warning: default_cross_product_warning(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.pi-mapping.toml` configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MappingConfig {
    #[serde(default)]
    pub mapping: MappingSection,

    #[serde(default)]
    pub limits: LimitsSection,
}

impl MappingConfig {
    /// Configuration for the given custom attribute, everything else default
    pub fn new(custom_attribute: impl Into<String>) -> Self {
        Self {
            mapping: MappingSection {
                custom_attribute: custom_attribute.into(),
                generate_indicators: false,
            },
            ..Default::default()
        }
    }

    /// Builder style toggle for indicator generation
    pub fn with_indicators(mut self, generate_indicators: bool) -> Self {
        self.mapping.generate_indicators = generate_indicators;
        self
    }

    pub fn custom_attribute(&self) -> &str {
        &self.mapping.custom_attribute
    }

    pub fn generate_indicators(&self) -> bool {
        self.mapping.generate_indicators
    }

    /// Load configuration from a workspace directory
    ///
    /// Looks for `.pi-mapping.toml` in the workspace directory.
    /// Falls back to defaults if not found.
    pub fn load(workspace_path: &Path) -> ConfigResult<Self> {
        let config_path = workspace_path.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;

            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a workspace directory
    pub fn save(&self, workspace_path: &Path) -> ConfigResult<()> {
        let config_path = workspace_path.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(attribute) = std::env::var(ENV_CUSTOM_ATTRIBUTE) {
            self.mapping.custom_attribute = attribute;
        }

        if let Ok(flag) = std::env::var(ENV_GENERATE_INDICATORS) {
            if let Some(enabled) = parse_flag(&flag) {
                self.mapping.generate_indicators = enabled;
            }
        }

        if let Ok(threshold) = std::env::var(ENV_CROSS_PRODUCT_WARNING) {
            if let Ok(threshold) = threshold.parse() {
                self.limits.cross_product_warning = threshold;
            }
        }
    }

    /// Check the configuration can drive generation
    pub fn validate(&self) -> ConfigResult<()> {
        validate_uid(&self.mapping.custom_attribute).map_err(|e| {
            ConfigError::Invalid(format!("mapping.custom_attribute is not usable: {}", e))
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
