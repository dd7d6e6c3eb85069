//! Config Loader: parse generation configs from JSON or YAML
//!
//! ## Usage
//!
//! ```rust,ignore
//! let loader = ConfigLoader::new();
//! let config = loader.load_file("sequence.yaml")?;
//! ```

use std::path::Path;

use crate::config::GenerationConfig;
use crate::error::ConfigError;

/// Limits applied to every loaded config
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_length: usize,
    pub max_attempts: usize,
    pub max_turn_intensity: f64,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_length: 64,
            max_attempts: 10_000,
            max_turn_intensity: 3.0,
        }
    }
}

/// Config loader
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    pub limits: ConfigLimits,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create loader with custom limits
    pub fn with_limits(limits: ConfigLimits) -> Self {
        Self { limits }
    }

    /// Parse and validate a JSON config
    pub fn parse_json(&self, json: &str) -> Result<GenerationConfig, ConfigError> {
        let config: GenerationConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        self.checked(config)
    }

    /// Parse and validate a YAML config
    pub fn parse_yaml(&self, yaml: &str) -> Result<GenerationConfig, ConfigError> {
        let config: GenerationConfig =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        self.checked(config)
    }

    /// Load a config file, picking the format from its extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<GenerationConfig, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let text = std::fs::read_to_string(path)?;
        log::debug!("Loading config from {}", path.display());

        match extension.as_str() {
            "json" => self.parse_json(&text),
            "yaml" | "yml" => self.parse_yaml(&text),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    fn checked(&self, config: GenerationConfig) -> Result<GenerationConfig, ConfigError> {
        if let Err(e) = config.validate_with(&self.limits) {
            log::warn!("Rejected generation config: {e}");
            return Err(e);
        }
        Ok(config)
    }
}
