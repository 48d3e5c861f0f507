//! Configuration system
//!
//! File-backed configuration with format dispatch by extension (TOML and
//! RON), plus the tuning settings consumed by the intersection engine.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # Query Engine Settings
///
/// Tuning values for the intersection engine. Loadable from TOML or RON
/// through the [`Config`] trait so applications can ship query tuning
/// alongside their other configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Extra range granted beyond a segment's far endpoint, so grazing
    /// contact at the endpoint surface still registers
    pub segment_range_padding: f32,

    /// Range assigned to rays resolved from screen coordinates
    pub screen_ray_range: f32,

    /// Whether volume casts keep their world-space box for debug readback
    pub record_cast_volumes: bool,
}

impl QuerySettings {
    /// Create settings with standard values
    pub fn new() -> Self {
        Self {
            segment_range_padding: 0.1,
            screen_ray_range: f32::MAX,
            record_cast_volumes: true,
        }
    }

    /// Set the segment range padding
    pub fn with_segment_range_padding(mut self, padding: f32) -> Self {
        self.segment_range_padding = padding;
        self
    }

    /// Set the range used for resolved screen rays
    pub fn with_screen_ray_range(mut self, range: f32) -> Self {
        self.screen_ray_range = range;
        self
    }

    /// Enable or disable cast volume recording
    pub fn with_volume_recording(mut self, enabled: bool) -> Self {
        self.record_cast_volumes = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.segment_range_padding.is_finite() || self.segment_range_padding < 0.0 {
            return Err("Segment range padding must be finite and non-negative".to_string());
        }
        if self.screen_ray_range <= 0.0 {
            return Err("Screen ray range must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for QuerySettings {}
