//! Game loop configuration loaded from TOML

use crate::error::{CadenceError, Result};
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings that shape the fixed-timestep loop.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```toml
/// ms_per_tick = 33
/// headless = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Milliseconds of simulated time consumed by one logic tick
    pub ms_per_tick: u64,
    /// Run without a render surface or profilers (server-side simulation)
    pub headless: bool,
    /// Upper bound on the wall-clock time fed to the accumulator per frame
    pub max_frame_time_ms: u64,
    /// Color the render surface is cleared to before render systems run
    pub clear_color: Color,
    /// Number of timing samples each profiler keeps
    pub profiler_samples: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            ms_per_tick: 16,
            headless: false,
            max_frame_time_ms: 250,
            clear_color: Color::CLEAR_GREY,
            profiler_samples: 120,
        }
    }
}

impl LoopConfig {
    /// Default configuration for a server-side simulation
    pub fn headless() -> Self {
        Self {
            headless: true,
            ..Self::default()
        }
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LoopConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.ms_per_tick == 0 {
            return Err(CadenceError::InvalidConfig(
                "ms_per_tick must be greater than 0".into(),
            ));
        }
        if self.max_frame_time_ms == 0 {
            return Err(CadenceError::InvalidConfig(
                "max_frame_time_ms must be greater than 0".into(),
            ));
        }
        if self.profiler_samples == 0 {
            return Err(CadenceError::InvalidConfig(
                "profiler_samples must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Fixed duration of one logic tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.ms_per_tick)
    }

    /// Spiral-of-death clamp applied to each frame's elapsed time
    pub fn max_frame_time(&self) -> Duration {
        Duration::from_millis(self.max_frame_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoopConfig::default();
        assert_eq!(config.tick_duration(), Duration::from_millis(16));
        assert_eq!(config.max_frame_time(), Duration::from_millis(250));
        assert!(!config.headless);
        assert_eq!(config.clear_color, Color::CLEAR_GREY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LoopConfig::from_toml_str("ms_per_tick = 33\nheadless = true\n").unwrap();
        assert_eq!(config.ms_per_tick, 33);
        assert!(config.headless);
        assert_eq!(config.max_frame_time_ms, 250);
    }

    #[test]
    fn test_clear_color_as_array() {
        let config = LoopConfig::from_toml_str("clear_color = [0.0, 0.5, 1.0, 1.0]").unwrap();
        assert_eq!(config.clear_color, Color::new(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = LoopConfig::from_toml_str("ms_per_tick = 0").unwrap_err();
        assert!(matches!(err, CadenceError::InvalidConfig(_)));
    }

    #[test]
    fn test_negative_tick_rejected() {
        let err = LoopConfig::from_toml_str("ms_per_tick = -5").unwrap_err();
        assert!(matches!(err, CadenceError::ConfigParseError(_)));
    }

    #[test]
    fn test_zero_clamp_rejected() {
        let config = LoopConfig {
            max_frame_time_ms: 0,
            ..LoopConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LoopConfig::headless();
        let text = config.to_toml_string().unwrap();
        assert_eq!(LoopConfig::from_toml_str(&text).unwrap(), config);
    }
}
