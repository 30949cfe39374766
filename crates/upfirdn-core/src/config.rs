//! # Configuration
//!
//! YAML configuration for resampling jobs: conversion rates, flush mode and
//! logging.
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `UPFIRDN_CONFIG` environment variable
//! 2. `./upfirdn.yaml` (current directory)
//! 3. `~/.config/upfirdn/config.yaml` (user config)
//! 4. `/etc/upfirdn/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! resampler:
//!   up_rate: 4
//!   down_rate: 3
//!   flush: drain
//!
//! logging:
//!   level: debug
//!   format: compact
//! ```

use crate::error::Result as ResampleResult;
use crate::observe::LogConfig;
use crate::resampler::Resampler;
use crate::sample::{Convolve, OutputOf, Sample};
use crate::upfirdn::{run_upfirdn, Flush};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "UPFIRDN_CONFIG";

/// Error type for configuration operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found
    NotFound(String),
    /// Failed to read configuration file
    ReadError(String),
    /// Failed to parse configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(msg) => write!(f, "config not found: {}", msg),
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rate conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResamplerConfig {
    /// Upsampling factor L
    pub up_rate: usize,
    /// Downsampling factor M
    pub down_rate: usize,
    /// Padding applied by one-shot runs
    pub flush: Flush,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self {
            up_rate: 1,
            down_rate: 1,
            flush: Flush::Drain,
        }
    }
}

impl ResamplerConfig {
    /// Build a streaming resampler with these rates.
    pub fn build<S, C>(&self, taps: &[C]) -> ResampleResult<Resampler<S, C>>
    where
        S: Convolve<C>,
        C: Sample,
    {
        Resampler::new(self.up_rate, self.down_rate, taps)
    }

    /// One-shot resample of `input` with these rates and flush mode.
    pub fn run<S, C>(&self, input: &[S], taps: &[C]) -> ResampleResult<Vec<OutputOf<S, C>>>
    where
        S: Convolve<C>,
        C: Sample,
    {
        run_upfirdn(input, taps, self.up_rate, self.down_rate, self.flush)
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpfirdnConfig {
    /// Rate conversion
    pub resampler: ResamplerConfig,
    /// Logging
    pub logging: LogConfig,
}

impl UpfirdnConfig {
    /// Load configuration from the default search path.
    ///
    /// Search order:
    /// 1. `UPFIRDN_CONFIG` environment variable
    /// 2. `./upfirdn.yaml`
    /// 3. `~/.config/upfirdn/config.yaml`
    /// 4. `/etc/upfirdn/config.yaml`
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = Path::new(&path);
            if path.exists() {
                return Self::load_from(path);
            }
            return Err(ConfigError::NotFound(format!(
                "{} points to {}",
                CONFIG_ENV_VAR,
                path.display()
            )));
        }

        for path in &Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./upfirdn.yaml")];

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "upfirdn") {
            paths.push(config_dir.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/upfirdn/config.yaml"));

        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resampler.up_rate == 0 {
            return Err(ConfigError::ValidationError(
                "up_rate must be > 0".to_string(),
            ));
        }
        if self.resampler.down_rate == 0 {
            return Err(ConfigError::ValidationError(
                "down_rate must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            resampler: ResamplerConfig {
                up_rate: 4,
                down_rate: 3,
                flush: Flush::Drain,
            },
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{LogFormat, LogLevel};

    #[test]
    fn test_default_config() {
        let config = UpfirdnConfig::default();
        assert_eq!(config.resampler.up_rate, 1);
        assert_eq!(config.resampler.down_rate, 1);
        assert_eq!(config.resampler.flush, Flush::Drain);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
resampler:
  up_rate: 4
  down_rate: 3
  flush: filter_length

logging:
  level: debug
  format: json
"#;

        let config = UpfirdnConfig::parse(yaml).unwrap();
        assert_eq!(config.resampler.up_rate, 4);
        assert_eq!(config.resampler.down_rate, 3);
        assert_eq!(config.resampler.flush, Flush::FilterLength);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
resampler:
  down_rate: 2
"#;

        let config = UpfirdnConfig::parse(yaml).unwrap();
        assert_eq!(config.resampler.down_rate, 2);
        // Defaults should be applied
        assert_eq!(config.resampler.up_rate, 1);
        assert_eq!(config.resampler.flush, Flush::Drain);
    }

    #[test]
    fn test_validation() {
        let mut config = UpfirdnConfig::default();
        assert!(config.validate().is_ok());

        config.resampler.up_rate = 0;
        assert!(config.validate().is_err());

        config.resampler.up_rate = 2;
        config.resampler.down_rate = 0;
        assert!(config.validate().is_err());

        assert!(matches!(
            UpfirdnConfig::parse("resampler:\n  up_rate: 0\n"),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            UpfirdnConfig::parse("resampler: [not, a, map]"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_example_yaml() {
        let yaml = UpfirdnConfig::example_yaml();
        assert!(yaml.contains("resampler:"));
        assert!(yaml.contains("logging:"));
        let parsed = UpfirdnConfig::parse(&yaml).unwrap();
        assert_eq!(parsed.resampler.up_rate, 4);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upfirdn.yaml");

        let mut config = UpfirdnConfig::default();
        config.resampler.up_rate = 3;
        config.resampler.flush = Flush::None;
        config.save(&path).unwrap();

        let loaded = UpfirdnConfig::load_from(&path).unwrap();
        assert_eq!(loaded.resampler, config.resampler);
    }

    #[test]
    fn test_load_missing_file() {
        let err = UpfirdnConfig::load_from(Path::new("/nonexistent/upfirdn.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_build_and_run() {
        let config = UpfirdnConfig::parse("resampler:\n  up_rate: 3\n").unwrap();
        let mut resampler = config.resampler.build::<f64, f64>(&[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(resampler.needed_out_count(2), 6);
        assert_eq!(resampler.apply(&[1.0, 2.0]).unwrap(), vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);

        let y = config.resampler.run::<f64, f64>(&[1.0, 2.0], &[1.0]).unwrap();
        assert_eq!(y, vec![1.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_config_search_paths() {
        let paths = UpfirdnConfig::config_search_paths();
        assert!(!paths.is_empty());
        assert!(paths[0].ends_with("upfirdn.yaml"));
    }
}
