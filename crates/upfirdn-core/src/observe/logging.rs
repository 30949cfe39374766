//! # Structured Logging
//!
//! Structured logging via the `tracing` ecosystem:
//!
//! - Multiple output formats (JSON, Pretty, Compact)
//! - Log level filtering, overridable with `RUST_LOG`
//! - Optional per-module filter directives
//!
//! ## Example
//!
//! ```rust,ignore
//! use upfirdn_core::observe::{init_logging, LogConfig, LogFormat, LogLevel};
//!
//! let config = LogConfig {
//!     level: LogLevel::Debug,
//!     format: LogFormat::Json,
//!     ..Default::default()
//! };
//!
//! init_logging(&config);
//!
//! tracing::info!(samples = 1024, "Resampling complete");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (per-call resampler events)
    Trace,
    /// Debug level (resampler construction, config loading)
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warning level (rejected output buffers)
    Warn,
    /// Error level (least verbose)
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable)
    Json,
    /// Pretty format (human-readable, colored)
    #[default]
    Pretty,
    /// Compact format (minimal, one line per event)
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include timestamps
    pub timestamps: bool,
    /// Include source location (file:line)
    pub source_location: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include thread names
    pub thread_names: bool,
    /// Include span events (enter/exit)
    pub span_events: bool,
    /// Module filter (e.g., "upfirdn_core=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            timestamps: true,
            source_location: false,
            thread_ids: false,
            thread_names: false,
            span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Create a development configuration (verbose, pretty).
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            thread_names: true,
            span_events: true,
            ..Default::default()
        }
    }

    /// Create a production configuration (JSON, minimal).
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            timestamps: true,
            ..Default::default()
        }
    }

    /// Create a quiet configuration (errors only).
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            timestamps: false,
            ..Default::default()
        }
    }

    /// Filter directives: the explicit filter if valid, else `RUST_LOG`,
    /// else the configured level.
    fn env_filter(&self) -> EnvFilter {
        if let Some(ref custom) = self.filter {
            EnvFilter::try_new(custom).unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
        } else {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
        }
    }
}

/// Initialize the global logging subscriber.
///
/// This should be called once at application startup.
/// Subsequent calls will be silently ignored.
pub fn init_logging(config: &LogConfig) {
    let span_events = if config.span_events {
        fmt::format::FmtSpan::FULL
    } else {
        fmt::format::FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_thread_ids(config.thread_ids)
        .with_thread_names(config.thread_names)
        .with_span_events(span_events);

    let layer = match (config.format, config.timestamps) {
        (LogFormat::Json, true) => layer.json().boxed(),
        (LogFormat::Json, false) => layer.json().without_time().boxed(),
        (LogFormat::Pretty, true) => layer.pretty().boxed(),
        (LogFormat::Pretty, false) => layer.pretty().without_time().boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(layer)
        .with(config.env_filter());

    // Ignore error if subscriber was already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Debug), "debug");
        assert_eq!(format!("{}", LogLevel::Info), "info");
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_config_presets() {
        let dev = LogConfig::development();
        assert_eq!(dev.level, LogLevel::Debug);
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.source_location);

        let prod = LogConfig::production();
        assert_eq!(prod.level, LogLevel::Info);
        assert_eq!(prod.format, LogFormat::Json);

        let quiet = LogConfig::quiet();
        assert_eq!(quiet.level, LogLevel::Error);
        assert!(!quiet.timestamps);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: LogConfig = serde_yaml::from_str("level: trace").unwrap();
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.timestamps);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(&LogConfig::quiet());
        init_logging(&LogConfig::development());
        tracing::error!("still logging");
    }
}
