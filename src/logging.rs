//! Logging setup for the frame server.
//!
//! Output goes to stderr through a `tracing_subscriber` registry with an `EnvFilter`.
//! Levels and formats can come from the config file or from `OP_FRAME_LOG_*` variables.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub level: LogLevel,
    /// Output format (json, compact, pretty)
    pub format: LogFormat,
    /// Whether to enable colored output
    pub enable_colors: bool,
    /// Custom environment filter, replaces the level-derived filter when set
    pub custom_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            enable_colors: true,
            custom_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Override fields from environment variables
    ///
    /// - OP_FRAME_LOG_LEVEL: trace/debug/info/warn/error
    /// - OP_FRAME_LOG_FORMAT: json/compact/pretty
    /// - OP_FRAME_LOG_COLORS: true/false
    /// - OP_FRAME_LOG_FILTER: raw `EnvFilter` directive
    pub fn apply_env(&mut self) {
        if let Ok(level) = env::var("OP_FRAME_LOG_LEVEL") {
            self.level = level.parse().unwrap_or(self.level);
        }

        if let Ok(format) = env::var("OP_FRAME_LOG_FORMAT") {
            self.format = format.parse().unwrap_or(self.format);
        }

        if let Ok(colors) = env::var("OP_FRAME_LOG_COLORS") {
            self.enable_colors = colors.parse().unwrap_or(self.enable_colors);
        }

        if let Ok(filter) = env::var("OP_FRAME_LOG_FILTER") {
            if !filter.is_empty() {
                self.custom_filter = Some(filter);
            }
        }
    }

    /// Filter directive this configuration resolves to
    pub fn filter_directive(&self) -> String {
        match &self.custom_filter {
            Some(custom) => custom.clone(),
            None => default_filter(self.level),
        }
    }
}

/// Supported logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Supported log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON format
    Json,
    /// Compact human-readable format
    Compact,
    /// Pretty human-readable format with indentation
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Default filter for a level: our crate at `level`, HTTP plumbing at warn
pub fn default_filter(level: LogLevel) -> String {
    format!(
        "op_delegation_frame={},op_frame={},tower_http=warn,hyper=warn,tokio=warn",
        level.as_str(),
        level.as_str()
    )
}

/// Install the global tracing subscriber
pub fn setup_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| Error::Config(format!("Failed to create environment filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_ansi(config.enable_colors),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_ansi(config.enable_colors),
            )
            .try_init(),
    };

    installed.map_err(|e| Error::Other(format!("Failed to install tracing subscriber: {}", e)))
}
