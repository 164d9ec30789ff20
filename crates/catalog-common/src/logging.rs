//! Logging configuration and initialization
//!
//! Centralized tracing setup for all catalog components. Supports console
//! and rotating-file output, text or JSON formatting, and env-based
//! configuration.
//!
//! Use the structured logging macros (`trace!`, `debug!`, `info!`, `warn!`,
//! `error!`) with fields rather than `println!`:
//!
//! ```rust
//! use tracing::info;
//!
//! # let product_id = 1;
//! info!(product_id = %product_id, "Product created");
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Minimum log level to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(anyhow::anyhow!("Invalid log level: {}", s)),
        }
    }
}

/// Output target for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
}

impl std::str::FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            _ => Err(anyhow::anyhow!("Invalid log output: {}", s)),
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub output: LogOutput,
    pub format: LogFormat,

    /// Directory for log files (only used with file output)
    pub log_dir: PathBuf,

    /// Log file name prefix (e.g. "catalog-server" -> "catalog-server.2024-01-18.log")
    pub log_file_prefix: String,

    /// Additional filter directives, e.g. "sqlx=warn,tower_http=debug"
    pub filter_directives: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            output: LogOutput::Console,
            format: LogFormat::Text,
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "catalog".to_string(),
            filter_directives: None,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    ///
    /// - `LOG_LEVEL`: trace, debug, info, warn, error
    /// - `LOG_OUTPUT`: console, file
    /// - `LOG_FORMAT`: text, json
    /// - `LOG_DIR`: directory for log files
    /// - `LOG_FILE_PREFIX`: prefix for rotated log files
    /// - `LOG_FILTER`: additional filter directives
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.level = level.parse()?;
        }
        if let Ok(output) = std::env::var("LOG_OUTPUT") {
            config.output = output.parse()?;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.format = format.parse()?;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var("LOG_FILE_PREFIX") {
            config.log_file_prefix = prefix;
        }
        if let Ok(filter) = std::env::var("LOG_FILTER") {
            config.filter_directives = Some(filter);
        }

        Ok(config)
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    pub fn with_filter_directives(mut self, filter: impl Into<String>) -> Self {
        self.filter_directives = Some(filter.into());
        self
    }
}

/// Initialize the global tracing subscriber
///
/// Must only be called once at application startup.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let mut filter =
        EnvFilter::from_default_env().add_directive(config.level.to_tracing_level().into());

    if let Some(ref directives) = config.filter_directives {
        for directive in directives.split(',') {
            filter = filter.add_directive(
                directive
                    .trim()
                    .parse()
                    .context("Failed to parse filter directive")?,
            );
        }
    }

    match config.output {
        LogOutput::Console => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE);

            match config.format {
                LogFormat::Text => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()?,
                LogFormat::Json => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.json())
                    .try_init()?,
            }
        },
        LogOutput::File => {
            std::fs::create_dir_all(&config.log_dir)
                .context("Failed to create log directory")?;

            let file_appender =
                tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // The guard must outlive the application; leak it so the writer
            // keeps flushing until exit.
            std::mem::forget(guard);

            let fmt_layer = fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(false);

            match config.format {
                LogFormat::Text => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()?,
                LogFormat::Json => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.json())
                    .try_init()?,
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
        assert_eq!("WARN".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert_eq!("warning".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_output_parsing() {
        assert_eq!("stdout".parse::<LogOutput>().ok(), Some(LogOutput::Console));
        assert_eq!("file".parse::<LogOutput>().ok(), Some(LogOutput::File));
        assert!("syslog".parse::<LogOutput>().is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().ok(), Some(LogFormat::Text));
        assert_eq!("json".parse::<LogFormat>().ok(), Some(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.output, LogOutput::Console);
        assert_eq!(config.log_file_prefix, "catalog");
    }

    #[test]
    fn test_builder_style_overrides() {
        let config = LogConfig::default()
            .with_file_prefix("catalog-server")
            .with_filter_directives("sqlx=warn");
        assert_eq!(config.log_file_prefix, "catalog-server");
        assert_eq!(config.filter_directives.as_deref(), Some("sqlx=warn"));
    }
}
