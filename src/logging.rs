//! Structured logging setup.
//!
//! - Pretty output for interactive runs, JSON for CI (`LOG_FORMAT=json`)
//! - stderr by default, stdout or a log file on request (`LOG_OUTPUT`)
//! - `RUST_LOG` filtering, defaulting to `info`

use anyhow::{Context, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub output: LogOutput,
    /// Directory for log files (when output is `File`)
    pub log_dir: PathBuf,
    pub log_file_prefix: String,
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    File,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "gf-codegen".to_string(),
            default_filter: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(format) = env::var("LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => config.format,
            };
        }

        if let Ok(output) = env::var("LOG_OUTPUT") {
            config.output = match output.to_lowercase().as_str() {
                "stdout" => LogOutput::Stdout,
                "stderr" => LogOutput::Stderr,
                "file" => LogOutput::File,
                _ => config.output,
            };
        }

        if let Ok(log_dir) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(log_dir);
        }

        config
    }
}

/// Initialize logging with the given configuration.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub fn init_logging(config: LoggingConfig) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let (writer, guard) = match config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(io::stdout()),
        LogOutput::Stderr => tracing_appender::non_blocking(io::stderr()),
        LogOutput::File => {
            std::fs::create_dir_all(&config.log_dir).context("Failed to create log directory")?;
            let appender = tracing_appender::rolling::never(&config.log_dir, &config.log_file_prefix);
            tracing_appender::non_blocking(appender)
        }
    };

    let registry = tracing_subscriber::registry();
    match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(false)
                .with_current_span(true)
                .with_filter(env_filter);
            registry.with(fmt_layer).try_init()
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_target(false)
                .with_ansi(config.output != LogOutput::File)
                .with_filter(env_filter);
            registry.with(fmt_layer).try_init()
        }
    }
    .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.log_file_prefix, "gf-codegen");
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_logging_config_from_env() {
        unsafe {
            env::set_var("LOG_FORMAT", "json");
            env::set_var("LOG_OUTPUT", "stdout");
        }

        let config = LoggingConfig::from_env();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.output, LogOutput::Stdout);

        unsafe {
            env::remove_var("LOG_FORMAT");
            env::remove_var("LOG_OUTPUT");
        }
    }
}
