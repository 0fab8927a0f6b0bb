//! Structured logging setup. Logs go to stderr so stdout stays parseable.

use crate::config::{CliConfig, LogFormat};
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level or filter directive (e.g. "info", "regform_validation=debug")
    pub level: String,
    /// JSON structured logging instead of plain text
    pub json_format: bool,
    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Debug output from this workspace's crates only, with source locations
    pub fn development() -> Self {
        Self {
            level: "regform=debug,regform_validation=debug".to_string(),
            json_format: false,
            include_location: true,
        }
    }
}

impl From<&CliConfig> for LoggingConfig {
    /// A plain `debug` level selects the development preset
    fn from(config: &CliConfig) -> Self {
        let json_format = config.log_format == LogFormat::Json;

        if config.log_level.eq_ignore_ascii_case("debug") {
            return Self {
                json_format,
                ..Self::development()
            };
        }

        Self {
            level: config.log_level.clone(),
            json_format,
            include_location: false,
        }
    }
}

/// Initialize logging. `RUST_LOG` wins over the configured level.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let layer = Layer::new()
        .with_writer(io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_target(false))
            .try_init()?;
    }

    tracing::debug!(
        level = %config.level,
        format = if config.json_format { "json" } else { "text" },
        "logging initialized"
    );

    Ok(())
}
