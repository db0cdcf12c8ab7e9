//! Configuration management for the burn rate predictor

use crate::types::prediction::RiskLevelThresholds;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Prefix for environment overrides, e.g. `BURNRATE__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "BURNRATE";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub risk_levels: RiskLevelThresholds,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Answer validation errors with 400 and faults with 500 instead of 200
    pub strict_status_codes: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ML model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX regressor
    pub path: PathBuf,
    /// Number of threads for ONNX inference (default: 1)
    pub onnx_threads: usize,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: LogFormat,
}

impl AppConfig {
    /// Load configuration from defaults, `config/config.toml` if present,
    /// and `BURNRATE__*` environment variables
    pub fn load() -> Result<Self> {
        Self::build(DEFAULT_CONFIG_PATH, false)
    }

    /// Load configuration from a specific path, which must exist
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(path, true)
    }

    fn build<P: AsRef<Path>>(path: P, required: bool) -> Result<Self> {
        let config: AppConfig = Self::defaults()?
            .add_source(
                File::from(path.as_ref())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let thresholds = RiskLevelThresholds::default();

        Ok(Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000_i64)?
            .set_default("server.strict_status_codes", false)?
            .set_default("model.path", "models/burn_rate.onnx")?
            .set_default("model.onnx_threads", 1_i64)?
            .set_default("risk_levels.medium", thresholds.medium)?
            .set_default("risk_levels.elevated", thresholds.elevated)?
            .set_default("risk_levels.high", thresholds.high)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.risk_levels.is_valid() {
            anyhow::bail!(
                "Risk level thresholds must be strictly increasing: medium={}, elevated={}, high={}",
                self.risk_levels.medium,
                self.risk_levels.elevated,
                self.risk_levels.high
            );
        }
        if self.model.onnx_threads == 0 {
            anyhow::bail!("model.onnx_threads must be at least 1");
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                strict_status_codes: false,
            },
            model: ModelConfig {
                path: PathBuf::from("models/burn_rate.onnx"),
                onnx_threads: 1,
            },
            risk_levels: RiskLevelThresholds::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}
