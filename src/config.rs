use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::{DelayModelConfig, DEFAULT_NUM_BUCKETS};

/// Environment variable prefix, e.g. `FLIGHT_DELAY__SERVER__PORT`
const ENV_PREFIX: &str = "FLIGHT_DELAY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: None,
        }
    }
}

/// Network shape and feature hashing parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub vocab_size: usize,
    pub embedding_dim: usize,
    pub num_buckets: usize,
    /// Fixed RNG seed for reproducible weights
    pub seed: Option<u64>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        let model = DelayModelConfig::new();
        Self {
            vocab_size: model.vocab_size,
            embedding_dim: model.embedding_dim,
            num_buckets: DEFAULT_NUM_BUCKETS,
            seed: None,
        }
    }
}

impl ModelSettings {
    pub fn model_config(&self) -> DelayModelConfig {
        DelayModelConfig::new()
            .with_vocab_size(self.vocab_size)
            .with_embedding_dim(self.embedding_dim)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FLIGHT_DELAY__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FLIGHT_DELAY__MODEL__NUM_BUCKETS -> model.num_buckets
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
