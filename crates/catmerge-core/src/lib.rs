pub mod app_config;
pub mod catalog_config;
pub mod config;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog_config::{load_catalog_config, CatalogConfig, ScoreWeights};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::ProductRecord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog config at {path}: {source}")]
    ConfigFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog config: {0}")]
    ConfigFileParse(#[from] serde_yaml::Error),

    #[error("catalog config validation failed: {0}")]
    Validation(String),
}
