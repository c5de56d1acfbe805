mod app_config;
mod config;
mod product;
mod tables;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{
    EnvironmentalScore, LifecycleCo2, MaterialScore, NormalizedProduct, RankedCandidate,
};
pub use tables::{load_rank_tables, RankTables};

use thiserror::Error;

/// Errors produced while loading configuration (env vars or table files).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rank tables file {path}: {source}")]
    TablesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rank tables file: {0}")]
    TablesFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
