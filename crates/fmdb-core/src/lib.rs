//! Shared domain types and configuration for the FMDB workspace.
//!
//! This crate is pure: no I/O beyond reading config files, no async. The
//! geo-distance ranker in [`geo`] and the search-criteria resolution in
//! [`search`] are both consumed by `fmdb-server` and testable in isolation.

use thiserror::Error;

pub mod app_config;
mod config;
pub mod geo;
pub mod markets;
pub mod search;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read markets file {path}")]
    MarketsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse markets file")]
    MarketsFileParse(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
