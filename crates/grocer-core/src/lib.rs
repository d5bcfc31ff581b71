//! Shared domain types and configuration for the `grocer` catalog exporter.

pub mod app_config;
pub mod catalog;
pub mod config;

use thiserror::Error;

pub use app_config::AppConfig;
pub use catalog::{
    slugify, CategoryKind, CategoryMeta, CategoryTarget, FetchOutcome, PageRange, ProductRecord,
};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
