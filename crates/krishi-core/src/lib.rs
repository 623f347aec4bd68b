//! Shared configuration and domain records for the krishi crop-assistant client.

pub mod app_config;
pub mod config;
pub mod enrichment;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use enrichment::{formatted_spans, parse_sections, strip_markdown, Section, Span};
pub use records::{
    Coordinates, ImageRef, ImageSource, OpeningHours, PlaceDetails, StoreKey, StoreRecord,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
