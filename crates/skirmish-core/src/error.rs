//! Error types for Skirmish

use thiserror::Error;

/// The main error type for Skirmish operations
#[derive(Debug, Error)]
pub enum SkirmishError {
    #[error("Animation clip not found: {0}")]
    ClipNotFound(String),

    #[error("Invalid skeleton: {0}")]
    InvalidSkeleton(String),

    #[error("Animation error: {0}")]
    AnimationError(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(u64),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Skirmish operations
pub type Result<T> = std::result::Result<T, SkirmishError>;

impl From<toml::de::Error> for SkirmishError {
    fn from(err: toml::de::Error) -> Self {
        SkirmishError::TomlParseError(err.to_string())
    }
}
