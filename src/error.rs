//! Error types for kbq.

use thiserror::Error;

/// Library-level error type for knowledge base operations.
#[derive(Error, Debug)]
pub enum KbError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed entry {path}: {reason}")]
    MalformedEntry { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for kbq operations.
pub type Result<T> = std::result::Result<T, KbError>;
