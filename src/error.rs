//! Error types for webnav.

use thiserror::Error;

/// Library-level error type for webnav operations.
#[derive(Error, Debug)]
pub enum WebnavError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content fetch failed: {0}")]
    Fetch(String),

    #[error("Chat store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for webnav operations.
pub type Result<T> = std::result::Result<T, WebnavError>;
