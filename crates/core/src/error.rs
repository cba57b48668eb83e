//! Error types for modcfg
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for modcfg
#[derive(Error, Debug)]
pub enum McError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dependency error: {0}")]
    Dependency(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Clean failed: {0}")]
    Clean(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for modcfg operations
pub type Result<T> = std::result::Result<T, McError>;

impl McError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            McError::Io(e) => format!("File operation failed: {}", e),
            McError::Config(msg) => format!("Configuration error: {}", msg),
            McError::Dependency(msg) => format!("Dependency error: {}", msg),
            McError::Clean(msg) => format!("Clean failed: {}", msg),
            McError::NotFound(msg) => format!("Not found: {}", msg),
            _ => self.to_string(),
        }
    }
}
