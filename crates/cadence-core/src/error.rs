//! Error types for Cadence

use thiserror::Error;

/// The main error type for Cadence operations
#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    ConfigParseError(String),

    #[error("TOML serialization error: {0}")]
    ConfigSerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Rendering mode requires a render surface")]
    MissingRenderSurface,

    #[error("Duplicate system name: {0}")]
    DuplicateSystemName(String),

    #[error("System '{system}' failed: {message}")]
    SystemFailed { system: String, message: String },

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),
}

impl CadenceError {
    /// Build a `SystemFailed` error for the named system
    pub fn system(system: impl Into<String>, message: impl Into<String>) -> Self {
        CadenceError::SystemFailed {
            system: system.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;

impl From<toml::de::Error> for CadenceError {
    fn from(err: toml::de::Error) -> Self {
        CadenceError::ConfigParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for CadenceError {
    fn from(err: toml::ser::Error) -> Self {
        CadenceError::ConfigSerError(err.to_string())
    }
}
