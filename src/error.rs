use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the events table
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Fetching data from {url} failed: {message}")]
    #[diagnostic(code(events_table::fetch))]
    Fetch { url: String, message: String },

    #[error("Malformed event: {0}")]
    #[diagnostic(code(events_table::malformed_event))]
    MalformedEvent(String),

    #[error("Formatting error: {0}")]
    #[diagnostic(code(events_table::formatting))]
    Formatting(String),

    #[error("Events have not been fetched yet")]
    #[diagnostic(
        code(events_table::not_ready),
        help("wait for the table to become ready before switching tabs")
    )]
    NotReady,

    #[error("Environment error: {0}")]
    #[diagnostic(code(events_table::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(events_table::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(events_table::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(events_table::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(events_table::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(events_table::other))]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type TableResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create fetch errors for a request target
pub fn fetch_error(url: &str, message: impl std::fmt::Display) -> Error {
    Error::Fetch {
        url: url.to_string(),
        message: message.to_string(),
    }
}

/// Helper to create formatting errors
pub fn formatting_error(message: &str) -> Error {
    Error::Formatting(message.to_string())
}

/// Helper to create malformed event errors
pub fn malformed_event_error(message: &str) -> Error {
    Error::MalformedEvent(message.to_string())
}
