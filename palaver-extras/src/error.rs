//! Error types for palaver-extras

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtrasError {
    #[cfg(feature = "schema")]
    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    #[cfg(feature = "telemetry")]
    #[error("Telemetry initialization error: {0}")]
    TelemetryInit(String),

    #[cfg(feature = "server")]
    #[error("Server adapter error: {0}")]
    ServerAdapter(String),

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, ExtrasError>;
