//! Error types for the signature pipeline
//!
//! The scoring core is total and never fails; these errors only arise at the
//! boundary where telemetry and configuration are parsed and results encoded.

use thiserror::Error;

/// Errors that can occur while decoding input or encoding results
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse telemetry payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
