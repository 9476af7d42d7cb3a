//! Report encoding
//!
//! Wraps an orchestration result with producer metadata and serializes it to
//! JSON for the transport layer.

use crate::error::ComputeError;
use crate::types::{AnalysisReport, OrchestrationResult, Producer};
use crate::{PRODUCER_NAME, SIGNATURE_VERSION};
use uuid::Uuid;

/// Encoder for analysis reports
#[derive(Debug, Clone)]
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Attach producer metadata to a result
    pub fn encode(&self, result: OrchestrationResult) -> AnalysisReport {
        AnalysisReport {
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: SIGNATURE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            result,
        }
    }

    /// Encode to pretty-printed JSON
    pub fn encode_to_json(&self, result: OrchestrationResult) -> Result<String, ComputeError> {
        serde_json::to_string_pretty(&self.encode(result)).map_err(encoding_error)
    }

    /// Encode to a single JSON line (for NDJSON streams)
    pub fn encode_to_line(&self, result: OrchestrationResult) -> Result<String, ComputeError> {
        serde_json::to_string(&self.encode(result)).map_err(encoding_error)
    }
}

/// Serializer failures are reported as encoding errors in both output forms
fn encoding_error(e: serde_json::Error) -> ComputeError {
    ComputeError::EncodingError(e.to_string())
}
