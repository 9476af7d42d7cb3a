//! Neuro Signature - rules-based cellular signature and cognitive risk scoring
//!
//! Turns wearable and cognitive-test telemetry into proxy biomarker scores
//! through a deterministic pipeline: metric mapping → composite risk →
//! classification → recommendation and alert selection → report assembly.
//!
//! ## Modules
//!
//! - **Scoring core**: `mapper`, `signature`, `recommendations`, `alerts`, `trend`
//! - **Boundary**: `config` (wire record and defaults), `encoder`, `ffi`

pub mod alerts;
pub mod catalog;
pub mod config;
pub mod encoder;
pub mod error;
pub mod mapper;
pub mod pipeline;
pub mod recommendations;
pub mod signature;
pub mod trend;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::{Locale, OrchestratorConfig, RawTelemetry, TelemetryDefaults};
pub use error::ComputeError;
pub use pipeline::{orchestrate, orchestrate_at, telemetry_to_report, OrchestrationService};
pub use types::{OrchestrationResult, TelemetryInput};

/// Library version embedded in every report
pub const SIGNATURE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "neuro-signature";
