//! Telemetry defaults and orchestrator configuration
//!
//! Every telemetry field is optional on the wire. Missing fields are resolved
//! against [`TelemetryDefaults`] exactly once, before the scoring core runs,
//! so the core never observes absence.

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;
use crate::types::TelemetryInput;

/// Documented default for each optional telemetry field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryDefaults {
    /// Cognitive test score (0-100)
    pub cognitive_score: f64,
    /// Reaction time (ms)
    pub reaction_time_ms: f64,
    pub error_count: f64,
    /// Sleep efficiency (fraction)
    pub sleep_efficiency: f64,
    pub sleep_interruptions: f64,
    /// HRV (ms)
    pub hrv_ms: f64,
    /// Resting heart rate (bpm)
    pub resting_hr_bpm: f64,
    pub steps: f64,
    pub active_minutes: f64,
    /// Engagement index (0-100)
    pub engagement: f64,
}

impl Default for TelemetryDefaults {
    fn default() -> Self {
        Self {
            cognitive_score: 80.0,
            reaction_time_ms: 500.0,
            error_count: 2.0,
            sleep_efficiency: 0.8,
            sleep_interruptions: 2.0,
            hrv_ms: 45.0,
            resting_hr_bpm: 72.0,
            steps: 5000.0,
            active_minutes: 20.0,
            engagement: 75.0,
        }
    }
}

impl TelemetryDefaults {
    /// Load defaults from JSON; keys not present keep their documented value
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        serde_json::from_str(json).map_err(|e| ComputeError::InvalidConfig(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ComputeError> {
        serde_json::to_string_pretty(self).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}

/// Language of the recommendation and alert text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR", alias = "pt-br", alias = "pt")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        }
    }
}

/// Immutable configuration shared by every orchestration call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub defaults: TelemetryDefaults,
    pub locale: Locale,
}

/// Telemetry as received from the client; every field may be absent
///
/// Both the descriptive field names and the short names used by the mobile
/// client are accepted, but not both for the same field: a payload carrying
/// `hrv` and `hrv_ms` is rejected as a duplicate field. Counts are plain JSON
/// numbers, so averaged values such as `4500.0` or `15.5` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTelemetry {
    pub user_id: Option<String>,
    pub timestamp: Option<String>,
    pub cognitive_score: Option<f64>,
    #[serde(alias = "reaction_time")]
    pub reaction_time_ms: Option<f64>,
    #[serde(alias = "errors")]
    pub error_count: Option<f64>,
    pub sleep_efficiency: Option<f64>,
    pub sleep_interruptions: Option<f64>,
    #[serde(alias = "hrv")]
    pub hrv_ms: Option<f64>,
    #[serde(alias = "resting_hr")]
    pub resting_hr_bpm: Option<f64>,
    pub steps: Option<f64>,
    pub active_minutes: Option<f64>,
    pub engagement: Option<f64>,
}

impl RawTelemetry {
    /// Parse a single telemetry object
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of telemetry objects
    pub fn parse_array(json: &str) -> Result<Vec<Self>, ComputeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse newline-delimited JSON, skipping blank lines
    pub fn parse_ndjson(input: &str) -> Result<Vec<Self>, ComputeError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line.trim()).map_err(|e| {
                    ComputeError::ParseError(format!("line {}: {}", idx + 1, e))
                })
            })
            .collect()
    }

    /// Substitute defaults for every missing field
    pub fn resolve(&self, defaults: &TelemetryDefaults) -> TelemetryInput {
        TelemetryInput {
            user_id: self.user_id.clone(),
            timestamp: self.timestamp.clone(),
            cognitive_score: self.cognitive_score.unwrap_or(defaults.cognitive_score),
            reaction_time_ms: self.reaction_time_ms.unwrap_or(defaults.reaction_time_ms),
            error_count: self.error_count.unwrap_or(defaults.error_count),
            sleep_efficiency: self.sleep_efficiency.unwrap_or(defaults.sleep_efficiency),
            sleep_interruptions: self
                .sleep_interruptions
                .unwrap_or(defaults.sleep_interruptions),
            hrv_ms: self.hrv_ms.unwrap_or(defaults.hrv_ms),
            resting_hr_bpm: self.resting_hr_bpm.unwrap_or(defaults.resting_hr_bpm),
            steps: self.steps.unwrap_or(defaults.steps),
            active_minutes: self.active_minutes.unwrap_or(defaults.active_minutes),
            engagement: self.engagement.unwrap_or(defaults.engagement),
        }
    }
}

impl Default for TelemetryInput {
    fn default() -> Self {
        RawTelemetry::default().resolve(&TelemetryDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_payload_resolves_to_defaults() {
        let raw = RawTelemetry::from_json("{}").unwrap();
        let input = raw.resolve(&TelemetryDefaults::default());

        assert_eq!(input, TelemetryInput::default());
        assert_eq!(input.cognitive_score, 80.0);
        assert_eq!(input.reaction_time_ms, 500.0);
        assert_eq!(input.error_count, 2.0);
        assert_eq!(input.sleep_efficiency, 0.8);
        assert_eq!(input.sleep_interruptions, 2.0);
        assert_eq!(input.hrv_ms, 45.0);
        assert_eq!(input.resting_hr_bpm, 72.0);
        assert_eq!(input.steps, 5000.0);
        assert_eq!(input.active_minutes, 20.0);
        assert_eq!(input.engagement, 75.0);
        assert!(input.user_id.is_none());
    }

    #[test]
    fn test_client_short_names_accepted() {
        let raw = RawTelemetry::from_json(
            r#"{
                "user_id": "user123",
                "timestamp": "2026-01-28T10:30:00Z",
                "reaction_time": 650,
                "errors": 3,
                "hrv": 38,
                "resting_hr": 78,
                "behavior_events": ["confusion"]
            }"#,
        )
        .unwrap();
        let input = raw.resolve(&TelemetryDefaults::default());

        assert_eq!(input.user_id.as_deref(), Some("user123"));
        assert_eq!(input.timestamp.as_deref(), Some("2026-01-28T10:30:00Z"));
        assert_eq!(input.reaction_time_ms, 650.0);
        assert_eq!(input.error_count, 3.0);
        assert_eq!(input.hrv_ms, 38.0);
        assert_eq!(input.resting_hr_bpm, 78.0);
    }

    #[test]
    fn test_decimal_counts_accepted() {
        let raw = RawTelemetry::from_json(r#"{"steps": 4500.0, "active_minutes": 15.5}"#).unwrap();
        let input = raw.resolve(&TelemetryDefaults::default());
        assert_eq!(input.steps, 4500.0);
        assert_eq!(input.active_minutes, 15.5);

        let raw = RawTelemetry::from_json(r#"{"errors": 2.0, "sleep_interruptions": 1.5}"#).unwrap();
        assert_eq!(raw.error_count, Some(2.0));
        assert_eq!(raw.sleep_interruptions, Some(1.5));
    }

    #[test]
    fn test_short_and_long_name_together_rejected() {
        let result = RawTelemetry::from_json(r#"{"hrv": 40, "hrv_ms": 40}"#);
        match result {
            Err(ComputeError::JsonError(e)) => assert!(e.to_string().contains("duplicate field")),
            other => panic!("expected duplicate field error, got {other:?}"),
        }

        let result = RawTelemetry::from_json(r#"{"errors": 1, "error_count": 2}"#);
        assert!(matches!(result, Err(ComputeError::JsonError(_))));
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let raw = RawTelemetry::from_json(r#"{"steps": -100, "sleep_efficiency": 1.7}"#).unwrap();
        let input = raw.resolve(&TelemetryDefaults::default());
        assert_eq!(input.steps, -100.0);
        assert_eq!(input.sleep_efficiency, 1.7);
    }

    #[test]
    fn test_partial_defaults_file() {
        let defaults = TelemetryDefaults::from_json(r#"{"steps": 8000}"#).unwrap();
        assert_eq!(defaults.steps, 8000.0);
        assert_eq!(defaults.cognitive_score, 80.0);

        let input = RawTelemetry::default().resolve(&defaults);
        assert_eq!(input.steps, 8000.0);
    }

    #[test]
    fn test_invalid_defaults_file() {
        let result = TelemetryDefaults::from_json("not json");
        assert!(matches!(result, Err(ComputeError::InvalidConfig(_))));
    }

    #[test]
    fn test_defaults_round_trip_through_json() {
        let json = TelemetryDefaults::default().to_json().unwrap();
        assert_eq!(
            TelemetryDefaults::from_json(&json).unwrap(),
            TelemetryDefaults::default()
        );
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let input = "{\"user_id\": \"a\"}\n\n{\"user_id\": \"b\", \"steps\": 100}\n";
        let records = RawTelemetry::parse_ndjson(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].steps, Some(100.0));
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let err = RawTelemetry::parse_ndjson("{}\n{oops").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_locale_wire_names() {
        let config: OrchestratorConfig = serde_json::from_str(r#"{"locale": "en"}"#).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.defaults, TelemetryDefaults::default());

        let config: OrchestratorConfig = serde_json::from_str(r#"{"locale": "pt-br"}"#).unwrap();
        assert_eq!(config.locale, Locale::PtBr);
        assert_eq!(Locale::default().as_str(), "pt-BR");
    }
}
