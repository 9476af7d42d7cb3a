//! Pipeline orchestration
//!
//! This module provides the public API. It sequences the scoring stages for a
//! single telemetry payload and assembles the orchestration result.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use crate::alerts::AlertEngine;
use crate::config::{Locale, OrchestratorConfig, RawTelemetry};
use crate::encoder::ReportEncoder;
use crate::error::ComputeError;
use crate::recommendations::RecommendationEngine;
use crate::signature::SignatureCalculator;
use crate::trend::{trend_for, PROXY_CONFIDENCE};
use crate::types::{
    AnalysisReport, CognitiveIndices, IntegratedRisk, OrchestrationResult, TelemetryInput,
};

/// Analysis type reported while signatures come from proxy biomarkers
pub const ANALYSIS_TYPE: &str = "proxy_biomarkers";

/// Run the full pipeline for resolved telemetry, timestamped now.
pub fn orchestrate(input: &TelemetryInput) -> OrchestrationResult {
    orchestrate_at(input, Utc::now())
}

/// Run the full pipeline with an explicit clock.
pub fn orchestrate_at(input: &TelemetryInput, now: DateTime<Utc>) -> OrchestrationResult {
    run_stages(input, Locale::default(), now)
}

/// Convert one raw telemetry JSON object into an encoded analysis report
/// (stateless, one-shot, default configuration).
///
/// # Example
/// ```ignore
/// let report_json = telemetry_to_report(r#"{"user_id": "u1", "steps": 4500}"#.to_string())?;
/// ```
pub fn telemetry_to_report(raw_json: String) -> Result<String, ComputeError> {
    OrchestrationService::new().process(&raw_json)
}

/// Pipeline stages:
/// 1. SignatureCalculator - Map telemetry to sub-scores, composite and risk band
/// 2. RecommendationEngine - Select catalog recommendations
/// 3. AlertEngine - Raise threshold alerts
/// 4. Scheduling, trends and integrated risk assembly
fn run_stages(input: &TelemetryInput, locale: Locale, now: DateTime<Utc>) -> OrchestrationResult {
    warn_out_of_range(input);

    // Stage 1: Signature and risk
    let report = SignatureCalculator::calculate(input);
    let risk_level = report.assessment.risk_level;
    let ad_risk_score = report.assessment.ad_risk_score;

    // Stage 2: Recommendations
    let recommendations = RecommendationEngine::generate(&report, locale);

    // Stage 3: Alerts
    let alerts = AlertEngine::generate(risk_level, input, locale);

    // Stage 4: Assembly
    let trends = trend_for(input.user_id.as_deref());
    let next_assessment_due = now + Duration::days(risk_level.reassessment_interval_days());

    debug!(
        "orchestrated recommendations={} alerts={} next_due={}",
        recommendations.len(),
        alerts.len(),
        next_assessment_due.to_rfc3339()
    );
    info!(
        "analysis user={} risk={} score={:.3}",
        input.user_id.as_deref().unwrap_or("anonymous"),
        risk_level.as_str(),
        ad_risk_score
    );

    OrchestrationResult {
        user_id: input.user_id.clone(),
        timestamp: now,
        observed_at: input.timestamp.clone(),
        analysis_type: ANALYSIS_TYPE.to_string(),
        cognitive_indices: CognitiveIndices {
            stability_index: input.cognitive_score,
            engagement_index: input.engagement,
            decline_rate: trends.cognitive_decline_rate,
        },
        integrated_risk: IntegratedRisk {
            overall_score: ad_risk_score,
            risk_level,
            cognitive_component: (100.0 - input.cognitive_score) / 100.0,
            cellular_component: ad_risk_score,
            confidence: PROXY_CONFIDENCE,
        },
        cellular_signature: report,
        recommendations,
        next_assessment_due,
        alerts,
        trends,
    }
}

/// Out-of-range values are accepted and scored as-is; they are only logged.
fn warn_out_of_range(input: &TelemetryInput) {
    if !(0.0..=100.0).contains(&input.cognitive_score) {
        warn!("cognitive_score {} outside 0-100", input.cognitive_score);
    }
    if !(0.0..=1.0).contains(&input.sleep_efficiency) {
        warn!("sleep_efficiency {} outside 0-1", input.sleep_efficiency);
    }
    if input.reaction_time_ms < 0.0 || input.hrv_ms < 0.0 || input.resting_hr_bpm < 0.0 {
        warn!(
            "negative physiological reading reaction_time_ms={} hrv_ms={} resting_hr_bpm={}",
            input.reaction_time_ms, input.hrv_ms, input.resting_hr_bpm
        );
    }
    if input.error_count < 0.0
        || input.sleep_interruptions < 0.0
        || input.steps < 0.0
        || input.active_minutes < 0.0
    {
        warn!(
            "negative count error_count={} sleep_interruptions={} steps={} active_minutes={}",
            input.error_count, input.sleep_interruptions, input.steps, input.active_minutes
        );
    }
}

/// Orchestration service holding only immutable configuration.
///
/// Safe to share between threads; calls do not interact.
#[derive(Debug, Clone, Default)]
pub struct OrchestrationService {
    config: OrchestratorConfig,
    encoder: ReportEncoder,
}

impl OrchestrationService {
    /// Create a service with documented defaults and pt-BR text
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OrchestratorConfig) -> Self {
        Self {
            config,
            encoder: ReportEncoder::new(),
        }
    }

    pub fn with_encoder(mut self, encoder: ReportEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Resolve defaults and run the pipeline
    pub fn analyze(&self, raw: &RawTelemetry) -> OrchestrationResult {
        self.analyze_at(raw, Utc::now())
    }

    pub fn analyze_at(&self, raw: &RawTelemetry, now: DateTime<Utc>) -> OrchestrationResult {
        let input = raw.resolve(&self.config.defaults);
        run_stages(&input, self.config.locale, now)
    }

    /// Analyze and attach producer metadata
    pub fn report(&self, raw: &RawTelemetry) -> AnalysisReport {
        self.encoder.encode(self.analyze(raw))
    }

    /// Process one telemetry JSON object into pretty report JSON
    pub fn process(&self, raw_json: &str) -> Result<String, ComputeError> {
        let raw = RawTelemetry::from_json(raw_json)?;
        self.encoder.encode_to_json(self.analyze(&raw))
    }

    /// Process one telemetry JSON object into a single report line
    pub fn process_line(&self, raw_json: &str) -> Result<String, ComputeError> {
        let raw = RawTelemetry::from_json(raw_json)?;
        self.encoder.encode_to_line(self.analyze(&raw))
    }

    /// Process a JSON array of telemetry objects
    pub fn process_batch(&self, raw_json: &str) -> Result<Vec<AnalysisReport>, ComputeError> {
        let records = RawTelemetry::parse_array(raw_json)?;
        Ok(records.iter().map(|raw| self.report(raw)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TelemetryDefaults;
    use crate::types::{AlertType, RecommendationCategory, RiskLevel};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 28, 12, 0, 0).unwrap()
    }

    fn sample_json() -> &'static str {
        r#"{
            "user_id": "user123",
            "timestamp": "2026-01-28T10:30:00Z",
            "cognitive_score": 75,
            "reaction_time": 650,
            "errors": 3,
            "sleep_efficiency": 0.78,
            "sleep_interruptions": 3,
            "hrv": 38,
            "resting_hr": 78,
            "steps": 4500,
            "active_minutes": 15
        }"#
    }

    #[test]
    fn test_defaults_scenario() {
        let result = orchestrate_at(&TelemetryInput::default(), fixed_now());

        assert_eq!(result.cellular_signature.assessment.ad_risk_score, 0.16);
        assert_eq!(result.integrated_risk.risk_level, RiskLevel::Low);
        assert!(result.cellular_signature.assessment.contributing_factors.is_empty());
        assert!(result.recommendations.is_empty());
        assert!(result.alerts.is_empty());
        assert_eq!(result.next_assessment_due, fixed_now() + Duration::days(30));
        assert_eq!(result.timestamp, fixed_now());
        assert_eq!(result.analysis_type, ANALYSIS_TYPE);
    }

    #[test]
    fn test_sample_scenario() {
        let raw = RawTelemetry::from_json(sample_json()).unwrap();
        let result = OrchestrationService::new().analyze_at(&raw, fixed_now());

        let report = &result.cellular_signature;
        assert_eq!(report.signature.microglial_activation, 0.232);
        assert_eq!(report.signature.inflammatory_state, 0.253);
        assert_eq!(report.signature.neuronal_health, 0.725);
        assert_eq!(report.signature.metabolic_health, 0.55);
        assert_eq!(report.assessment.ad_risk_score, 0.285);
        assert_eq!(report.assessment.risk_level, RiskLevel::Low);

        let categories: Vec<_> = result.recommendations.iter().map(|r| r.category).collect();
        assert_eq!(categories, vec![RecommendationCategory::Exercise]);
        assert!(result.alerts.is_empty());

        assert_eq!(result.user_id.as_deref(), Some("user123"));
        assert_eq!(result.observed_at.as_deref(), Some("2026-01-28T10:30:00Z"));
        assert_eq!(result.cognitive_indices.stability_index, 75.0);
        assert_eq!(result.cognitive_indices.engagement_index, 75.0);
        assert_eq!(result.cognitive_indices.decline_rate, 0.5);
        assert!((result.integrated_risk.cognitive_component - 0.25).abs() < 1e-9);
        assert_eq!(result.integrated_risk.cellular_component, 0.285);
        assert_eq!(result.integrated_risk.overall_score, 0.285);
        assert_eq!(result.integrated_risk.confidence, 0.75);
    }

    #[test]
    fn test_cognitive_alert_only() {
        let input = TelemetryInput {
            cognitive_score: 55.0,
            ..TelemetryInput::default()
        };
        let result = orchestrate_at(&input, fixed_now());

        assert_eq!(result.integrated_risk.risk_level, RiskLevel::Low);
        assert_eq!(result.alerts.len(), 1);
        assert_eq!(result.alerts[0].alert_type, AlertType::CognitiveDecline);
    }

    #[test]
    fn test_medium_risk_schedule() {
        let input = TelemetryInput {
            sleep_efficiency: 0.6,
            sleep_interruptions: 4.0,
            hrv_ms: 30.0,
            resting_hr_bpm: 85.0,
            ..TelemetryInput::default()
        };
        let result = orchestrate_at(&input, fixed_now());

        assert_eq!(result.integrated_risk.risk_level, RiskLevel::Medium);
        assert_eq!(result.next_assessment_due, fixed_now() + Duration::days(14));

        let categories: Vec<_> = result.recommendations.iter().map(|r| r.category).collect();
        assert_eq!(categories, vec![RecommendationCategory::Stress]);

        let alerts: Vec<_> = result.alerts.iter().map(|a| a.alert_type).collect();
        assert_eq!(alerts, vec![AlertType::SleepQuality]);
    }

    #[test]
    fn test_high_risk_scenario() {
        let input = TelemetryInput {
            cognitive_score: 30.0,
            reaction_time_ms: 1200.0,
            error_count: 8.0,
            sleep_efficiency: 0.4,
            sleep_interruptions: 8.0,
            hrv_ms: 20.0,
            resting_hr_bpm: 100.0,
            steps: 1000.0,
            active_minutes: 5.0,
            ..TelemetryInput::default()
        };
        let result = orchestrate_at(&input, fixed_now());

        assert_eq!(result.integrated_risk.risk_level, RiskLevel::High);
        assert_eq!(result.next_assessment_due, fixed_now() + Duration::days(7));
        assert_eq!(result.recommendations.len(), 5);

        let alerts: Vec<_> = result.alerts.iter().map(|a| a.alert_type).collect();
        assert_eq!(
            alerts,
            vec![
                AlertType::RiskElevation,
                AlertType::CognitiveDecline,
                AlertType::SleepQuality,
            ]
        );
    }

    #[test]
    fn test_custom_defaults_and_locale() {
        let config = OrchestratorConfig {
            defaults: TelemetryDefaults {
                steps: 1000.0,
                active_minutes: 5.0,
                ..TelemetryDefaults::default()
            },
            locale: Locale::En,
        };
        let service = OrchestrationService::with_config(config);
        let result = service.analyze_at(&RawTelemetry::default(), fixed_now());

        assert_eq!(result.cellular_signature.signature.metabolic_health, 0.15);
        let exercise = result
            .recommendations
            .iter()
            .find(|r| r.category == RecommendationCategory::Exercise)
            .unwrap();
        assert_eq!(exercise.title, "Increase Physical Activity");
    }

    #[test]
    fn test_telemetry_to_report() {
        let json = telemetry_to_report(sample_json().to_string()).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(payload["producer"]["name"], crate::PRODUCER_NAME);
        assert_eq!(payload["user_id"], "user123");
        assert_eq!(payload["cellular_signature"]["ad_risk_score"], 0.285);
        assert_eq!(payload["cellular_signature"]["risk_level"], "low");
        assert_eq!(
            payload["cellular_signature"]["cellular_signature"]["metabolic_health"],
            0.55
        );
        assert_eq!(payload["recommendations"][0]["category"], "exercise");
        assert_eq!(payload["recommendations"][0]["priority"], "medium");
        assert_eq!(payload["integrated_risk"]["confidence"], 0.75);
        assert_eq!(payload["trends"]["placeholder"], true);
    }

    #[test]
    fn test_invalid_json() {
        let result = telemetry_to_report("not valid json".to_string());
        assert!(matches!(result, Err(ComputeError::JsonError(_))));
    }

    #[test]
    fn test_process_batch() {
        let service = OrchestrationService::new();
        let reports = service
            .process_batch(r#"[{"user_id": "a"}, {"user_id": "b", "cognitive_score": 50}]"#)
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].result.user_id.as_deref(), Some("a"));
        assert!(reports[0].result.alerts.is_empty());
        assert_eq!(reports[1].result.alerts.len(), 1);
        assert_eq!(reports[0].producer.instance_id, reports[1].producer.instance_id);
    }

    #[test]
    fn test_process_line() {
        let service =
            OrchestrationService::new().with_encoder(ReportEncoder::with_instance_id("i".into()));
        let line = service.process_line(r#"{"user_id": "a"}"#).unwrap();
        assert!(!line.contains('\n'));

        let report: AnalysisReport = serde_json::from_str(&line).unwrap();
        assert_eq!(report.producer.instance_id, "i");
    }

    #[test]
    fn test_service_shared_across_threads() {
        let service = std::sync::Arc::new(OrchestrationService::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || {
                    let raw = RawTelemetry {
                        cognitive_score: Some(50.0 + i as f64 * 10.0),
                        ..RawTelemetry::default()
                    };
                    service.analyze_at(&raw, fixed_now())
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            assert_eq!(result.cognitive_indices.stability_index, 50.0 + i as f64 * 10.0);
        }
    }

    #[test]
    fn test_out_of_range_input_still_scored() {
        let input = TelemetryInput {
            cognitive_score: 100.0,
            error_count: -10.0,
            steps: 20000.0,
            active_minutes: 60.0,
            sleep_efficiency: 0.95,
            sleep_interruptions: 0.0,
            hrv_ms: 60.0,
            resting_hr_bpm: 60.0,
            ..TelemetryInput::default()
        };
        let result = orchestrate_at(&input, fixed_now());

        // neuronal 1.2 gives a negative composite
        assert_eq!(result.cellular_signature.signature.neuronal_health, 1.2);
        assert_eq!(result.cellular_signature.assessment.ad_risk_score, -0.07);
        assert_eq!(result.integrated_risk.risk_level, RiskLevel::Low);
    }
}
