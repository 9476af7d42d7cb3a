//! Core types for the signature pipeline
//!
//! This module defines the records that flow through each stage of the
//! pipeline: resolved telemetry, the cellular signature, the risk assessment,
//! recommendations, alerts and the assembled orchestration result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk band derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Days until the next assessment should be taken
    pub fn reassessment_interval_days(&self) -> i64 {
        match self {
            RiskLevel::High => 7,
            RiskLevel::Medium => 14,
            RiskLevel::Low => 30,
        }
    }
}

/// Named condition flagged when a sub-score crosses its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributingFactor {
    SleepQuality,
    SystemicInflammation,
    CognitiveDecline,
    SedentaryLifestyle,
}

impl ContributingFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributingFactor::SleepQuality => "sleep_quality",
            ContributingFactor::SystemicInflammation => "systemic_inflammation",
            ContributingFactor::CognitiveDecline => "cognitive_decline",
            ContributingFactor::SedentaryLifestyle => "sedentary_lifestyle",
        }
    }
}

/// Recommendation category; at most one recommendation per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Sleep,
    Nutrition,
    Cognitive,
    Exercise,
    Stress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    RiskElevation,
    CognitiveDecline,
    SleepQuality,
}

/// Direction of a longitudinal trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// Telemetry with every default already substituted
///
/// Values are not range-checked: out-of-range inputs propagate through the
/// arithmetic unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryInput {
    pub user_id: Option<String>,
    /// Observation time as supplied by the client (ISO-8601)
    pub timestamp: Option<String>,
    /// Cognitive test score (0-100)
    pub cognitive_score: f64,
    /// Mean reaction time (ms)
    pub reaction_time_ms: f64,
    /// Errors made during the cognitive test
    pub error_count: f64,
    /// Sleep efficiency (fraction, 0-1)
    pub sleep_efficiency: f64,
    /// Number of sleep interruptions
    pub sleep_interruptions: f64,
    /// Heart rate variability (ms)
    pub hrv_ms: f64,
    /// Resting heart rate (bpm)
    pub resting_hr_bpm: f64,
    pub steps: f64,
    pub active_minutes: f64,
    /// App engagement index (0-100)
    pub engagement: f64,
}

/// Four proxy biomarker sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellularSignature {
    pub microglial_activation: f64,
    pub inflammatory_state: f64,
    pub neuronal_health: f64,
    pub metabolic_health: f64,
}

impl CellularSignature {
    /// Copy of the signature with every sub-score rounded to 3 decimals
    pub fn rounded(&self) -> Self {
        Self {
            microglial_activation: round3(self.microglial_activation),
            inflammatory_state: round3(self.inflammatory_state),
            neuronal_health: round3(self.neuronal_health),
            metabolic_health: round3(self.metabolic_health),
        }
    }
}

/// Composite risk and its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Composite score rounded to 3 decimals
    pub ad_risk_score: f64,
    pub risk_level: RiskLevel,
    pub contributing_factors: Vec<ContributingFactor>,
}

impl RiskAssessment {
    pub fn has_factor(&self, factor: ContributingFactor) -> bool {
        self.contributing_factors.contains(&factor)
    }
}

/// Rounded signature together with its risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureReport {
    #[serde(rename = "cellular_signature")]
    pub signature: CellularSignature,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub title: String,
    pub actions: Vec<String>,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub action_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveIndices {
    pub stability_index: f64,
    pub engagement_index: f64,
    /// Percent per month, from the trend stub
    pub decline_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedRisk {
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub cognitive_component: f64,
    pub cellular_component: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub cognitive_decline_rate: f64,
    pub sleep_trend: TrendDirection,
    pub activity_trend: TrendDirection,
    /// True while trends are fixed values rather than computed from history
    pub placeholder: bool,
}

/// Full analysis for one telemetry payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub user_id: Option<String>,
    /// When the analysis was computed
    pub timestamp: DateTime<Utc>,
    pub observed_at: Option<String>,
    pub analysis_type: String,
    pub cognitive_indices: CognitiveIndices,
    pub cellular_signature: SignatureReport,
    pub integrated_risk: IntegratedRisk,
    pub recommendations: Vec<Recommendation>,
    pub next_assessment_due: DateTime<Utc>,
    pub alerts: Vec<Alert>,
    pub trends: TrendSummary,
}

/// Producer metadata attached by the encoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Encoded report: producer metadata plus the orchestration result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub producer: Producer,
    #[serde(flatten)]
    pub result: OrchestrationResult,
}

/// Round to 3 decimal places from the exact binary value.
///
/// Scaling by 1000 first can lift a value just below a tie onto the tie, so
/// the decimal formatter does the rounding instead.
pub fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}
