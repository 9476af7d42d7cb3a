//! Cellular signature calculation
//!
//! Combines the four mapped sub-scores into a composite risk score, classifies
//! it into a risk band and flags the sub-scores that contribute to it.

use log::debug;

use crate::mapper::MetricMapper;
use crate::types::{
    round3, CellularSignature, ContributingFactor, RiskAssessment, RiskLevel, SignatureReport,
    TelemetryInput,
};

const MICROGLIAL_WEIGHT: f64 = 0.25;
const INFLAMMATORY_WEIGHT: f64 = 0.25;
const NEURONAL_WEIGHT: f64 = 0.35;
const METABOLIC_WEIGHT: f64 = 0.15;

/// Composite score at or above which risk is medium
const MEDIUM_RISK_THRESHOLD: f64 = 0.3;
/// Composite score at or above which risk is high
const HIGH_RISK_THRESHOLD: f64 = 0.6;

/// Activation/inflammation above this flags a contributing factor
const ELEVATED_THRESHOLD: f64 = 0.6;
/// Neuronal/metabolic health below this flags a contributing factor
const DEPLETED_THRESHOLD: f64 = 0.4;

/// Stateless calculator for cellular signatures
pub struct SignatureCalculator;

impl SignatureCalculator {
    /// Map telemetry to a rounded signature and its risk assessment.
    ///
    /// Classification and factor selection use the unrounded sub-scores.
    pub fn calculate(input: &TelemetryInput) -> SignatureReport {
        let signature = Self::raw_signature(input);
        let score = composite_score(&signature);
        let risk_level = classify_risk(score);
        let contributing_factors = identify_factors(&signature);

        debug!(
            "signature microglial={:.4} inflammatory={:.4} neuronal={:.4} metabolic={:.4} composite={:.4} level={}",
            signature.microglial_activation,
            signature.inflammatory_state,
            signature.neuronal_health,
            signature.metabolic_health,
            score,
            risk_level.as_str()
        );

        SignatureReport {
            signature: signature.rounded(),
            assessment: RiskAssessment {
                ad_risk_score: round3(score),
                risk_level,
                contributing_factors,
            },
        }
    }

    /// Unrounded sub-scores for the given telemetry
    pub fn raw_signature(input: &TelemetryInput) -> CellularSignature {
        CellularSignature {
            microglial_activation: MetricMapper::microglial_activation(
                input.sleep_efficiency,
                input.sleep_interruptions,
            ),
            inflammatory_state: MetricMapper::inflammatory_state(
                input.hrv_ms,
                input.resting_hr_bpm,
            ),
            neuronal_health: MetricMapper::neuronal_health(
                input.cognitive_score,
                input.reaction_time_ms,
                input.error_count,
            ),
            metabolic_health: MetricMapper::metabolic_health(input.steps, input.active_minutes),
        }
    }
}

/// Weighted composite risk. Neuronal and metabolic health are inverted so
/// that low health raises risk.
pub fn composite_score(signature: &CellularSignature) -> f64 {
    signature.microglial_activation * MICROGLIAL_WEIGHT
        + signature.inflammatory_state * INFLAMMATORY_WEIGHT
        + (1.0 - signature.neuronal_health) * NEURONAL_WEIGHT
        + (1.0 - signature.metabolic_health) * METABOLIC_WEIGHT
}

/// Bands are closed on the left: 0.3 is medium, 0.6 is high
pub fn classify_risk(score: f64) -> RiskLevel {
    if score < MEDIUM_RISK_THRESHOLD {
        RiskLevel::Low
    } else if score < HIGH_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Independent threshold checks in fixed order
pub fn identify_factors(signature: &CellularSignature) -> Vec<ContributingFactor> {
    let mut factors = Vec::new();

    if signature.microglial_activation > ELEVATED_THRESHOLD {
        factors.push(ContributingFactor::SleepQuality);
    }
    if signature.inflammatory_state > ELEVATED_THRESHOLD {
        factors.push(ContributingFactor::SystemicInflammation);
    }
    if signature.neuronal_health < DEPLETED_THRESHOLD {
        factors.push(ContributingFactor::CognitiveDecline);
    }
    if signature.metabolic_health < DEPLETED_THRESHOLD {
        factors.push(ContributingFactor::SedentaryLifestyle);
    }

    factors
}
