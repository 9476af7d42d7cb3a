//! Metric mapping
//!
//! Maps raw telemetry onto four proxy biomarker sub-scores:
//! - Sleep → microglial activation
//! - HRV and resting heart rate → inflammatory state
//! - Cognitive test results → neuronal health
//! - Activity → metabolic health
//!
//! Every mapping is total over its inputs; denominators are constants.

/// Sleep efficiency below this level starts to raise microglial activation
const SLEEP_EFFICIENCY_REFERENCE: f64 = 0.85;
/// Activation added per sleep interruption, capped at `MAX_INTERRUPTION_TERM`
const ACTIVATION_PER_INTERRUPTION: f64 = 0.05;
const MAX_INTERRUPTION_TERM: f64 = 0.3;

const HRV_REFERENCE_MS: f64 = 50.0;
const RESTING_HR_REFERENCE_BPM: f64 = 70.0;
const RESTING_HR_SPAN_BPM: f64 = 30.0;

const REACTION_CEILING_MS: f64 = 1000.0;
const REACTION_SPAN_MS: f64 = 500.0;
const PENALTY_PER_ERROR: f64 = 0.1;
const COGNITIVE_WEIGHT: f64 = 0.5;
const REACTION_WEIGHT: f64 = 0.3;
const ERROR_WEIGHT: f64 = 0.2;

/// Daily step target
const STEPS_TARGET: f64 = 7500.0;
/// Daily active minutes target
const ACTIVE_MINUTES_TARGET: f64 = 30.0;

/// Stateless mapper from raw telemetry to cellular sub-scores
pub struct MetricMapper;

impl MetricMapper {
    /// Poor or interrupted sleep raises microglial activation. Result in [0, 1]
    /// for any sleep efficiency and non-negative interruption count.
    pub fn microglial_activation(sleep_efficiency: f64, interruptions: f64) -> f64 {
        let base = ((SLEEP_EFFICIENCY_REFERENCE - sleep_efficiency) / SLEEP_EFFICIENCY_REFERENCE)
            .max(0.0);
        let interruption_term =
            (interruptions * ACTIVATION_PER_INTERRUPTION).min(MAX_INTERRUPTION_TERM);

        (base + interruption_term).min(1.0)
    }

    /// Low HRV and elevated resting heart rate raise the inflammatory state
    pub fn inflammatory_state(hrv_ms: f64, resting_hr_bpm: f64) -> f64 {
        let hrv_term = if hrv_ms < HRV_REFERENCE_MS {
            ((HRV_REFERENCE_MS - hrv_ms) / HRV_REFERENCE_MS).max(0.0)
        } else {
            0.0
        };

        let hr_term = if resting_hr_bpm > RESTING_HR_REFERENCE_BPM {
            ((resting_hr_bpm - RESTING_HR_REFERENCE_BPM) / RESTING_HR_SPAN_BPM).max(0.0)
        } else {
            0.0
        };

        ((hrv_term + hr_term) / 2.0).min(1.0)
    }

    /// Weighted blend of cognitive score, reaction speed and error rate.
    ///
    /// The weighted sum itself is not clamped: a cognitive score above 100 or a
    /// negative error count yields a value above 1.
    pub fn neuronal_health(cognitive_score: f64, reaction_time_ms: f64, errors: f64) -> f64 {
        let cognitive_term = cognitive_score / 100.0;
        let reaction_term =
            ((REACTION_CEILING_MS - reaction_time_ms) / REACTION_SPAN_MS).clamp(0.0, 1.0);
        let error_term = (1.0 - errors * PENALTY_PER_ERROR).max(0.0);

        COGNITIVE_WEIGHT * cognitive_term + REACTION_WEIGHT * reaction_term + ERROR_WEIGHT * error_term
    }

    /// Mean progress toward the daily step and active-minute targets
    pub fn metabolic_health(steps: f64, active_minutes: f64) -> f64 {
        let steps_term = (steps / STEPS_TARGET).min(1.0);
        let activity_term = (active_minutes / ACTIVE_MINUTES_TARGET).min(1.0);

        (steps_term + activity_term) / 2.0
    }
}
