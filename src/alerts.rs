//! Alert generation
//!
//! Three independent checks, evaluated in a fixed order, each producing at
//! most one alert.

use crate::catalog::alert_message;
use crate::config::Locale;
use crate::types::{Alert, AlertSeverity, AlertType, RiskLevel, TelemetryInput};

/// Cognitive scores below this raise a decline alert
const COGNITIVE_ALERT_THRESHOLD: f64 = 60.0;
/// Sleep efficiency below this raises a sleep alert
const SLEEP_ALERT_THRESHOLD: f64 = 0.7;

/// Stateless alert engine
pub struct AlertEngine;

impl AlertEngine {
    pub fn generate(risk_level: RiskLevel, input: &TelemetryInput, locale: Locale) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if risk_level == RiskLevel::High {
            alerts.push(build(AlertSeverity::High, AlertType::RiskElevation, true, locale));
        }

        if input.cognitive_score < COGNITIVE_ALERT_THRESHOLD {
            alerts.push(build(
                AlertSeverity::Medium,
                AlertType::CognitiveDecline,
                true,
                locale,
            ));
        }

        if input.sleep_efficiency < SLEEP_ALERT_THRESHOLD {
            alerts.push(build(
                AlertSeverity::Medium,
                AlertType::SleepQuality,
                false,
                locale,
            ));
        }

        alerts
    }
}

fn build(
    severity: AlertSeverity,
    alert_type: AlertType,
    action_required: bool,
    locale: Locale,
) -> Alert {
    Alert {
        severity,
        alert_type,
        message: alert_message(alert_type, locale).to_string(),
        action_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alert_types(alerts: &[Alert]) -> Vec<AlertType> {
        alerts.iter().map(|a| a.alert_type).collect()
    }

    #[test]
    fn test_no_alerts_for_defaults() {
        let alerts = AlertEngine::generate(RiskLevel::Low, &TelemetryInput::default(), Locale::PtBr);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_high_risk_alert() {
        let alerts =
            AlertEngine::generate(RiskLevel::High, &TelemetryInput::default(), Locale::PtBr);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].alert_type, AlertType::RiskElevation);
        assert!(alerts[0].action_required);
    }

    #[test]
    fn test_medium_risk_does_not_alert() {
        let alerts =
            AlertEngine::generate(RiskLevel::Medium, &TelemetryInput::default(), Locale::PtBr);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_cognitive_decline_alert() {
        let input = TelemetryInput {
            cognitive_score: 55.0,
            ..TelemetryInput::default()
        };
        let alerts = AlertEngine::generate(RiskLevel::Low, &input, Locale::PtBr);

        assert_eq!(alert_types(&alerts), vec![AlertType::CognitiveDecline]);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert!(alerts[0].action_required);
        assert_eq!(
            alerts[0].message,
            "Declínio cognitivo detectado nos últimos testes."
        );
    }

    #[test]
    fn test_sleep_alert_needs_no_action() {
        let input = TelemetryInput {
            sleep_efficiency: 0.65,
            ..TelemetryInput::default()
        };
        let alerts = AlertEngine::generate(RiskLevel::Low, &input, Locale::En);

        assert_eq!(alert_types(&alerts), vec![AlertType::SleepQuality]);
        assert!(!alerts[0].action_required);
        assert_eq!(alerts[0].message, "Sleep quality below the recommended level.");
    }

    #[test]
    fn test_thresholds_are_strict() {
        let input = TelemetryInput {
            cognitive_score: 60.0,
            sleep_efficiency: 0.7,
            ..TelemetryInput::default()
        };
        assert!(AlertEngine::generate(RiskLevel::Low, &input, Locale::PtBr).is_empty());
    }

    #[test]
    fn test_all_alerts_in_order() {
        let input = TelemetryInput {
            cognitive_score: 30.0,
            sleep_efficiency: 0.4,
            ..TelemetryInput::default()
        };
        let alerts = AlertEngine::generate(RiskLevel::High, &input, Locale::PtBr);
        assert_eq!(
            alert_types(&alerts),
            vec![
                AlertType::RiskElevation,
                AlertType::CognitiveDecline,
                AlertType::SleepQuality,
            ]
        );
    }
}
