//! Recommendation selection
//!
//! Maps contributing factors and sub-score thresholds onto the fixed
//! recommendation catalog. Conditions are evaluated in a fixed order and each
//! fires at most once, so the output is stable and unique per category.

use crate::catalog::recommendation_text;
use crate::config::Locale;
use crate::types::{
    ContributingFactor, Priority, Recommendation, RecommendationCategory, SignatureReport,
};

/// Sub-score thresholds checked on the rounded signature
const SLEEP_ACTIVATION_THRESHOLD: f64 = 0.5;
const NUTRITION_INFLAMMATION_THRESHOLD: f64 = 0.5;
const COGNITIVE_HEALTH_THRESHOLD: f64 = 0.6;
const EXERCISE_HEALTH_THRESHOLD: f64 = 0.6;
const STRESS_INFLAMMATION_THRESHOLD: f64 = 0.4;

/// Stateless recommendation engine
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Select recommendations in catalog order: sleep, nutrition, cognitive,
    /// exercise, stress
    pub fn generate(report: &SignatureReport, locale: Locale) -> Vec<Recommendation> {
        Self::triggered_categories(report)
            .into_iter()
            .map(|category| build(category, locale))
            .collect()
    }

    /// Categories whose trigger condition holds, in evaluation order
    pub fn triggered_categories(report: &SignatureReport) -> Vec<RecommendationCategory> {
        let sig = &report.signature;
        let assessment = &report.assessment;
        let mut categories = Vec::new();

        if assessment.has_factor(ContributingFactor::SleepQuality)
            || sig.microglial_activation > SLEEP_ACTIVATION_THRESHOLD
        {
            categories.push(RecommendationCategory::Sleep);
        }

        if assessment.has_factor(ContributingFactor::SystemicInflammation)
            || sig.inflammatory_state > NUTRITION_INFLAMMATION_THRESHOLD
        {
            categories.push(RecommendationCategory::Nutrition);
        }

        if assessment.has_factor(ContributingFactor::CognitiveDecline)
            || sig.neuronal_health < COGNITIVE_HEALTH_THRESHOLD
        {
            categories.push(RecommendationCategory::Cognitive);
        }

        if assessment.has_factor(ContributingFactor::SedentaryLifestyle)
            || sig.metabolic_health < EXERCISE_HEALTH_THRESHOLD
        {
            categories.push(RecommendationCategory::Exercise);
        }

        // Independent of the factor list
        if sig.inflammatory_state > STRESS_INFLAMMATION_THRESHOLD {
            categories.push(RecommendationCategory::Stress);
        }

        categories
    }
}

fn priority_for(category: RecommendationCategory) -> Priority {
    match category {
        RecommendationCategory::Sleep
        | RecommendationCategory::Nutrition
        | RecommendationCategory::Cognitive => Priority::High,
        RecommendationCategory::Exercise | RecommendationCategory::Stress => Priority::Medium,
    }
}

fn build(category: RecommendationCategory, locale: Locale) -> Recommendation {
    let text = recommendation_text(category, locale);

    Recommendation {
        category,
        priority: priority_for(category),
        title: text.title.to_string(),
        actions: text.actions.iter().map(|a| a.to_string()).collect(),
        impact: text.impact.to_string(),
    }
}
