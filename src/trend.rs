//! Longitudinal trends
//!
//! Trends need a user's assessment history, which this crate does not store.
//! Until a history source exists every result carries the fixed values below,
//! flagged as placeholders.

use log::debug;

use crate::types::{TrendDirection, TrendSummary};

/// Cognitive decline rate reported in place of a computed trend (% per month)
pub const PLACEHOLDER_COGNITIVE_DECLINE_RATE: f64 = 0.5;
pub const PLACEHOLDER_SLEEP_TREND: TrendDirection = TrendDirection::Improving;
pub const PLACEHOLDER_ACTIVITY_TREND: TrendDirection = TrendDirection::Stable;

/// Confidence attached to integrated risk derived from proxy biomarkers
pub const PROXY_CONFIDENCE: f64 = 0.75;

// TODO: compute from the user's stored risk history once a persistence
// collaborator can supply it.
pub fn trend_for(user_id: Option<&str>) -> TrendSummary {
    debug!("trend placeholder user={}", user_id.unwrap_or("anonymous"));
    TrendSummary {
        cognitive_decline_rate: PLACEHOLDER_COGNITIVE_DECLINE_RATE,
        sleep_trend: PLACEHOLDER_SLEEP_TREND,
        activity_trend: PLACEHOLDER_ACTIVITY_TREND,
        placeholder: true,
    }
}
