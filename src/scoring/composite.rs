//! Composite health score
//!
//! Folds the metric outcomes into a single 0-100 score. Starts at 100
//! and applies capped deductions per deficiency family, plus a CPLI
//! penalty or bonus; every applied adjustment is retained for audit.
//! Rating tiers are contiguous and exhaustive over [0, 100].

use crate::config::AnalysisConfig;
use crate::evaluators::ScheduleMetrics;
use crate::models::HealthRating;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One applied score adjustment, for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub reason: String,
    /// Negative for deductions, positive for the CPLI bonus
    pub delta: f64,
}

/// The schedule-wide score with rating and audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: f64,
    pub rating: HealthRating,
    pub adjustments: Vec<ScoreAdjustment>,
}

pub struct CompositeScorer {
    config: AnalysisConfig,
}

impl CompositeScorer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, metrics: &ScheduleMetrics) -> HealthScore {
        let mut adjustments = Vec::new();
        let mut apply = |reason: String, delta: f64| -> f64 {
            if delta != 0.0 {
                adjustments.push(ScoreAdjustment {
                    reason,
                    delta,
                });
            }
            delta
        };

        let mut score = 100.0;

        let negative = metrics.negative_lags.count;
        if negative > 0 {
            score += apply(
                format!("{negative} negative lags"),
                -(negative as f64 * 10.0).min(30.0),
            );
        }

        let lag_excess = metrics.positive_lags.percentage - self.config.positive_lag_max_pct;
        if metrics.positive_lags.count > 0 && lag_excess > 0.0 {
            score += apply(
                format!(
                    "positive-lag share {:.1}% over the {:.0}% target",
                    metrics.positive_lags.percentage, self.config.positive_lag_max_pct
                ),
                -lag_excess.min(10.0),
            );
        }

        let hard_excess = metrics.constraints.hard_pct - self.config.hard_constraint_max_pct;
        if metrics.constraints.hard_count > 0 && hard_excess > 0.0 {
            score += apply(
                format!(
                    "hard-constraint share {:.1}% over the {:.0}% target",
                    metrics.constraints.hard_pct, self.config.hard_constraint_max_pct
                ),
                -(hard_excess * 2.0).min(20.0),
            );
        }

        let open_ends = metrics.missing_logic.missing_any;
        if open_ends > 0 {
            score += apply(
                format!("{open_ends} activities with missing logic"),
                -(open_ends as f64 * 5.0).min(25.0),
            );
        }

        let very_long = metrics.durations.very_long_count;
        if very_long > 0 {
            score += apply(
                format!("{very_long} very long activities"),
                -(very_long as f64).min(10.0),
            );
        }

        if let Some(cpli) = metrics.indices.cpli {
            if cpli < self.config.index_warning_floor {
                score += apply(format!("CPLI {cpli:.2} below floor"), -15.0);
            } else if cpli >= self.config.index_target {
                score += apply(format!("CPLI {cpli:.2} at target"), 5.0);
            }
        }

        let score = score.clamp(0.0, 100.0);
        let rating = rating(score);
        debug!(score, %rating, "composite health score");
        HealthScore {
            score,
            rating,
            adjustments,
        }
    }
}

/// Tier boundaries: Excellent >=90, Good >=75, Fair >=60, Poor >=40.
pub(crate) fn rating(score: f64) -> HealthRating {
    if score >= 90.0 {
        HealthRating::Excellent
    } else if score >= 75.0 {
        HealthRating::Good
    } else if score >= 60.0 {
        HealthRating::Fair
    } else if score >= 40.0 {
        HealthRating::Poor
    } else {
        HealthRating::Critical
    }
}
