//! Analysis thresholds.
//!
//! Defaults follow the DCMA 14-Point assessment and GAO Schedule
//! Assessment Guide targets. All percentages are expressed 0-100.

use serde::{Deserialize, Serialize};

/// Immutable threshold set consumed by the metric evaluators and scorers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum acceptable share of relationships with positive lag (%)
    pub positive_lag_max_pct: f64,
    /// Maximum acceptable share of hard-constrained activities (%)
    pub hard_constraint_max_pct: f64,
    /// Maximum acceptable share of flexibly constrained activities (%)
    pub flexible_constraint_max_pct: f64,
    /// Share of schedule-driven (ALAP/ASAP) activities that triggers an
    /// informational issue (%)
    pub schedule_driven_max_pct: f64,

    /// Work-day duration above which an activity is "long"
    pub long_duration_days: f64,
    /// Work-day duration above which an activity is "very long"
    /// (roughly five calendar months)
    pub very_long_duration_days: f64,
    /// Informational typical band for average activity duration (work days)
    pub typical_duration_band: (f64, f64),

    /// Healthy band for the critical-path share of activities (%)
    pub critical_pct_good: (f64, f64),
    /// Critical-path share above which the float metric fails (%)
    pub critical_pct_fail: f64,
    /// Upper bound of the near-critical float band (days); lower bound is
    /// exclusive zero
    pub near_critical_float_days: f64,
    /// Target band for float ratio = mean float / mean remaining duration
    pub float_ratio_band: (f64, f64),
    /// Outside this bound the float-ratio status escalates from Warning
    /// to Fail
    pub float_ratio_extreme: (f64, f64),
    /// Fraction of the project span above which total float is "excessive"
    pub excessive_float_span_fraction: f64,

    /// Maximum acceptable share of SS/FF relationships (%)
    pub ss_ff_max_pct: f64,
    /// Maximum acceptable share of incomplete activities without
    /// resource assignments (%)
    pub missing_resource_max_pct: f64,

    /// CPLI / BEI pass target
    pub index_target: f64,
    /// CPLI / BEI warning floor; below this the index fails
    pub index_warning_floor: f64,

    /// Maximum activity ids carried on an issue for display. The full
    /// count is always retained on the issue.
    pub max_listed_activities: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            positive_lag_max_pct: 5.0,
            hard_constraint_max_pct: 10.0,
            flexible_constraint_max_pct: 15.0,
            schedule_driven_max_pct: 50.0,
            long_duration_days: 20.0,
            very_long_duration_days: 150.0,
            typical_duration_band: (10.0, 20.0),
            critical_pct_good: (5.0, 15.0),
            critical_pct_fail: 20.0,
            near_critical_float_days: 10.0,
            float_ratio_band: (0.5, 1.5),
            float_ratio_extreme: (0.3, 2.0),
            excessive_float_span_fraction: 0.5,
            ss_ff_max_pct: 10.0,
            missing_resource_max_pct: 5.0,
            index_target: 0.95,
            index_warning_floor: 0.90,
            max_listed_activities: 20,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
