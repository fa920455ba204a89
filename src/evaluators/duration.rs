//! Duration realism evaluator (DCMA point 8 family)
//!
//! Computed over non-milestone activities only; milestones are excluded
//! from the statistics regardless of their recorded duration value, but
//! a milestone carrying a nonzero duration is itself flagged.

use crate::config::AnalysisConfig;
use crate::evaluators::base::{DurationMetrics, Evaluation, Evaluator, MetricRecord};
use crate::evaluators::stats;
use crate::models::{Issue, MetricStatus, Severity};
use crate::parsers::ActivityTable;

pub struct DurationEvaluator {
    config: AnalysisConfig,
}

impl DurationEvaluator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl Evaluator for DurationEvaluator {
    fn name(&self) -> &'static str {
        "durations"
    }

    fn description(&self) -> &'static str {
        "Planned-duration realism over non-milestone activities"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        let mut durations = Vec::new();
        let mut long_ids = Vec::new();
        let mut very_long_ids = Vec::new();
        let mut nonzero_milestone_ids = Vec::new();

        for activity in table.activities() {
            let Some(duration) = activity.planned_duration else {
                continue;
            };
            if activity.is_milestone() {
                if duration > 0.0 {
                    nonzero_milestone_ids.push(activity.id.clone());
                }
                continue;
            }
            durations.push(duration);
            if duration > self.config.very_long_duration_days {
                very_long_ids.push(activity.id.clone());
            } else if duration > self.config.long_duration_days {
                long_ids.push(activity.id.clone());
            }
        }

        if durations.is_empty() && nonzero_milestone_ids.is_empty() {
            return Ok(Evaluation::new(MetricRecord::Durations(DurationMetrics {
                typical_band: self.config.typical_duration_band,
                ..DurationMetrics::default()
            })));
        }

        let status = if very_long_ids.is_empty() {
            MetricStatus::Good
        } else {
            MetricStatus::Warning
        };

        let mut issues = Vec::new();
        if !very_long_ids.is_empty() {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    self.name(),
                    "Very long activity durations",
                    format!(
                        "{} activities are planned longer than {:.0} work days \
                         (roughly five months). Durations this long hide progress \
                         and should be decomposed.",
                        very_long_ids.len(),
                        self.config.very_long_duration_days
                    ),
                    very_long_ids.clone(),
                    very_long_ids.len() as f64,
                ),
            );
        }
        if !nonzero_milestone_ids.is_empty() {
            issues.push(
                Issue::new(
                    Severity::Low,
                    self.name(),
                    "Milestones with nonzero duration",
                    format!(
                        "{} milestones carry a nonzero planned duration; milestones \
                         are expected to be zero-duration events.",
                        nonzero_milestone_ids.len()
                    ),
                    nonzero_milestone_ids.clone(),
                    nonzero_milestone_ids.len() as f64,
                ),
            );
        }

        Ok(Evaluation::with_issues(
            MetricRecord::Durations(DurationMetrics {
                analyzed: durations.len(),
                long_count: long_ids.len() + very_long_ids.len(),
                very_long_count: very_long_ids.len(),
                mean: stats::mean(&durations),
                median: stats::median(&durations),
                min: durations.iter().copied().min_by(f64::total_cmp),
                max: durations.iter().copied().max_by(f64::total_cmp),
                typical_band: self.config.typical_duration_band,
                milestones_with_duration: nonzero_milestone_ids.len(),
                status,
            }),
            issues,
        ))
    }
}
