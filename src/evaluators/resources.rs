//! Execution-readiness evaluator (DCMA point 10)
//!
//! Incomplete work without an assigned resource cannot be staffed or
//! costed. When the export has no Resource Names column the metric is
//! unavailable, never a clean pass.

use crate::config::AnalysisConfig;
use crate::evaluators::base::{Evaluation, Evaluator, MetricRecord, ResourceMetrics};
use crate::models::{Issue, MetricStatus, Severity};
use crate::parsers::ActivityTable;

pub struct ResourceEvaluator {
    config: AnalysisConfig,
}

impl ResourceEvaluator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl Evaluator for ResourceEvaluator {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn description(&self) -> &'static str {
        "Incomplete activities without a resource assignment"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        if !table.has_resource_data() {
            return Ok(Evaluation::new(MetricRecord::Resources(
                ResourceMetrics::default(),
            )));
        }

        let mut incomplete_count = 0usize;
        let mut unassigned_ids = Vec::new();
        for activity in table.activities() {
            if activity.is_complete() || activity.is_milestone() {
                continue;
            }
            incomplete_count += 1;
            let assigned = activity
                .resources
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty());
            if !assigned {
                unassigned_ids.push(activity.id.clone());
            }
        }
        if incomplete_count == 0 {
            return Ok(Evaluation::new(MetricRecord::Resources(
                ResourceMetrics::default(),
            )));
        }

        let unassigned_pct = unassigned_ids.len() as f64 / incomplete_count as f64 * 100.0;
        let status = if unassigned_pct <= self.config.missing_resource_max_pct {
            MetricStatus::Good
        } else {
            MetricStatus::Fail
        };

        let mut issues = Vec::new();
        if status == MetricStatus::Fail {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    self.name(),
                    "Incomplete activities without resources",
                    format!(
                        "{unassigned_pct:.1}% of incomplete activities have no \
                         resource assignment ({} of {incomplete_count}); the target \
                         is at most {:.0}%.",
                        unassigned_ids.len(),
                        self.config.missing_resource_max_pct
                    ),
                    unassigned_ids.clone(),
                    unassigned_pct,
                ),
            );
        }

        Ok(Evaluation::with_issues(
            MetricRecord::Resources(ResourceMetrics {
                incomplete_count,
                unassigned_count: unassigned_ids.len(),
                unassigned_pct,
                status,
            }),
            issues,
        ))
    }
}
