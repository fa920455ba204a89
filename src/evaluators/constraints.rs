//! Constraint usage evaluator (DCMA point 1 family)
//!
//! Hard date constraints override network logic and suppress float;
//! flexible constraints are tolerated in moderation; ALAP/ASAP is only
//! reported when it dominates the schedule.

use crate::config::AnalysisConfig;
use crate::evaluators::base::{ConstraintMetrics, Evaluation, Evaluator, MetricRecord};
use crate::models::{ConstraintCategory, Issue, MetricStatus, Severity};
use crate::parsers::ActivityTable;

pub struct ConstraintEvaluator {
    config: AnalysisConfig,
}

impl ConstraintEvaluator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl Evaluator for ConstraintEvaluator {
    fn name(&self) -> &'static str {
        "constraints"
    }

    fn description(&self) -> &'static str {
        "Share of activities per date-constraint category"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        if table.is_empty() {
            return Ok(Evaluation::new(MetricRecord::Constraints(
                ConstraintMetrics::default(),
            )));
        }

        let total = table.len();
        let mut hard_ids = Vec::new();
        let mut flexible_ids = Vec::new();
        let mut schedule_driven_ids = Vec::new();
        let mut other_count = 0usize;
        for activity in table.activities() {
            match activity.constraint_category {
                ConstraintCategory::Hard => hard_ids.push(activity.id.clone()),
                ConstraintCategory::Flexible => flexible_ids.push(activity.id.clone()),
                ConstraintCategory::ScheduleDriven => {
                    schedule_driven_ids.push(activity.id.clone())
                }
                ConstraintCategory::Other => other_count += 1,
                ConstraintCategory::None => {}
            }
        }

        let pct = |n: usize| n as f64 / total as f64 * 100.0;
        let hard_pct = pct(hard_ids.len());
        let flexible_pct = pct(flexible_ids.len());
        let schedule_driven_pct = pct(schedule_driven_ids.len());

        let status = if hard_pct > self.config.hard_constraint_max_pct {
            MetricStatus::Fail
        } else if flexible_pct > self.config.flexible_constraint_max_pct {
            MetricStatus::Warning
        } else {
            MetricStatus::Good
        };

        let mut issues = Vec::new();
        if hard_pct > self.config.hard_constraint_max_pct {
            issues.push(
                Issue::new(
                    Severity::High,
                    self.name(),
                    "Excessive hard constraints",
                    format!(
                        "{hard_pct:.1}% of activities carry hard date constraints \
                         ({} of {total}); the target is at most {:.0}%. Hard \
                         constraints override network logic and mask true float.",
                        hard_ids.len(),
                        self.config.hard_constraint_max_pct
                    ),
                    hard_ids.clone(),
                    hard_pct,
                ),
            );
        }
        if flexible_pct > self.config.flexible_constraint_max_pct {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    self.name(),
                    "Heavy use of flexible constraints",
                    format!(
                        "{flexible_pct:.1}% of activities carry flexible date \
                         constraints ({} of {total}); the target is at most {:.0}%.",
                        flexible_ids.len(),
                        self.config.flexible_constraint_max_pct
                    ),
                    flexible_ids.clone(),
                    flexible_pct,
                ),
            );
        }
        if schedule_driven_pct > self.config.schedule_driven_max_pct {
            issues.push(
                Issue::new(
                    Severity::Low,
                    self.name(),
                    "Schedule dominated by ALAP/ASAP placement",
                    format!(
                        "{schedule_driven_pct:.1}% of activities are placed as late or \
                         as soon as possible ({} of {total}).",
                        schedule_driven_ids.len()
                    ),
                    schedule_driven_ids.clone(),
                    schedule_driven_pct,
                ),
            );
        }

        Ok(Evaluation::with_issues(
            MetricRecord::Constraints(ConstraintMetrics {
                total_activities: total,
                hard_count: hard_ids.len(),
                hard_pct,
                flexible_count: flexible_ids.len(),
                flexible_pct,
                schedule_driven_count: schedule_driven_ids.len(),
                schedule_driven_pct,
                other_count,
                status,
            }),
            issues,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;

    fn activity(id: &str, constraint: Option<&str>) -> Activity {
        Activity {
            id: id.to_string(),
            constraint_type: constraint.map(str::to_string),
            constraint_category: ConstraintCategory::classify(constraint),
            ..Activity::default()
        }
    }

    #[test]
    fn test_hard_constraint_breach_is_high() {
        // 2 hard of 10 = 20% > 10%
        let mut activities = vec![
            activity("A1", Some("Must Start On")),
            activity("A2", Some("Mandatory Finish")),
        ];
        for i in 0..8 {
            activities.push(activity(&format!("B{i}"), None));
        }
        let table = ActivityTable::from_activities(activities);
        let eval = ConstraintEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        let MetricRecord::Constraints(m) = &eval.record else {
            panic!("wrong record variant");
        };
        assert_eq!(m.hard_count, 2);
        assert!((m.hard_pct - 20.0).abs() < 1e-9);
        assert_eq!(m.status, MetricStatus::Fail);
        assert_eq!(eval.issues.len(), 1);
        assert_eq!(eval.issues[0].severity, Severity::High);
        assert_eq!(eval.issues[0].affected_activity_ids, vec!["A1", "A2"]);
    }

    #[test]
    fn test_within_targets_is_good() {
        let mut activities = vec![activity("A1", Some("Finish On or Before"))];
        for i in 0..19 {
            activities.push(activity(&format!("B{i}"), None));
        }
        let table = ActivityTable::from_activities(activities);
        let eval = ConstraintEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        assert_eq!(eval.record.status(), MetricStatus::Good);
        assert!(eval.issues.is_empty());
    }

    #[test]
    fn test_schedule_driven_majority_is_informational() {
        let activities = vec![
            activity("A1", Some("As Late As Possible")),
            activity("A2", Some("As Soon As Possible")),
            activity("A3", None),
        ];
        let table = ActivityTable::from_activities(activities);
        let eval = ConstraintEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        // informational only, never degrades the status tier
        assert_eq!(eval.record.status(), MetricStatus::Good);
        assert_eq!(eval.issues.len(), 1);
        assert_eq!(eval.issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_empty_table_is_unknown() {
        let table = ActivityTable::from_activities(vec![]);
        let eval = ConstraintEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        assert_eq!(eval.record.status(), MetricStatus::Unknown);
    }
}
