//! Lag evaluators (DCMA points 2 and 3)
//!
//! Negative lags (leads) hide overlap assumptions and should not exist;
//! positive lags are tolerated up to a small share of all relationships.
//! Both count relationship entries in either direction, attributed to
//! the activity bearing the declaration, not the counterpart.

use crate::config::AnalysisConfig;
use crate::evaluators::base::{
    Evaluation, Evaluator, MetricRecord, NegativeLagMetrics, PositiveLagMetrics,
};
use crate::models::{Issue, MetricStatus, Severity};
use crate::parsers::ActivityTable;

#[derive(Default)]
pub struct NegativeLagEvaluator;

impl NegativeLagEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for NegativeLagEvaluator {
    fn name(&self) -> &'static str {
        "negative_lags"
    }

    fn description(&self) -> &'static str {
        "Relationships with negative lag (leads); target zero"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        if !table.has_relationship_data() {
            return Ok(Evaluation::new(MetricRecord::NegativeLags(
                NegativeLagMetrics::default(),
            )));
        }

        let total = table.total_relationship_count();
        let mut count = 0usize;
        let mut bearing_ids = Vec::new();
        for activity in table.activities() {
            let here = activity.relationships().filter(|r| r.lag < 0).count();
            if here > 0 {
                count += here;
                bearing_ids.push(activity.id.clone());
            }
        }

        let status = if count == 0 {
            MetricStatus::Good
        } else {
            MetricStatus::Fail
        };

        let mut issues = Vec::new();
        if count > 0 {
            issues.push(Issue::new(
                Severity::High,
                self.name(),
                "Negative lags (leads) present",
                format!(
                    "{count} of {total} relationship entries carry a negative lag. \
                     Leads hide overlap assumptions the network cannot validate; \
                     the target is zero."
                ),
                bearing_ids,
                count as f64,
            ));
        }

        Ok(Evaluation::with_issues(
            MetricRecord::NegativeLags(NegativeLagMetrics {
                count,
                total_relationships: total,
                status,
            }),
            issues,
        ))
    }
}

pub struct PositiveLagEvaluator {
    config: AnalysisConfig,
}

impl PositiveLagEvaluator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl Evaluator for PositiveLagEvaluator {
    fn name(&self) -> &'static str {
        "positive_lags"
    }

    fn description(&self) -> &'static str {
        "Share of relationships with positive lag against the DCMA target"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        let threshold = self.config.positive_lag_max_pct;
        if !table.has_relationship_data() || table.total_relationship_count() == 0 {
            return Ok(Evaluation::new(MetricRecord::PositiveLags(
                PositiveLagMetrics {
                    threshold_pct: threshold,
                    ..PositiveLagMetrics::default()
                },
            )));
        }

        let total = table.total_relationship_count();
        let mut count = 0usize;
        let mut bearing_ids = Vec::new();
        for activity in table.activities() {
            let here = activity.relationships().filter(|r| r.lag > 0).count();
            if here > 0 {
                count += here;
                bearing_ids.push(activity.id.clone());
            }
        }
        let percentage = count as f64 / total as f64 * 100.0;

        // Warning up to twice the target, Fail beyond.
        let status = if percentage <= threshold {
            MetricStatus::Good
        } else if percentage <= threshold * 2.0 {
            MetricStatus::Warning
        } else {
            MetricStatus::Fail
        };

        let mut issues = Vec::new();
        if percentage > threshold {
            issues.push(Issue::new(
                Severity::Medium,
                self.name(),
                "Excessive positive lags",
                format!(
                    "{percentage:.1}% of relationships carry a positive lag \
                     ({count} of {total}); the target is at most {threshold:.0}%. \
                     Lags embed hidden wait time that should be modeled as activities."
                ),
                bearing_ids,
                percentage,
            ));
        }

        Ok(Evaluation::with_issues(
            MetricRecord::PositiveLags(PositiveLagMetrics {
                count,
                total_relationships: total,
                percentage,
                threshold_pct: threshold,
                status,
            }),
            issues,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, RelType, Relationship};

    fn activity(id: &str, pred_lags: &[i64], succ_lags: &[i64]) -> Activity {
        Activity {
            id: id.to_string(),
            predecessors: pred_lags
                .iter()
                .map(|&lag| Relationship::new("X", RelType::FS, lag))
                .collect(),
            successors: succ_lags
                .iter()
                .map(|&lag| Relationship::new("Y", RelType::FS, lag))
                .collect(),
            ..Activity::default()
        }
    }

    #[test]
    fn test_negative_lags_counted_both_directions() {
        let table = ActivityTable::from_activities(vec![
            activity("A1", &[-5, 0], &[-1]),
            activity("A2", &[0], &[]),
        ]);
        let eval = NegativeLagEvaluator::new()
            .evaluate(&table)
            .unwrap();
        let MetricRecord::NegativeLags(m) = eval.record else {
            panic!("wrong record variant");
        };
        assert_eq!(m.count, 2);
        assert_eq!(m.total_relationships, 4);
        assert_eq!(m.status, MetricStatus::Fail);
        assert_eq!(eval.issues.len(), 1);
        assert_eq!(eval.issues[0].severity, Severity::High);
        assert_eq!(eval.issues[0].affected_activity_ids, vec!["A1"]);
    }

    #[test]
    fn test_negative_count_invariant_under_declaration_order() {
        let forward = ActivityTable::from_activities(vec![activity("A1", &[-5, 3, -2, 0], &[])]);
        let reversed = ActivityTable::from_activities(vec![activity("A1", &[0, -2, 3, -5], &[])]);
        let evaluator = NegativeLagEvaluator::new();
        let a = evaluator.evaluate(&forward).unwrap();
        let b = evaluator.evaluate(&reversed).unwrap();
        let (MetricRecord::NegativeLags(a), MetricRecord::NegativeLags(b)) = (a.record, b.record)
        else {
            panic!("wrong record variant");
        };
        assert_eq!(a.count, b.count);
        assert_eq!(a.count, 2);
    }

    #[test]
    fn test_zero_negative_lags_is_good_no_issue() {
        let table = ActivityTable::from_activities(vec![activity("A1", &[0, 5], &[])]);
        let eval = NegativeLagEvaluator::new()
            .evaluate(&table)
            .unwrap();
        assert_eq!(eval.record.status(), MetricStatus::Good);
        assert!(eval.issues.is_empty());
    }

    #[test]
    fn test_no_relationship_data_is_unknown() {
        let table = ActivityTable::without_relationship_data(vec![activity("A1", &[], &[])]);
        let eval = NegativeLagEvaluator::new()
            .evaluate(&table)
            .unwrap();
        assert_eq!(eval.record.status(), MetricStatus::Unknown);
        assert!(eval.issues.is_empty());
    }

    #[test]
    fn test_positive_lag_ratio_over_target() {
        // 6 positive of 34 total = 17.6%
        let mut activities = vec![activity("A1", &[3, 2, 1, 4, 5, 6], &[])];
        for i in 0..28 {
            activities.push(activity(&format!("B{i}"), &[0], &[]));
        }
        let table = ActivityTable::from_activities(activities);
        let eval = PositiveLagEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        let MetricRecord::PositiveLags(m) = eval.record else {
            panic!("wrong record variant");
        };
        assert_eq!(m.count, 6);
        assert_eq!(m.total_relationships, 34);
        assert!((m.percentage - 17.6).abs() < 0.1);
        assert_eq!(m.status, MetricStatus::Fail);
        assert_eq!(eval.issues.len(), 1);
        assert_eq!(eval.issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_positive_lag_ratio_within_target() {
        let table = ActivityTable::from_activities(vec![
            activity("A1", &[3], &[]),
            activity("A2", &[0; 20], &[]),
        ]);
        let eval = PositiveLagEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        assert_eq!(eval.record.status(), MetricStatus::Good);
        assert!(eval.issues.is_empty());
    }
}
