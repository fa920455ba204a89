//! Float analysis evaluator (GAO float realism, seven sub-metrics)
//!
//! Sub-metrics: critical percentage, near-critical percentage,
//! negative-float list, float ratio, descriptive statistics, excessive
//! float against the project span, and the most-negative value surfaced
//! standalone. The record status is the worst tiered sub-status.

use crate::config::AnalysisConfig;
use crate::evaluators::base::{Evaluation, Evaluator, FloatMetrics, MetricRecord};
use crate::evaluators::stats;
use crate::models::{Issue, MetricStatus, Severity};
use crate::parsers::ActivityTable;

pub struct FloatEvaluator {
    config: AnalysisConfig,
}

impl FloatEvaluator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn critical_status(&self, pct: f64) -> MetricStatus {
        let (good_lo, good_hi) = self.config.critical_pct_good;
        if pct > self.config.critical_pct_fail {
            MetricStatus::Fail
        } else if pct < good_lo || pct > good_hi {
            MetricStatus::Warning
        } else {
            MetricStatus::Good
        }
    }

    fn ratio_status(&self, ratio: f64) -> MetricStatus {
        let (good_lo, good_hi) = self.config.float_ratio_band;
        let (extreme_lo, extreme_hi) = self.config.float_ratio_extreme;
        if ratio < extreme_lo || ratio > extreme_hi {
            MetricStatus::Fail
        } else if ratio < good_lo || ratio > good_hi {
            MetricStatus::Warning
        } else {
            MetricStatus::Good
        }
    }
}

fn worst(statuses: impl IntoIterator<Item = MetricStatus>) -> MetricStatus {
    let mut result = MetricStatus::Unknown;
    for status in statuses {
        result = match (result, status) {
            (_, MetricStatus::Fail) | (MetricStatus::Fail, _) => MetricStatus::Fail,
            (_, MetricStatus::Warning) | (MetricStatus::Warning, _) => MetricStatus::Warning,
            (_, MetricStatus::Good) | (MetricStatus::Good, _) => MetricStatus::Good,
            (MetricStatus::Unknown, MetricStatus::Unknown) => MetricStatus::Unknown,
        };
    }
    result
}

impl Evaluator for FloatEvaluator {
    fn name(&self) -> &'static str {
        "float_analysis"
    }

    fn description(&self) -> &'static str {
        "Total-float realism: critical share, negative float, float ratio"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        let with_float: Vec<(&str, f64)> = table
            .activities()
            .iter()
            .filter_map(|a| a.total_float.map(|f| (a.id.as_str(), f)))
            .collect();
        if with_float.is_empty() {
            return Ok(Evaluation::new(MetricRecord::FloatAnalysis(
                FloatMetrics::default(),
            )));
        }

        let analyzed = with_float.len();
        let floats: Vec<f64> = with_float.iter().map(|(_, f)| *f).collect();
        let pct = |n: usize| n as f64 / analyzed as f64 * 100.0;

        let critical_count = floats.iter().filter(|&&f| f == 0.0).count();
        let critical_pct = pct(critical_count);
        let critical_status = self.critical_status(critical_pct);

        // near-critical band is 1 to `near_critical_float_days` inclusive
        let near = self.config.near_critical_float_days;
        let near_critical_count = floats.iter().filter(|&&f| f >= 1.0 && f <= near).count();
        let near_critical_pct = pct(near_critical_count);

        // most-negative first
        let mut negative: Vec<(&str, f64)> = with_float
            .iter()
            .filter(|(_, f)| *f < 0.0)
            .copied()
            .collect();
        negative.sort_by(|a, b| a.1.total_cmp(&b.1));
        let most_negative = negative.first().map(|(_, f)| *f);

        // Ratio denominator: mean duration of incomplete activities.
        let incomplete_durations: Vec<f64> = table
            .activities()
            .iter()
            .filter(|a| !a.is_complete() && !a.is_milestone())
            .filter_map(|a| a.planned_duration)
            .filter(|d| *d > 0.0)
            .collect();
        let float_ratio = match (stats::mean(&floats), stats::mean(&incomplete_durations)) {
            (Some(mean_float), Some(mean_duration)) if mean_duration > 0.0 => {
                Some(mean_float / mean_duration)
            }
            _ => None,
        };
        let ratio_status = float_ratio
            .map(|r| self.ratio_status(r))
            .unwrap_or(MetricStatus::Unknown);

        let span = table.project_span_days().filter(|s| *s > 0.0);
        let excessive: Vec<&str> = match span {
            Some(span) => with_float
                .iter()
                .filter(|(_, f)| *f > span * self.config.excessive_float_span_fraction)
                .map(|(id, _)| *id)
                .collect(),
            None => Vec::new(),
        };

        let negative_status = if negative.is_empty() {
            MetricStatus::Good
        } else {
            MetricStatus::Fail
        };
        let status = worst([critical_status, ratio_status, negative_status]);

        let mut issues = Vec::new();
        if !negative.is_empty() {
            issues.push(
                Issue::new(
                    Severity::High,
                    self.name(),
                    "Activities with negative float",
                    format!(
                        "{} activities are behind schedule (negative total float, \
                         worst {:.1} days). The listed order is most-negative first.",
                        negative.len(),
                        most_negative.unwrap_or(0.0)
                    ),
                    negative.iter().map(|(id, _)| id.to_string()).collect(),
                    negative.len() as f64,
                ),
            );
        }
        if critical_pct > self.config.critical_pct_fail {
            issues.push(
                Issue::new(
                    Severity::Medium,
                    self.name(),
                    "Excessive critical-path share",
                    format!(
                        "{critical_pct:.1}% of activities sit on the critical path \
                         (zero total float); above {:.0}% the schedule has little \
                         room to absorb slip.",
                        self.config.critical_pct_fail
                    ),
                    with_float
                        .iter()
                        .filter(|(_, f)| *f == 0.0)
                        .map(|(id, _)| id.to_string())
                        .collect(),
                    critical_pct,
                ),
            );
        }
        if let (Some(ratio), MetricStatus::Fail) = (float_ratio, ratio_status) {
            issues.push(Issue::new(
                Severity::Medium,
                self.name(),
                "Float out of proportion to durations",
                format!(
                    "The mean-float to mean-duration ratio is {ratio:.2}; values far \
                     outside [{:.1}, {:.1}] usually indicate broken or missing logic.",
                    self.config.float_ratio_band.0, self.config.float_ratio_band.1
                ),
                Vec::new(),
                ratio,
            ));
        }
        if !excessive.is_empty() {
            issues.push(
                Issue::new(
                    Severity::Low,
                    self.name(),
                    "Excessive total float",
                    format!(
                        "{} activities have total float exceeding half the project \
                         span; they are likely disconnected from the driving logic.",
                        excessive.len()
                    ),
                    excessive.iter().map(|id| id.to_string()).collect(),
                    excessive.len() as f64,
                ),
            );
        }

        Ok(Evaluation::with_issues(
            MetricRecord::FloatAnalysis(FloatMetrics {
                analyzed,
                critical_count,
                critical_pct,
                critical_status,
                near_critical_count,
                near_critical_pct,
                negative_count: negative.len(),
                most_negative,
                float_ratio,
                ratio_status,
                mean: stats::mean(&floats),
                median: stats::median(&floats),
                std_dev: stats::std_dev(&floats),
                excessive_count: excessive.len(),
                status,
            }),
            issues,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, ActivityStatus};
    use chrono::NaiveDate;

    fn activity(id: &str, float: Option<f64>, duration: Option<f64>) -> Activity {
        Activity {
            id: id.to_string(),
            total_float: float,
            planned_duration: duration,
            status: ActivityStatus::NotStarted,
            ..Activity::default()
        }
    }

    fn ratio_table(mean_float: f64) -> ActivityTable {
        // one activity, duration 10, so ratio = mean_float / 10
        ActivityTable::from_activities(vec![activity("A1", Some(mean_float), Some(10.0))])
    }

    fn ratio_status_of(table: &ActivityTable) -> MetricStatus {
        let eval = FloatEvaluator::new(AnalysisConfig::default())
            .evaluate(table)
            .unwrap();
        let MetricRecord::FloatAnalysis(m) = eval.record else {
            panic!("wrong record variant");
        };
        m.ratio_status
    }

    #[test]
    fn test_ratio_tier_boundaries() {
        // Good inside [0.5, 1.5] inclusive
        assert_eq!(ratio_status_of(&ratio_table(5.0)), MetricStatus::Good);
        assert_eq!(ratio_status_of(&ratio_table(15.0)), MetricStatus::Good);
        assert_eq!(ratio_status_of(&ratio_table(10.0)), MetricStatus::Good);
        // Warning strictly outside the band but inside [0.3, 2.0]
        assert_eq!(ratio_status_of(&ratio_table(4.0)), MetricStatus::Warning);
        assert_eq!(ratio_status_of(&ratio_table(16.0)), MetricStatus::Warning);
        assert_eq!(ratio_status_of(&ratio_table(3.0)), MetricStatus::Warning);
        assert_eq!(ratio_status_of(&ratio_table(20.0)), MetricStatus::Warning);
        // Fail outside the extreme bound
        assert_eq!(ratio_status_of(&ratio_table(2.0)), MetricStatus::Fail);
        assert_eq!(ratio_status_of(&ratio_table(25.0)), MetricStatus::Fail);
    }

    #[test]
    fn test_critical_percentage_tiers() {
        let evaluator = FloatEvaluator::new(AnalysisConfig::default());
        assert_eq!(evaluator.critical_status(10.0), MetricStatus::Good);
        assert_eq!(evaluator.critical_status(5.0), MetricStatus::Good);
        assert_eq!(evaluator.critical_status(15.0), MetricStatus::Good);
        assert_eq!(evaluator.critical_status(2.0), MetricStatus::Warning);
        assert_eq!(evaluator.critical_status(18.0), MetricStatus::Warning);
        assert_eq!(evaluator.critical_status(25.0), MetricStatus::Fail);
    }

    #[test]
    fn test_negative_float_sorted_most_negative_first() {
        let table = ActivityTable::from_activities(vec![
            activity("A1", Some(-3.0), Some(10.0)),
            activity("A2", Some(-12.0), Some(10.0)),
            activity("A3", Some(4.0), Some(10.0)),
            activity("A4", Some(-7.0), Some(10.0)),
        ]);
        let eval = FloatEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        let MetricRecord::FloatAnalysis(m) = &eval.record else {
            panic!("wrong record variant");
        };
        assert_eq!(m.negative_count, 3);
        assert_eq!(m.most_negative, Some(-12.0));
        assert_eq!(m.status, MetricStatus::Fail);
        let negative_issue = eval
            .issues
            .iter()
            .find(|i| i.severity == Severity::High)
            .unwrap();
        assert_eq!(negative_issue.affected_activity_ids, vec!["A2", "A4", "A1"]);
    }

    #[test]
    fn test_near_critical_band() {
        let table = ActivityTable::from_activities(vec![
            activity("A1", Some(0.0), Some(10.0)),
            activity("A2", Some(1.0), Some(10.0)),
            activity("A3", Some(10.0), Some(10.0)),
            activity("A4", Some(11.0), Some(10.0)),
            // under a day of float is sub-critical noise, not near-critical
            activity("A5", Some(0.5), Some(10.0)),
        ]);
        let eval = FloatEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        let MetricRecord::FloatAnalysis(m) = eval.record else {
            panic!("wrong record variant");
        };
        assert_eq!(m.near_critical_count, 2);
        assert_eq!(m.critical_count, 1);
    }

    #[test]
    fn test_excessive_float_against_span() {
        let mut a = activity("A1", Some(80.0), Some(10.0));
        a.start = NaiveDate::from_ymd_opt(2025, 1, 1);
        a.finish = NaiveDate::from_ymd_opt(2025, 1, 11);
        let mut b = activity("A2", Some(5.0), Some(10.0));
        b.start = NaiveDate::from_ymd_opt(2025, 1, 1);
        b.finish = NaiveDate::from_ymd_opt(2025, 4, 11);
        // span = 100 days; threshold = 50; A1's 80 exceeds it
        let table = ActivityTable::from_activities(vec![a, b]);
        let eval = FloatEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        let MetricRecord::FloatAnalysis(m) = &eval.record else {
            panic!("wrong record variant");
        };
        assert_eq!(m.excessive_count, 1);
        let low = eval
            .issues
            .iter()
            .find(|i| i.severity == Severity::Low)
            .unwrap();
        assert_eq!(low.affected_activity_ids, vec!["A1"]);
    }

    #[test]
    fn test_no_float_data_is_unknown() {
        let table = ActivityTable::from_activities(vec![activity("A1", None, Some(10.0))]);
        let eval = FloatEvaluator::new(AnalysisConfig::default())
            .evaluate(&table)
            .unwrap();
        assert_eq!(eval.record.status(), MetricStatus::Unknown);
        assert!(eval.issues.is_empty());
    }
}
