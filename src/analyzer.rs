//! Analysis pipeline orchestration
//!
//! `ScheduleAnalyzer` wires the stages together: parse rows into the
//! activity table, run the evaluator battery, score WBS groups and the
//! composite health score, and fold issues into recommendations. One
//! call, one immutable `MetricsResult`, fully owned by the caller.

use crate::config::AnalysisConfig;
use crate::errors::{AnalysisWarning, ScheduleError};
use crate::evaluators::{default_evaluators, EvaluatorEngine, ExternalInputs, ScheduleMetrics};
use crate::models::{Issue, IssueSummary, Recommendation};
use crate::parsers::ActivityTable;
use crate::recommendations::build_recommendations;
use crate::scoring::{CompositeScorer, HealthScore, WbsHealthReport, WbsHealthScorer};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The engine's single output object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResult {
    pub metrics: ScheduleMetrics,
    pub issues: Vec<Issue>,
    pub issue_summary: IssueSummary,
    pub recommendations: Vec<Recommendation>,
    pub wbs_health: WbsHealthReport,
    pub health_score: HealthScore,
    /// Everything non-fatal accumulated across parsing, evaluation and
    /// scoring
    pub warnings: Vec<AnalysisWarning>,
}

/// Pipeline entry point. Construct once, analyze any number of
/// schedules; invocations share no state.
#[derive(Default)]
pub struct ScheduleAnalyzer {
    config: AnalysisConfig,
    inputs: ExternalInputs,
}

impl ScheduleAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Supply the CPM/baseline figures the indices evaluator needs.
    pub fn with_external_inputs(mut self, inputs: ExternalInputs) -> Self {
        self.inputs = inputs;
        self
    }

    /// Parse a raw header row plus data rows and analyze the result.
    ///
    /// The only fatal outcome is missing required columns; every other
    /// defect lands in `MetricsResult.warnings`.
    pub fn analyze_rows(
        &self,
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<MetricsResult, ScheduleError> {
        let (table, parse_warnings) = ActivityTable::build(headers, rows)?;
        Ok(self.analyze_with_warnings(&table, parse_warnings))
    }

    /// Analyze an already-built activity table.
    pub fn analyze(&self, table: &ActivityTable) -> MetricsResult {
        self.analyze_with_warnings(table, Vec::new())
    }

    fn analyze_with_warnings(
        &self,
        table: &ActivityTable,
        mut warnings: Vec<AnalysisWarning>,
    ) -> MetricsResult {
        let engine =
            EvaluatorEngine::with_evaluators(default_evaluators(&self.config, &self.inputs));
        let output = engine.run(table);
        warnings.extend(output.warnings);

        let (wbs_health, wbs_warnings) = WbsHealthScorer::new().score(table);
        warnings.extend(wbs_warnings);

        let health_score = CompositeScorer::new(self.config.clone()).score(&output.metrics);
        // Recommendations union the full id lists; issues are truncated
        // for display only afterwards, at the pipeline edge.
        let recommendations = build_recommendations(&output.issues);
        let issue_summary = IssueSummary::from_issues(&output.issues);
        let issues: Vec<Issue> = output
            .issues
            .into_iter()
            .map(|issue| issue.truncated(self.config.max_listed_activities))
            .collect();

        info!(
            activities = table.len(),
            issues = issues.len(),
            score = health_score.score,
            rating = %health_score.rating,
            "schedule analysis complete"
        );

        MetricsResult {
            metrics: output.metrics,
            issues,
            issue_summary,
            recommendations,
            wbs_health,
            health_score,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, MetricStatus};

    #[test]
    fn test_analyze_empty_table() {
        let result = ScheduleAnalyzer::new().analyze(&ActivityTable::from_activities(vec![]));
        assert_eq!(result.issues.len(), 0);
        assert_eq!(result.recommendations.len(), 0);
        assert_eq!(result.health_score.score, 100.0);
        assert_eq!(result.metrics.constraints.status, MetricStatus::Unknown);
    }

    #[test]
    fn test_invocations_are_independent() {
        let analyzer = ScheduleAnalyzer::new();
        let table = ActivityTable::from_activities(vec![Activity {
            id: "A1".to_string(),
            total_float: Some(-5.0),
            ..Activity::default()
        }]);
        let first = analyzer.analyze(&table);
        let second = analyzer.analyze(&table);
        assert_eq!(first.issues.len(), second.issues.len());
        assert_eq!(first.health_score.score, second.health_score.score);
    }
}
