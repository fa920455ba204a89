//! Performance indices (DCMA points 13 and 14)
//!
//! CPLI and BEI apply a ratio formula and threshold tier to inputs the
//! caller supplies from its own CPM/baseline computation. Nothing is
//! scheduled here; absent inputs leave the index Unknown.

use crate::config::AnalysisConfig;
use crate::evaluators::base::{Evaluation, Evaluator, IndexMetrics, MetricRecord};
use crate::models::{Issue, MetricStatus, Severity};
use crate::parsers::ActivityTable;
use serde::{Deserialize, Serialize};

/// Inputs the engine cannot derive from the activity table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalInputs {
    /// Critical path length in work days, from the caller's CPM pass
    pub critical_path_length: Option<f64>,
    /// Total float remaining on the critical path, same units
    pub critical_path_float: Option<f64>,
    /// Baseline count of activities planned to be complete by the
    /// status date
    pub planned_complete_count: Option<usize>,
}

pub struct IndexEvaluator {
    config: AnalysisConfig,
    inputs: ExternalInputs,
}

impl IndexEvaluator {
    pub fn new(config: AnalysisConfig, inputs: ExternalInputs) -> Self {
        Self { config, inputs }
    }

    fn tier(&self, value: f64) -> MetricStatus {
        if value >= self.config.index_target {
            MetricStatus::Good
        } else if value >= self.config.index_warning_floor {
            MetricStatus::Warning
        } else {
            MetricStatus::Fail
        }
    }
}

impl Evaluator for IndexEvaluator {
    fn name(&self) -> &'static str {
        "indices"
    }

    fn description(&self) -> &'static str {
        "Critical Path Length Index and Baseline Execution Index"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        let cpli = match (
            self.inputs.critical_path_length,
            self.inputs.critical_path_float,
        ) {
            (Some(cpl), Some(float)) if cpl > 0.0 => Some((cpl + float) / cpl),
            _ => None,
        };
        let cpli_status = cpli.map(|v| self.tier(v)).unwrap_or(MetricStatus::Unknown);

        let bei = self
            .inputs
            .planned_complete_count
            .filter(|&planned| planned > 0)
            .map(|planned| {
                let completed = table.activities().iter().filter(|a| a.is_complete()).count();
                completed as f64 / planned as f64
            });
        let bei_status = bei.map(|v| self.tier(v)).unwrap_or(MetricStatus::Unknown);

        let status = match (cpli_status, bei_status) {
            (MetricStatus::Unknown, other) | (other, MetricStatus::Unknown) => other,
            (a, b) => {
                if a == MetricStatus::Fail || b == MetricStatus::Fail {
                    MetricStatus::Fail
                } else if a == MetricStatus::Warning || b == MetricStatus::Warning {
                    MetricStatus::Warning
                } else {
                    MetricStatus::Good
                }
            }
        };

        let mut issues = Vec::new();
        if let Some(value) = cpli {
            if cpli_status != MetricStatus::Good {
                issues.push(Issue::new(
                    if cpli_status == MetricStatus::Fail {
                        Severity::High
                    } else {
                        Severity::Medium
                    },
                    self.name(),
                    "Critical Path Length Index below target",
                    format!(
                        "CPLI is {value:.2}; the target is at least {:.2}. The \
                         critical path has little or negative margin to the \
                         completion date.",
                        self.config.index_target
                    ),
                    Vec::new(),
                    value,
                ));
            }
        }
        if let Some(value) = bei {
            if bei_status != MetricStatus::Good {
                issues.push(Issue::new(
                    if bei_status == MetricStatus::Fail {
                        Severity::High
                    } else {
                        Severity::Medium
                    },
                    self.name(),
                    "Baseline Execution Index below target",
                    format!(
                        "BEI is {value:.2}; the target is at least {:.2}. Fewer \
                         activities completed than the baseline planned by now.",
                        self.config.index_target
                    ),
                    Vec::new(),
                    value,
                ));
            }
        }

        Ok(Evaluation::with_issues(
            MetricRecord::Indices(IndexMetrics {
                cpli,
                cpli_status,
                bei,
                bei_status,
                status,
            }),
            issues,
        ))
    }
}
