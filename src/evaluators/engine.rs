//! Evaluator engine: fan-out / fan-in over the metric battery
//!
//! Evaluators are read-only over the table and write only their own
//! record, so the engine runs them across the rayon pool. Results are
//! collected in registration order regardless of completion order, which
//! keeps the output deterministic.

use crate::errors::AnalysisWarning;
use crate::evaluators::base::{Evaluator, ScheduleMetrics};
use crate::models::Issue;
use crate::parsers::ActivityTable;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Fan-in product of one engine run.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub metrics: ScheduleMetrics,
    /// All issues, High first; registration order within a severity
    pub issues: Vec<Issue>,
    /// One `EvaluatorFailed` per evaluator that returned an error
    pub warnings: Vec<AnalysisWarning>,
}

#[derive(Default)]
pub struct EvaluatorEngine {
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl EvaluatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluators(evaluators: Vec<Box<dyn Evaluator>>) -> Self {
        Self { evaluators }
    }

    pub fn register(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluators.push(evaluator);
    }

    pub fn evaluator_count(&self) -> usize {
        self.evaluators.len()
    }

    /// Run the full battery. An evaluator error never aborts the run:
    /// its record is left at the Unknown default and a warning is
    /// recorded in its place.
    pub fn run(&self, table: &ActivityTable) -> EngineOutput {
        debug!(
            evaluators = self.evaluators.len(),
            activities = table.len(),
            "running evaluator battery"
        );

        let results: Vec<_> = self
            .evaluators
            .par_iter()
            .map(|evaluator| (evaluator.name(), evaluator.evaluate(table)))
            .collect();

        let mut records = Vec::with_capacity(results.len());
        let mut issues = Vec::new();
        let mut warnings = Vec::new();
        for (name, result) in results {
            match result {
                Ok(evaluation) => {
                    records.push(evaluation.record);
                    issues.extend(evaluation.issues);
                }
                Err(error) => {
                    warn!(evaluator = name, %error, "evaluator failed");
                    warnings.push(AnalysisWarning::EvaluatorFailed {
                        name: name.to_string(),
                        message: error.to_string(),
                    });
                }
            }
        }

        issues.sort_by(|a, b| b.severity.cmp(&a.severity));

        EngineOutput {
            metrics: ScheduleMetrics::from_records(records),
            issues,
            warnings,
        }
    }
}
