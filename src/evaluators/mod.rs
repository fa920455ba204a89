//! Metric evaluators for schedule quality
//!
//! A fixed battery of independent, pure evaluators, each implementing
//! the `Evaluator` trait: it reads the activity table and returns one
//! typed metric record plus zero or more issues. The engine fans the
//! battery out over rayon and fans results back in, in registration
//! order.
//!
//! Battery, in registration order:
//! - `negative_lags` — leads on relationships; target zero
//! - `positive_lags` — lag share against the DCMA 5% target
//! - `constraints` — date-constraint usage per category
//! - `missing_logic` — open logic ends, terminal milestones excluded
//! - `durations` — duration realism over non-milestone activities
//! - `float_analysis` — critical share, negative float, float ratio
//! - `relationship_types` — FS/FF/SS/SF distribution, SS/FF share
//! - `resources` — incomplete activities without assignments
//! - `indices` — CPLI/BEI from caller-supplied inputs

mod base;
mod constraints;
mod duration;
mod engine;
mod float_analysis;
mod indices;
mod lags;
mod logic;
mod relationship_types;
mod resources;
mod stats;

pub use base::{
    ConstraintMetrics, DurationMetrics, Evaluation, Evaluator, FloatMetrics, IndexMetrics,
    MetricRecord, MissingLogicMetrics, NegativeLagMetrics, PositiveLagMetrics,
    RelationshipTypeMetrics, ResourceMetrics, ScheduleMetrics,
};
pub use constraints::ConstraintEvaluator;
pub use duration::DurationEvaluator;
pub use engine::{EngineOutput, EvaluatorEngine};
pub use float_analysis::FloatEvaluator;
pub use indices::{ExternalInputs, IndexEvaluator};
pub use lags::{NegativeLagEvaluator, PositiveLagEvaluator};
pub use logic::MissingLogicEvaluator;
pub use relationship_types::RelationshipTypeEvaluator;
pub use resources::ResourceEvaluator;

use crate::config::AnalysisConfig;

/// The full battery in its fixed registration order.
pub fn default_evaluators(
    config: &AnalysisConfig,
    inputs: &ExternalInputs,
) -> Vec<Box<dyn Evaluator>> {
    vec![
        Box::new(NegativeLagEvaluator::new()),
        Box::new(PositiveLagEvaluator::new(config.clone())),
        Box::new(ConstraintEvaluator::new(config.clone())),
        Box::new(MissingLogicEvaluator::new()),
        Box::new(DurationEvaluator::new(config.clone())),
        Box::new(FloatEvaluator::new(config.clone())),
        Box::new(RelationshipTypeEvaluator::new(config.clone())),
        Box::new(ResourceEvaluator::new(config.clone())),
        Box::new(IndexEvaluator::new(config.clone(), inputs.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_battery_is_complete() {
        let battery = default_evaluators(&AnalysisConfig::default(), &ExternalInputs::default());
        let names: Vec<&str> = battery.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "negative_lags",
                "positive_lags",
                "constraints",
                "missing_logic",
                "durations",
                "float_analysis",
                "relationship_types",
                "resources",
                "indices",
            ]
        );
    }
}
