//! Evaluator trait and typed metric records
//!
//! Every metric evaluator implements `Evaluator` and returns an
//! `Evaluation`: one typed `MetricRecord` plus zero or more `Issue`s.
//! The record set is a closed enum, one variant per evaluator, so the
//! compiler enforces that every evaluator output is consumed when the
//! records are fanned into `ScheduleMetrics`.
//!
//! Each record type's `Default` is the all-zero record with status
//! `Unknown`; the engine substitutes it when an evaluator fails.

use crate::models::{Issue, MetricStatus};
use crate::parsers::ActivityTable;
use serde::{Deserialize, Serialize};

/// Output of one evaluator run.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub record: MetricRecord,
    pub issues: Vec<Issue>,
}

impl Evaluation {
    pub fn new(record: MetricRecord) -> Self {
        Self {
            record,
            issues: Vec::new(),
        }
    }

    pub fn with_issues(record: MetricRecord, issues: Vec<Issue>) -> Self {
        Self { record, issues }
    }
}

/// Common interface for all metric evaluators.
///
/// Evaluators are pure over the table: read-only input, own output
/// record, no shared state. That is what lets the engine fan them out
/// across a thread pool.
pub trait Evaluator: Send + Sync {
    /// Stable metric name; doubles as the issue category key.
    fn name(&self) -> &'static str;

    /// Short human-readable description of what this evaluator checks.
    fn description(&self) -> &'static str;

    /// Run the evaluator against the activity table.
    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation>;
}

/// Negative-lag check: entries with lag < 0, either direction. Target 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NegativeLagMetrics {
    pub count: usize,
    pub total_relationships: usize,
    pub status: MetricStatus,
}

/// Positive-lag share of all relationship entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositiveLagMetrics {
    pub count: usize,
    pub total_relationships: usize,
    pub percentage: f64,
    pub threshold_pct: f64,
    pub status: MetricStatus,
}

/// Constraint usage, per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintMetrics {
    pub total_activities: usize,
    pub hard_count: usize,
    pub hard_pct: f64,
    pub flexible_count: usize,
    pub flexible_pct: f64,
    pub schedule_driven_count: usize,
    pub schedule_driven_pct: f64,
    pub other_count: usize,
    pub status: MetricStatus,
}

/// Open logic ends, terminal milestones excluded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissingLogicMetrics {
    /// Activities missing a predecessor or a successor (or both)
    pub missing_any: usize,
    pub missing_predecessor_only: usize,
    pub missing_successor_only: usize,
    pub missing_both: usize,
    /// Terminal milestones whose open end was expected and not counted
    pub excluded_milestones: usize,
    pub status: MetricStatus,
}

/// Duration realism over non-milestone activities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationMetrics {
    /// Non-milestone activities with a duration value
    pub analyzed: usize,
    pub long_count: usize,
    pub very_long_count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Informational typical band the mean is benchmarked against
    pub typical_band: (f64, f64),
    /// Milestones carrying a nonzero duration value
    pub milestones_with_duration: usize,
    pub status: MetricStatus,
}

/// Float analysis: seven sub-metrics. `status` is the worst of the
/// tiered sub-statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloatMetrics {
    /// Activities with a total-float value
    pub analyzed: usize,
    pub critical_count: usize,
    pub critical_pct: f64,
    pub critical_status: MetricStatus,
    pub near_critical_count: usize,
    pub near_critical_pct: f64,
    pub negative_count: usize,
    pub most_negative: Option<f64>,
    /// mean(total float) / mean(duration of incomplete activities)
    pub float_ratio: Option<f64>,
    pub ratio_status: MetricStatus,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    /// Float exceeding half the project span
    pub excessive_count: usize,
    pub status: MetricStatus,
}

/// Relationship type distribution and the SS/FF share.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipTypeMetrics {
    pub fs_count: usize,
    pub ff_count: usize,
    pub ss_count: usize,
    pub sf_count: usize,
    pub total: usize,
    pub ss_ff_pct: f64,
    pub status: MetricStatus,
}

/// Execution readiness: incomplete activities without resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMetrics {
    pub incomplete_count: usize,
    pub unassigned_count: usize,
    pub unassigned_pct: f64,
    pub status: MetricStatus,
}

/// CPLI / BEI, computed from caller-supplied inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexMetrics {
    pub cpli: Option<f64>,
    pub cpli_status: MetricStatus,
    pub bei: Option<f64>,
    pub bei_status: MetricStatus,
    pub status: MetricStatus,
}

/// Closed set of evaluator outputs, tagged by metric name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum MetricRecord {
    NegativeLags(NegativeLagMetrics),
    PositiveLags(PositiveLagMetrics),
    Constraints(ConstraintMetrics),
    MissingLogic(MissingLogicMetrics),
    Durations(DurationMetrics),
    FloatAnalysis(FloatMetrics),
    RelationshipTypes(RelationshipTypeMetrics),
    Resources(ResourceMetrics),
    Indices(IndexMetrics),
}

impl MetricRecord {
    /// The metric name; matches the producing evaluator's `name()` and
    /// its issues' `category`.
    pub fn name(&self) -> &'static str {
        match self {
            MetricRecord::NegativeLags(_) => "negative_lags",
            MetricRecord::PositiveLags(_) => "positive_lags",
            MetricRecord::Constraints(_) => "constraints",
            MetricRecord::MissingLogic(_) => "missing_logic",
            MetricRecord::Durations(_) => "durations",
            MetricRecord::FloatAnalysis(_) => "float_analysis",
            MetricRecord::RelationshipTypes(_) => "relationship_types",
            MetricRecord::Resources(_) => "resources",
            MetricRecord::Indices(_) => "indices",
        }
    }

    pub fn status(&self) -> MetricStatus {
        match self {
            MetricRecord::NegativeLags(m) => m.status,
            MetricRecord::PositiveLags(m) => m.status,
            MetricRecord::Constraints(m) => m.status,
            MetricRecord::MissingLogic(m) => m.status,
            MetricRecord::Durations(m) => m.status,
            MetricRecord::FloatAnalysis(m) => m.status,
            MetricRecord::RelationshipTypes(m) => m.status,
            MetricRecord::Resources(m) => m.status,
            MetricRecord::Indices(m) => m.status,
        }
    }
}

/// The full typed metric set, one field per evaluator.
///
/// Absent evaluations (failed or never registered) leave the field at
/// its all-zero `Unknown` default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    pub negative_lags: NegativeLagMetrics,
    pub positive_lags: PositiveLagMetrics,
    pub constraints: ConstraintMetrics,
    pub missing_logic: MissingLogicMetrics,
    pub durations: DurationMetrics,
    pub float_analysis: FloatMetrics,
    pub relationship_types: RelationshipTypeMetrics,
    pub resources: ResourceMetrics,
    pub indices: IndexMetrics,
}

impl ScheduleMetrics {
    /// Fan collected records into the typed set. Later duplicates of a
    /// variant overwrite earlier ones; the engine never produces those.
    pub fn from_records(records: Vec<MetricRecord>) -> Self {
        let mut metrics = Self::default();
        for record in records {
            match record {
                MetricRecord::NegativeLags(m) => metrics.negative_lags = m,
                MetricRecord::PositiveLags(m) => metrics.positive_lags = m,
                MetricRecord::Constraints(m) => metrics.constraints = m,
                MetricRecord::MissingLogic(m) => metrics.missing_logic = m,
                MetricRecord::Durations(m) => metrics.durations = m,
                MetricRecord::FloatAnalysis(m) => metrics.float_analysis = m,
                MetricRecord::RelationshipTypes(m) => metrics.relationship_types = m,
                MetricRecord::Resources(m) => metrics.resources = m,
                MetricRecord::Indices(m) => metrics.indices = m,
            }
        }
        metrics
    }
}
