//! schedlint — schedule-quality analysis engine
//!
//! Ingests Primavera-P6-style activity exports (header row + data rows)
//! and computes a DCMA/GAO-style schedule-health assessment: parsed
//! relationship records, a typed metric set, detected issues,
//! prioritized recommendations, per-WBS-group health scores, and one
//! composite 0-100 health score.
//!
//! ```no_run
//! use schedlint::{ScheduleAnalyzer, ExternalInputs};
//!
//! # fn main() -> Result<(), schedlint::ScheduleError> {
//! # let (headers, rows): (Vec<String>, Vec<Vec<String>>) = (vec![], vec![]);
//! let analyzer = ScheduleAnalyzer::new().with_external_inputs(ExternalInputs {
//!     critical_path_length: Some(220.0),
//!     critical_path_float: Some(-4.0),
//!     planned_complete_count: Some(120),
//! });
//! let result = analyzer.analyze_rows(&headers, &rows)?;
//! println!("health {:.0} ({})", result.health_score.score, result.health_score.rating);
//! # Ok(())
//! # }
//! ```
//!
//! The engine performs no I/O and holds no state across invocations;
//! reading the export and persisting results belong to the caller.

pub mod analyzer;
pub mod config;
pub mod errors;
pub mod evaluators;
pub mod models;
pub mod parsers;
pub mod recommendations;
pub mod scoring;

pub use analyzer::{MetricsResult, ScheduleAnalyzer};
pub use config::AnalysisConfig;
pub use errors::{AnalysisWarning, ScheduleError, ScheduleResult};
pub use evaluators::{ExternalInputs, ScheduleMetrics};
pub use models::{
    Activity, ActivityStatus, ActivityType, ConstraintCategory, HealthRating, Issue, IssueSummary,
    MetricStatus, Recommendation, RelType, Relationship, Severity,
};
pub use parsers::ActivityTable;
pub use scoring::{HealthScore, WbsHealthReport};
