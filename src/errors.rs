//! Error and warning taxonomy.
//!
//! Exactly one condition is fatal: a required column missing from the
//! export schema. Everything else is accumulated into a warnings list
//! returned alongside the analysis result, so partial analysis always
//! succeeds as long as the schema itself is valid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal analysis errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Required schema absent; analysis cannot proceed. Carries every
    /// unresolved required field so the caller can show the full list.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Non-fatal conditions accumulated during parsing and analysis.
///
/// Every variant names the offending column, row, or cell so the caller
/// can render an actionable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisWarning {
    /// A unit suffix was stripped from a raw column header.
    SuffixStripped { raw: String, canonical: String },
    /// One malformed relationship entry was dropped; the rest of the
    /// cell was parsed normally.
    RelationshipParse {
        activity_id: String,
        entry: String,
        reason: String,
    },
    /// Relationships for this row came from an ids-only column, so type
    /// and lag are synthesized defaults (FS, 0).
    SimpleRelationshipFallback { activity_id: String },
    /// The whole table lacks predecessor/successor columns; all
    /// logic-quality metrics report zero with status Unknown.
    NoRelationshipData,
    /// A data row without an Activity ID was excluded from the set.
    RowMissingActivityId { row_index: usize },
    /// A WBS group carried no scoreable activities and was omitted from
    /// health scoring.
    EmptyGroupSkipped { group: String },
    /// An evaluator returned an error; its metric record degrades to
    /// status Unknown.
    EvaluatorFailed { name: String, message: String },
}

impl AnalysisWarning {
    /// Whether this warning invalidates a whole metric family rather
    /// than a single row or cell.
    pub fn is_critical(&self) -> bool {
        matches!(self, AnalysisWarning::NoRelationshipData)
    }
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisWarning::SuffixStripped { raw, canonical } => {
                write!(f, "normalized column name '{raw}' to '{canonical}'")
            }
            AnalysisWarning::RelationshipParse {
                activity_id,
                entry,
                reason,
            } => write!(
                f,
                "activity {activity_id}: dropped relationship entry '{entry}' ({reason})"
            ),
            AnalysisWarning::SimpleRelationshipFallback { activity_id } => write!(
                f,
                "activity {activity_id}: relationship type/lag unavailable, assumed FS with zero lag"
            ),
            AnalysisWarning::NoRelationshipData => write!(
                f,
                "schedule has no predecessor/successor columns; logic-quality metrics are unavailable"
            ),
            AnalysisWarning::RowMissingActivityId { row_index } => {
                write!(f, "row {row_index}: missing Activity ID, row excluded")
            }
            AnalysisWarning::EmptyGroupSkipped { group } => {
                write!(f, "WBS group '{group}' has no scoreable activities, skipped")
            }
            AnalysisWarning::EvaluatorFailed { name, message } => {
                write!(f, "evaluator {name} failed: {message}")
            }
        }
    }
}
