//! Core data models for schedlint
//!
//! These models are used throughout the crate for representing
//! schedule activities, logic relationships, detected issues, and
//! analysis results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Severity levels for issues
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Status tier of a single metric against its documented threshold.
///
/// `Unknown` is the explicit "data unavailable" state: the metric could not
/// be computed (e.g. the schedule carries no relationship columns) and its
/// zero values must not be read as a clean pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Fail,
    #[default]
    Unknown,
}

impl std::fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricStatus::Good => write!(f, "good"),
            MetricStatus::Warning => write!(f, "warning"),
            MetricStatus::Fail => write!(f, "fail"),
            MetricStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Progress status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivityStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ActivityStatus {
    /// Parse a P6 status label. Unrecognized labels map to `NotStarted`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "completed" | "complete" => ActivityStatus::Completed,
            "in progress" => ActivityStatus::InProgress,
            _ => ActivityStatus::NotStarted,
        }
    }
}

/// P6 activity type. Milestone variants drive exclusion rules in the
/// duration and missing-logic evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivityType {
    #[default]
    TaskDependent,
    ResourceDependent,
    StartMilestone,
    FinishMilestone,
    LevelOfEffort,
    WbsSummary,
    Other,
}

impl ActivityType {
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_ascii_lowercase();
        if lower.is_empty() || lower == "task dependent" {
            return ActivityType::TaskDependent;
        }
        if lower == "resource dependent" {
            return ActivityType::ResourceDependent;
        }
        if lower.contains("milestone") {
            return if lower.contains("finish") {
                ActivityType::FinishMilestone
            } else {
                ActivityType::StartMilestone
            };
        }
        if lower.contains("level of effort") {
            return ActivityType::LevelOfEffort;
        }
        if lower.contains("wbs summary") {
            return ActivityType::WbsSummary;
        }
        ActivityType::Other
    }

    pub fn is_milestone(&self) -> bool {
        matches!(
            self,
            ActivityType::StartMilestone | ActivityType::FinishMilestone
        )
    }
}

/// Category of a date constraint, classified from the raw P6 label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConstraintCategory {
    /// Must Start On / Must Finish On / Start On / Finish On / Mandatory *
    Hard,
    /// * On or After / * On or Before
    Flexible,
    /// As Late As Possible / As Soon As Possible
    ScheduleDriven,
    /// Non-empty label outside the known sets
    Other,
    /// No constraint
    #[default]
    None,
}

/// Exact labels that count as hard date constraints.
const HARD_CONSTRAINTS: &[&str] = &["must start on", "must finish on", "start on", "finish on"];

impl ConstraintCategory {
    /// Classify a raw constraint label against the fixed keyword sets.
    ///
    /// Flexible suffixes are checked before the hard set so that
    /// "Start On or After" is not swallowed by "Start On".
    pub fn classify(label: Option<&str>) -> Self {
        let label = match label {
            Some(l) if !l.trim().is_empty() => l.trim().to_ascii_lowercase(),
            _ => return ConstraintCategory::None,
        };

        if label.ends_with("on or after") || label.ends_with("on or before") {
            return ConstraintCategory::Flexible;
        }
        if HARD_CONSTRAINTS.contains(&label.as_str()) || label.starts_with("mandatory") {
            return ConstraintCategory::Hard;
        }
        if label == "as late as possible" || label == "as soon as possible" {
            return ConstraintCategory::ScheduleDriven;
        }
        ConstraintCategory::Other
    }
}

impl std::fmt::Display for ConstraintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintCategory::Hard => write!(f, "Hard"),
            ConstraintCategory::Flexible => write!(f, "Flexible"),
            ConstraintCategory::ScheduleDriven => write!(f, "Schedule-Driven"),
            ConstraintCategory::Other => write!(f, "Other"),
            ConstraintCategory::None => write!(f, "None"),
        }
    }
}

/// Logic relationship type. Closed set: any other two-letter code is a
/// parse failure, dropped with a warning and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RelType {
    /// Finish-to-Start
    #[default]
    FS,
    /// Finish-to-Finish
    FF,
    /// Start-to-Start
    SS,
    /// Start-to-Finish
    SF,
}

impl RelType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FS" => Some(RelType::FS),
            "FF" => Some(RelType::FF),
            "SS" => Some(RelType::SS),
            "SF" => Some(RelType::SF),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelType::FS => "FS",
            RelType::FF => "FF",
            RelType::SS => "SS",
            RelType::SF => "SF",
        }
    }
}

impl std::fmt::Display for RelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed logic link, owned by the activity record it was declared on.
/// The counterpart id may dangle (reference an activity outside the set);
/// that is tolerated, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Counterpart activity id
    pub activity_id: String,
    /// Relationship type
    pub rel_type: RelType,
    /// Lag in days; negative = lead, 0 = default
    pub lag: i64,
}

impl Relationship {
    pub fn new(activity_id: impl Into<String>, rel_type: RelType, lag: i64) -> Self {
        Self {
            activity_id: activity_id.into(),
            rel_type,
            lag,
        }
    }

    /// Re-serialize to the cell-entry form the parser accepts
    /// (`ID: TYPE` or `ID: TYPE LAG`). Round-trips through the parser.
    pub fn to_cell_entry(&self) -> String {
        if self.lag == 0 {
            format!("{}: {}", self.activity_id, self.rel_type)
        } else {
            format!("{}: {} {}", self.activity_id, self.rel_type, self.lag)
        }
    }
}

/// One schedule task or milestone.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Activity {
    /// Unique within a schedule
    pub id: String,
    pub name: String,
    pub status: ActivityStatus,
    /// Ordered WBS path segments, e.g. ["Project", "Phase A", "Area 1"]
    pub wbs_path: Vec<String>,
    /// At-completion duration in work days. None = column absent / blank.
    pub planned_duration: Option<f64>,
    /// Signed; negative = behind schedule
    pub total_float: Option<f64>,
    pub free_float: Option<f64>,
    pub start: Option<NaiveDate>,
    pub finish: Option<NaiveDate>,
    /// Raw constraint label as exported
    pub constraint_type: Option<String>,
    /// Derived from `constraint_type`
    pub constraint_category: ConstraintCategory,
    pub activity_type: ActivityType,
    /// Declared on this record; order preserved from the export cell
    pub predecessors: Vec<Relationship>,
    pub successors: Vec<Relationship>,
    /// Raw Resource Names cell. None = column absent or blank.
    pub resources: Option<String>,
    pub missing_predecessor: bool,
    pub missing_successor: bool,
}

impl Activity {
    pub fn is_milestone(&self) -> bool {
        self.activity_type.is_milestone()
    }

    pub fn is_complete(&self) -> bool {
        self.status == ActivityStatus::Completed
    }

    /// Both relationship lists empty.
    pub fn missing_logic(&self) -> bool {
        self.missing_predecessor && self.missing_successor
    }

    /// Iterate relationship entries in both directions, declaration order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.predecessors.iter().chain(self.successors.iter())
    }
}

/// One detected schedule deficiency. Created only by the metric
/// evaluators; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    /// Metric name that produced this issue (e.g. "negative_lags")
    pub category: String,
    pub title: String,
    pub description: String,
    /// Ordered; may be truncated for display
    pub affected_activity_ids: Vec<String>,
    /// Full count, retained even when the id list is truncated
    pub affected_count: usize,
    /// The number that tripped the threshold
    pub metric_value: f64,
}

impl Issue {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        affected_activity_ids: Vec<String>,
        metric_value: f64,
    ) -> Self {
        let affected_count = affected_activity_ids.len();
        Self {
            severity,
            category: category.into(),
            title: title.into(),
            description: description.into(),
            affected_activity_ids,
            affected_count,
            metric_value,
        }
    }

    /// Truncate the display id list, keeping the full count.
    pub fn truncated(mut self, max_ids: usize) -> Self {
        if self.affected_activity_ids.len() > max_ids {
            self.affected_activity_ids.truncate(max_ids);
        }
        self
    }
}

/// A prioritized action derived from all issues of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Mirrors the highest issue severity in the category
    pub priority: Severity,
    pub category: String,
    pub issue_description: String,
    pub impact_statement: String,
    pub suggested_action: String,
    /// Deduplicated union, first-occurrence order
    pub affected_activity_ids: Vec<String>,
}

/// Summary of issues by severity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl IssueSummary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Qualitative rating tier shared by the WBS and composite health scores.
/// The numeric boundaries differ per scorer; see `scoring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthRating {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl std::fmt::Display for HealthRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthRating::Excellent => write!(f, "Excellent"),
            HealthRating::Good => write!(f, "Good"),
            HealthRating::Fair => write!(f, "Fair"),
            HealthRating::Poor => write!(f, "Poor"),
            HealthRating::Critical => write!(f, "Critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_constraint_classification() {
        assert_eq!(
            ConstraintCategory::classify(Some("Must Start On")),
            ConstraintCategory::Hard
        );
        assert_eq!(
            ConstraintCategory::classify(Some("Mandatory Finish")),
            ConstraintCategory::Hard
        );
        assert_eq!(
            ConstraintCategory::classify(Some("Start On or After")),
            ConstraintCategory::Flexible
        );
        assert_eq!(
            ConstraintCategory::classify(Some("Finish On or Before")),
            ConstraintCategory::Flexible
        );
        assert_eq!(
            ConstraintCategory::classify(Some("As Late As Possible")),
            ConstraintCategory::ScheduleDriven
        );
        assert_eq!(
            ConstraintCategory::classify(Some("Expected Finish")),
            ConstraintCategory::Other
        );
        assert_eq!(ConstraintCategory::classify(None), ConstraintCategory::None);
        assert_eq!(
            ConstraintCategory::classify(Some("  ")),
            ConstraintCategory::None
        );
    }

    #[test]
    fn test_activity_type_from_label() {
        assert_eq!(
            ActivityType::from_label("Start Milestone"),
            ActivityType::StartMilestone
        );
        assert_eq!(
            ActivityType::from_label("Finish Milestone"),
            ActivityType::FinishMilestone
        );
        assert_eq!(
            ActivityType::from_label("Task Dependent"),
            ActivityType::TaskDependent
        );
        assert!(ActivityType::from_label("Finish Milestone").is_milestone());
        assert!(!ActivityType::from_label("Level of Effort").is_milestone());
    }

    #[test]
    fn test_rel_type_closed_set() {
        assert_eq!(RelType::from_code("FS"), Some(RelType::FS));
        assert_eq!(RelType::from_code("SF"), Some(RelType::SF));
        assert_eq!(RelType::from_code("ZZ"), None);
        assert_eq!(RelType::from_code("fs"), None);
    }

    #[test]
    fn test_relationship_cell_entry() {
        let rel = Relationship::new("A100", RelType::FF, 10);
        assert_eq!(rel.to_cell_entry(), "A100: FF 10");
        let rel = Relationship::new("A100", RelType::FS, 0);
        assert_eq!(rel.to_cell_entry(), "A100: FS");
        let rel = Relationship::new("A100", RelType::SS, -15);
        assert_eq!(rel.to_cell_entry(), "A100: SS -15");
    }

    #[test]
    fn test_issue_summary() {
        let issues = vec![
            Issue::new(Severity::High, "negative_lags", "t", "d", vec![], 7.0),
            Issue::new(Severity::High, "float_analysis", "t", "d", vec![], 3.0),
            Issue::new(Severity::Low, "constraints", "t", "d", vec![], 1.0),
        ];
        let summary = IssueSummary::from_issues(&issues);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 0);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.total, 3);
    }
}
