//! Activity table assembly
//!
//! Builds the normalized `ActivityTable` from a resolved header row plus
//! raw data rows. Every field coercion here is lenient: unparsable dates
//! and numbers become `None`, never errors. Relationship columns are
//! resolved per direction with detail columns preferred over ids-only
//! columns, and the fallback is recorded as a warning because synthesized
//! FS/0 entries are invisible to the lag metrics.

use crate::errors::{AnalysisWarning, ScheduleError};
use crate::models::{Activity, ActivityStatus, ActivityType, ConstraintCategory};
use crate::parsers::columns::ColumnMap;
use crate::parsers::relationships::{parse_relationship_cell, parse_simple_cell, ParsedCell};
use crate::parsers::wbs::parse_wbs_path;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%y", "%d-%b-%Y", "%m/%d/%Y", "%m/%d/%y"];

/// Lenient date coercion. Accepts the common P6 export formats, ignores
/// trailing time-of-day and actual-date markers (`*`, `A`).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw
        .trim()
        .trim_end_matches(['*', 'A'])
        .trim()
        .split_whitespace()
        .next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cleaned, fmt).ok())
}

/// Lenient numeric coercion; thousands separators tolerated.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse::<f64>().ok()
}

/// Normalized activity set ready for metric evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTable {
    activities: Vec<Activity>,
    /// False when the export carried no relationship columns at all;
    /// logic metrics must then report Unknown instead of a clean zero.
    has_relationship_data: bool,
    /// False when the Resource Names column is absent. A blank cell in a
    /// present column means "unassigned"; an absent column means the
    /// resource metric is unavailable.
    has_resource_data: bool,
}

impl ActivityTable {
    /// Build from a raw header row and data rows.
    ///
    /// Fails only when required columns are missing. Bad rows and cells
    /// are dropped or nulled with a warning each.
    pub fn build(
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<(Self, Vec<AnalysisWarning>), ScheduleError> {
        let (map, mut warnings) = ColumnMap::resolve(headers)?;

        let has_relationship_data = map.has("Predecessors")
            || map.has("Predecessor Details")
            || map.has("Successors")
            || map.has("Successor Details");
        if !has_relationship_data {
            warnings.push(AnalysisWarning::NoRelationshipData);
        }
        let has_resource_data = map.has("Resource Names");

        let mut activities = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let Some(id) = map.cell(row, "Activity ID") else {
                warnings.push(AnalysisWarning::RowMissingActivityId { row_index });
                continue;
            };
            let id = id.to_string();

            let (predecessors, pred_simple) =
                parse_direction(&map, row, "Predecessor Details", "Predecessors");
            let (successors, succ_simple) =
                parse_direction(&map, row, "Successor Details", "Successors");

            for parsed in [&predecessors, &successors] {
                for entry in &parsed.warnings {
                    warnings.push(AnalysisWarning::RelationshipParse {
                        activity_id: id.clone(),
                        entry: entry.entry.clone(),
                        reason: entry.reason.clone(),
                    });
                }
            }
            if pred_simple || succ_simple {
                warnings.push(AnalysisWarning::SimpleRelationshipFallback {
                    activity_id: id.clone(),
                });
            }

            let constraint_type = map.cell(row, "Primary Constraint").map(str::to_string);
            let constraint_category = ConstraintCategory::classify(constraint_type.as_deref());

            let missing_predecessor = predecessors.relationships.is_empty();
            let missing_successor = successors.relationships.is_empty();

            activities.push(Activity {
                id,
                name: map
                    .cell(row, "Activity Name")
                    .unwrap_or_default()
                    .to_string(),
                status: map
                    .cell(row, "Activity Status")
                    .map(ActivityStatus::from_label)
                    .unwrap_or_default(),
                wbs_path: map
                    .cell(row, "WBS Code")
                    .map(parse_wbs_path)
                    .unwrap_or_default(),
                planned_duration: map
                    .cell(row, "At Completion Duration")
                    .and_then(parse_number),
                total_float: map.cell(row, "Total Float").and_then(parse_number),
                free_float: map.cell(row, "Free Float").and_then(parse_number),
                start: map.cell(row, "Start").and_then(parse_date),
                finish: map.cell(row, "Finish").and_then(parse_date),
                constraint_type,
                constraint_category,
                activity_type: map
                    .cell(row, "Activity Type")
                    .map(ActivityType::from_label)
                    .unwrap_or_default(),
                predecessors: predecessors.relationships,
                successors: successors.relationships,
                resources: map.cell(row, "Resource Names").map(str::to_string),
                missing_predecessor,
                missing_successor,
            });
        }

        debug!(
            activities = activities.len(),
            warnings = warnings.len(),
            has_relationship_data,
            "assembled activity table"
        );

        Ok((
            Self {
                activities,
                has_relationship_data,
                has_resource_data,
            },
            warnings,
        ))
    }

    /// Wrap pre-built activities, assuming relationship and resource
    /// columns were present.
    pub fn from_activities(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            has_relationship_data: true,
            has_resource_data: true,
        }
    }

    /// Same as `from_activities` but marks the table as having no
    /// relationship columns.
    pub fn without_relationship_data(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            has_relationship_data: false,
            has_resource_data: true,
        }
    }

    /// Same as `from_activities` but marks the table as having no
    /// Resource Names column.
    pub fn without_resource_data(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            has_relationship_data: true,
            has_resource_data: false,
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn has_relationship_data(&self) -> bool {
        self.has_relationship_data
    }

    pub fn has_resource_data(&self) -> bool {
        self.has_resource_data
    }

    /// Total declared relationship entries, both directions.
    pub fn total_relationship_count(&self) -> usize {
        self.activities
            .iter()
            .map(|a| a.predecessors.len() + a.successors.len())
            .sum()
    }

    /// Project span in days: earliest start to latest finish. None when
    /// either bound is unavailable.
    pub fn project_span_days(&self) -> Option<f64> {
        let earliest = self.activities.iter().filter_map(|a| a.start).min()?;
        let latest = self.activities.iter().filter_map(|a| a.finish).max()?;
        let days = (latest - earliest).num_days();
        if days >= 0 {
            Some(days as f64)
        } else {
            None
        }
    }
}

/// Resolve one relationship direction for a single row: a non-blank
/// detail cell wins; otherwise a non-blank ids-only cell supplies
/// synthesized FS/0 records (flagged); neither yields an empty list.
/// The preference is per row, so a blank detail cell never shadows a
/// populated simple cell. Returns whether the fallback fired.
fn parse_direction(
    map: &ColumnMap,
    row: &[String],
    detail_column: &str,
    simple_column: &str,
) -> (ParsedCell, bool) {
    if let Some(cell) = map.cell(row, detail_column) {
        return (parse_relationship_cell(cell), false);
    }
    if let Some(cell) = map.cell(row, simple_column) {
        let parsed = parse_simple_cell(cell);
        let used = !parsed.relationships.is_empty();
        return (parsed, used);
    }
    (ParsedCell::default(), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelType;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn base_headers() -> Vec<String> {
        headers(&[
            "Activity ID",
            "Activity Name",
            "Activity Status",
            "Start",
            "Finish",
            "Total Float",
            "Duration Type",
            "Predecessor Details",
            "Successor Details",
        ])
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_parses_fields_and_relationships() {
        let rows = vec![row(&[
            "A100",
            "Pour foundation",
            "In Progress",
            "01-Feb-25",
            "2025-03-15",
            "5",
            "Fixed Duration & Units",
            "A090: FS, A080: SS 3",
            "A110: FF -2",
        ])];
        let (table, warnings) = ActivityTable::build(&base_headers(), &rows).unwrap();
        assert_eq!(table.len(), 1);
        assert!(warnings.is_empty());

        let a = &table.activities()[0];
        assert_eq!(a.id, "A100");
        assert_eq!(a.status, ActivityStatus::InProgress);
        assert_eq!(a.start, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(a.finish, NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(a.total_float, Some(5.0));
        assert_eq!(a.predecessors.len(), 2);
        assert_eq!(a.predecessors[1].rel_type, RelType::SS);
        assert_eq!(a.successors[0].lag, -2);
        assert!(!a.missing_logic());
    }

    #[test]
    fn test_row_without_id_skipped_with_warning() {
        let rows = vec![
            row(&["", "x", "Not Started", "", "", "", "", "", ""]),
            row(&["A1", "y", "Not Started", "", "", "", "", "", ""]),
        ];
        let (table, warnings) = ActivityTable::build(&base_headers(), &rows).unwrap();
        assert_eq!(table.len(), 1);
        assert!(warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::RowMissingActivityId { row_index: 0 })));
    }

    #[test]
    fn test_no_relationship_columns_flagged_once() {
        let h = headers(&[
            "Activity ID",
            "Activity Name",
            "Activity Status",
            "Start",
            "Finish",
            "Total Float",
            "Duration Type",
        ]);
        let rows = vec![row(&["A1", "x", "Not Started", "", "", "", ""])];
        let (table, warnings) = ActivityTable::build(&h, &rows).unwrap();
        assert!(!table.has_relationship_data());
        assert_eq!(
            warnings
                .iter()
                .filter(|w| matches!(w, AnalysisWarning::NoRelationshipData))
                .count(),
            1
        );
    }

    #[test]
    fn test_simple_column_fallback_warns_per_row() {
        let h = headers(&[
            "Activity ID",
            "Activity Name",
            "Activity Status",
            "Start",
            "Finish",
            "Total Float",
            "Duration Type",
            "Predecessors",
        ]);
        let rows = vec![row(&[
            "A1",
            "x",
            "Not Started",
            "",
            "",
            "",
            "",
            "A0, B0",
        ])];
        let (table, warnings) = ActivityTable::build(&h, &rows).unwrap();
        let a = &table.activities()[0];
        assert_eq!(a.predecessors.len(), 2);
        assert!(a
            .predecessors
            .iter()
            .all(|r| r.rel_type == RelType::FS && r.lag == 0));
        assert!(warnings.iter().any(|w| matches!(
            w,
            AnalysisWarning::SimpleRelationshipFallback { activity_id } if activity_id == "A1"
        )));
    }

    #[test]
    fn test_blank_detail_cell_falls_back_to_simple_per_row() {
        let h = headers(&[
            "Activity ID",
            "Activity Name",
            "Activity Status",
            "Start",
            "Finish",
            "Total Float",
            "Duration Type",
            "Predecessors",
            "Predecessor Details",
        ]);
        let rows = vec![
            // detail cell blank, simple cell populated
            row(&["A1", "x", "Not Started", "", "", "", "", "A0, B0", ""]),
            // detail cell populated; it wins and no fallback fires
            row(&["A2", "y", "Not Started", "", "", "", "", "C0", "C0: SS 2"]),
        ];
        let (table, warnings) = ActivityTable::build(&h, &rows).unwrap();

        let a1 = &table.activities()[0];
        assert_eq!(a1.predecessors.len(), 2);
        assert!(a1
            .predecessors
            .iter()
            .all(|r| r.rel_type == RelType::FS && r.lag == 0));
        assert_eq!(table.total_relationship_count(), 3);

        let a2 = &table.activities()[1];
        assert_eq!(a2.predecessors.len(), 1);
        assert_eq!(a2.predecessors[0].rel_type, RelType::SS);

        let fallbacks: Vec<&str> = warnings
            .iter()
            .filter_map(|w| match w {
                AnalysisWarning::SimpleRelationshipFallback { activity_id } => {
                    Some(activity_id.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(fallbacks, vec!["A1"]);
    }

    #[test]
    fn test_malformed_entry_warning_names_activity() {
        let rows = vec![row(&[
            "A1",
            "x",
            "Not Started",
            "",
            "",
            "",
            "",
            "A0: FS, B0: ZZ",
            "",
        ])];
        let (table, warnings) = ActivityTable::build(&base_headers(), &rows).unwrap();
        assert_eq!(table.activities()[0].predecessors.len(), 1);
        assert!(warnings.iter().any(|w| matches!(
            w,
            AnalysisWarning::RelationshipParse { activity_id, .. } if activity_id == "A1"
        )));
    }

    #[test]
    fn test_unparsable_values_become_none() {
        let rows = vec![row(&[
            "A1",
            "x",
            "Not Started",
            "soon",
            "later",
            "lots",
            "",
            "",
            "",
        ])];
        let (table, _) = ActivityTable::build(&base_headers(), &rows).unwrap();
        let a = &table.activities()[0];
        assert_eq!(a.start, None);
        assert_eq!(a.finish, None);
        assert_eq!(a.total_float, None);
    }

    #[test]
    fn test_date_markers_and_formats() {
        assert_eq!(parse_date("01-Feb-25"), NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(
            parse_date("2025-02-01 08:00"),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(
            parse_date("02/01/2025*"),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(
            parse_date("01-Feb-25 A"),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_project_span() {
        let rows = vec![
            row(&[
                "A1",
                "x",
                "Not Started",
                "2025-01-01",
                "2025-01-10",
                "",
                "",
                "",
                "",
            ]),
            row(&[
                "A2",
                "y",
                "Not Started",
                "2025-01-05",
                "2025-03-01",
                "",
                "",
                "",
                "",
            ]),
        ];
        let (table, _) = ActivityTable::build(&base_headers(), &rows).unwrap();
        assert_eq!(table.project_span_days(), Some(59.0));
        assert_eq!(table.total_relationship_count(), 0);
    }
}
