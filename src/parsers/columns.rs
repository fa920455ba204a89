//! Column name normalization
//!
//! P6 appends the project's display unit to exported headers, so the same
//! logical column arrives as `Total Float`, `Total Float(d)` or
//! `Total Float (days)` depending on export settings. This module strips
//! that bounded set of suffix decorations and resolves headers onto
//! canonical field names, case-insensitively and whitespace-normalized.

use crate::errors::{AnalysisWarning, ScheduleError};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical fields that must resolve for analysis to proceed.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Activity ID",
    "Activity Name",
    "Activity Status",
    "Start",
    "Finish",
    "Total Float",
    "Duration Type",
];

/// Canonical fields used when present; absence means "no data".
pub const OPTIONAL_COLUMNS: &[&str] = &[
    "WBS Code",
    "At Completion Duration",
    "Free Float",
    "Predecessors",
    "Predecessor Details",
    "Successors",
    "Successor Details",
    "Primary Constraint",
    "Activity Type",
    "Resource Names",
];

static SUFFIX_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Trailing parenthesized unit token, with or without a preceding space:
/// short P6 forms (d, h, %, wk, mo, yr and plurals) and spelled-out units.
fn suffix_pattern() -> &'static Regex {
    SUFFIX_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\s*\((?:d|h|%|wks?|mos?|yrs?|days?|hours?|weeks?|months?|years?)\)\s*$",
        )
        .unwrap()
    })
}

/// Collapse internal whitespace and trim, preserving case.
fn squash_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mapping from canonical field name to its position in the header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    by_canonical: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Resolve a raw header row against the canonical column set.
    ///
    /// Emits one `SuffixStripped` warning per header whose unit suffix had
    /// to be removed to resolve it. Fails with `MissingColumns` naming
    /// every unresolved required field; never partially proceeds.
    pub fn resolve(headers: &[String]) -> Result<(Self, Vec<AnalysisWarning>), ScheduleError> {
        let known: HashMap<String, &'static str> = REQUIRED_COLUMNS
            .iter()
            .chain(OPTIONAL_COLUMNS.iter())
            .map(|c| (c.to_ascii_lowercase(), *c))
            .collect();

        let mut by_canonical = HashMap::new();
        let mut warnings = Vec::new();

        for (index, raw) in headers.iter().enumerate() {
            let squashed = squash_whitespace(raw);
            let stripped = suffix_pattern().replace(&squashed, "").trim().to_string();

            let Some(&canonical) = known.get(&stripped.to_ascii_lowercase()) else {
                continue;
            };
            // First occurrence wins on duplicate headers.
            if by_canonical.contains_key(canonical) {
                continue;
            }
            by_canonical.insert(canonical, index);
            if stripped != squashed {
                warnings.push(AnalysisWarning::SuffixStripped {
                    raw: raw.trim().to_string(),
                    canonical: canonical.to_string(),
                });
            }
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !by_canonical.contains_key(*c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ScheduleError::MissingColumns(missing));
        }

        Ok((Self { by_canonical }, warnings))
    }

    /// Header index of a canonical field, if it resolved.
    pub fn get(&self, canonical: &str) -> Option<usize> {
        self.by_canonical.get(canonical).copied()
    }

    pub fn has(&self, canonical: &str) -> bool {
        self.by_canonical.contains_key(canonical)
    }

    /// Non-blank cell value of a canonical field within one data row.
    pub fn cell<'a>(&self, row: &'a [String], canonical: &str) -> Option<&'a str> {
        let value = row.get(self.get(canonical)?)?.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn full_required() -> Vec<String> {
        headers(&[
            "Activity ID",
            "Activity Name",
            "Activity Status",
            "Start",
            "Finish",
            "Total Float",
            "Duration Type",
        ])
    }

    #[test]
    fn test_exact_headers_resolve_without_warnings() {
        let (map, warnings) = ColumnMap::resolve(&full_required()).unwrap();
        assert!(map.has("Activity ID"));
        assert!(map.has("Total Float"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unit_suffixes_stripped_with_warning() {
        let mut h = full_required();
        h[5] = "Total Float(d)".to_string();
        h.push("At Completion Duration (days)".to_string());
        h.push("Free Float(h)".to_string());

        let (map, warnings) = ColumnMap::resolve(&h).unwrap();
        assert_eq!(map.get("Total Float"), Some(5));
        assert!(map.has("At Completion Duration"));
        assert!(map.has("Free Float"));
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| matches!(
            w,
            AnalysisWarning::SuffixStripped { .. }
        )));
    }

    #[test]
    fn test_two_letter_unit_abbreviations_stripped() {
        let mut h = full_required();
        h[5] = "Total Float (wk)".to_string();
        h.push("At Completion Duration(mo)".to_string());
        h.push("Free Float (yrs)".to_string());

        let (map, warnings) = ColumnMap::resolve(&h).unwrap();
        assert_eq!(map.get("Total Float"), Some(5));
        assert!(map.has("At Completion Duration"));
        assert!(map.has("Free Float"));
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| matches!(
            w,
            AnalysisWarning::SuffixStripped { .. }
        )));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let mut h = full_required();
        h[0] = "  activity   id ".to_string();
        let (map, warnings) = ColumnMap::resolve(&h).unwrap();
        assert_eq!(map.get("Activity ID"), Some(0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_required_names_every_field() {
        let h = headers(&["Activity ID", "Start", "Finish"]);
        let err = ColumnMap::resolve(&h).unwrap_err();
        let ScheduleError::MissingColumns(missing) = err;
        assert!(missing.contains(&"Activity Name".to_string()));
        assert!(missing.contains(&"Activity Status".to_string()));
        assert!(missing.contains(&"Total Float".to_string()));
        assert!(missing.contains(&"Duration Type".to_string()));
        assert!(!missing.contains(&"Start".to_string()));
    }

    #[test]
    fn test_optional_absent_is_not_an_error() {
        let (map, _) = ColumnMap::resolve(&full_required()).unwrap();
        assert!(!map.has("Resource Names"));
        assert_eq!(map.get("Predecessors"), None);
    }

    #[test]
    fn test_cell_blank_and_nan_are_none() {
        let (map, _) = ColumnMap::resolve(&full_required()).unwrap();
        let row: Vec<String> = vec![
            "A100".into(),
            "  ".into(),
            "nan".into(),
            "2025-01-01".into(),
            "2025-02-01".into(),
            "5".into(),
            "Fixed Duration & Units".into(),
        ];
        assert_eq!(map.cell(&row, "Activity ID"), Some("A100"));
        assert_eq!(map.cell(&row, "Activity Name"), None);
        assert_eq!(map.cell(&row, "Activity Status"), None);
    }
}
