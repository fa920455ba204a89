//! Recommendations engine
//!
//! Folds the full issue list into one prioritized recommendation per
//! issue category. The impact statement and suggested action are fixed
//! per category; the priority mirrors the highest issue severity seen,
//! and affected ids are the deduplicated first-occurrence union across
//! the category's issues.

use crate::models::{Issue, Recommendation, Severity};
use std::collections::HashSet;
use tracing::debug;

/// Fixed per-category impact statement and suggested action.
fn category_guidance(category: &str) -> (&'static str, &'static str) {
    match category {
        "negative_lags" => (
            "Leads compress logic the network cannot verify, understating risk on every affected path.",
            "Replace each negative lag with explicit overlap activities or re-sequenced logic.",
        ),
        "positive_lags" => (
            "Hidden wait time inside lags cannot be statused or resourced, distorting the critical path.",
            "Convert lags over the target into named wait or cure activities with real durations.",
        ),
        "constraints" => (
            "Date constraints override logic-driven dates and suppress true float across the network.",
            "Remove hard constraints where logic can drive the date; keep only contractual milestones constrained.",
        ),
        "missing_logic" => (
            "Open-ended activities float freely, so slips on them never propagate to the finish date.",
            "Tie every open end into the network; only the start and finish milestones may remain open.",
        ),
        "durations" => (
            "Very long activities hide progress and defer bad news until it is unrecoverable.",
            "Decompose activities beyond the long-duration threshold into measurable work packages.",
        ),
        "float_analysis" => (
            "Unrealistic float signals broken logic: negative float means the plan misses its dates as built.",
            "Recover negative float by re-sequencing or scope action, and reconnect high-float activities.",
        ),
        "relationship_types" => (
            "Heavy SS/FF use weakens the finish-driven logic chain the critical path depends on.",
            "Re-express SS/FF pairs as Finish-to-Start links wherever the work actually sequences.",
        ),
        "resources" => (
            "Unresourced near-term work cannot be staffed or costed, making the plan unexecutable.",
            "Assign resources to every incomplete activity before the next status cycle.",
        ),
        "indices" => (
            "A performance index below target means the schedule is losing ground against its baseline.",
            "Investigate the driving paths behind the index shortfall and replan the lagging scope.",
        ),
        _ => (
            "This deficiency degrades the reliability of the schedule's forecast dates.",
            "Review the affected activities and correct the underlying schedule data.",
        ),
    }
}

/// Build one recommendation per issue category present.
///
/// Output order: High before Medium before Low; within a severity, more
/// affected activities first.
pub fn build_recommendations(issues: &[Issue]) -> Vec<Recommendation> {
    // first-occurrence category order, then sorted below
    let mut categories: Vec<&str> = Vec::new();
    for issue in issues {
        if !categories.contains(&issue.category.as_str()) {
            categories.push(&issue.category);
        }
    }

    let mut recommendations: Vec<Recommendation> = categories
        .into_iter()
        .map(|category| {
            let group: Vec<&Issue> = issues.iter().filter(|i| i.category == category).collect();
            let priority = group
                .iter()
                .map(|i| i.severity)
                .max()
                .unwrap_or(Severity::Low);
            // description of the highest-severity issue in the group
            let issue_description = group
                .iter()
                .find(|i| i.severity == priority)
                .map(|i| i.description.clone())
                .unwrap_or_default();

            let mut seen = HashSet::new();
            let affected_activity_ids: Vec<String> = group
                .iter()
                .flat_map(|i| i.affected_activity_ids.iter())
                .filter(|id| seen.insert(id.to_string()))
                .cloned()
                .collect();

            let (impact_statement, suggested_action) = category_guidance(category);
            Recommendation {
                priority,
                category: category.to_string(),
                issue_description,
                impact_statement: impact_statement.to_string(),
                suggested_action: suggested_action.to_string(),
                affected_activity_ids,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.affected_activity_ids.len().cmp(&a.affected_activity_ids.len()))
    });

    debug!(
        issues = issues.len(),
        recommendations = recommendations.len(),
        "built recommendations"
    );
    recommendations
}
