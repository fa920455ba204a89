//! Per-WBS-group health scoring
//!
//! Activities are grouped by the first WBS path segment (phase) and the
//! first two segments (area). Each group gets a 0-100 score from four
//! weighted components with fixed anchor tables:
//!
//! - critical-percentage, 0-40 points
//! - average total float, 0-30 points
//! - negative-float percentage, 0-20 points
//! - activity count, 0-10 points
//!
//! Groups with no float-bearing activities are omitted with a warning,
//! never scored as zero.

use crate::errors::AnalysisWarning;
use crate::models::{Activity, HealthRating};
use crate::parsers::ActivityTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// The four component sub-scores, kept for audit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WbsComponentScores {
    pub critical: f64,
    pub float: f64,
    pub negative: f64,
    pub count: f64,
}

/// Score card for one phase or area group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbsGroupHealth {
    /// Joined path prefix, e.g. "PROJ" or "PROJ.Phase1"
    pub group: String,
    pub activity_count: usize,
    pub critical_pct: f64,
    pub negative_pct: f64,
    pub avg_float: f64,
    pub components: WbsComponentScores,
    pub score: f64,
    pub rating: HealthRating,
}

/// Phase- and area-level score cards, group name order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WbsHealthReport {
    pub phases: Vec<WbsGroupHealth>,
    pub areas: Vec<WbsGroupHealth>,
}

fn critical_component(pct: f64) -> f64 {
    if pct == 0.0 {
        40.0
    } else if pct <= 5.0 {
        35.0
    } else if pct <= 15.0 {
        30.0
    } else if pct <= 25.0 {
        20.0
    } else if pct <= 40.0 {
        10.0
    } else {
        0.0
    }
}

fn float_component(avg_float: f64) -> f64 {
    if avg_float >= 20.0 {
        30.0
    } else if avg_float >= 15.0 {
        25.0
    } else if avg_float >= 10.0 {
        20.0
    } else if avg_float >= 5.0 {
        15.0
    } else if avg_float > 0.0 {
        10.0
    } else {
        0.0
    }
}

fn negative_component(pct: f64) -> f64 {
    if pct == 0.0 {
        20.0
    } else if pct <= 5.0 {
        15.0
    } else if pct <= 10.0 {
        10.0
    } else if pct <= 20.0 {
        5.0
    } else {
        0.0
    }
}

fn count_component(count: usize) -> f64 {
    if count >= 10 {
        10.0
    } else if count >= 5 {
        7.0
    } else if count >= 3 {
        5.0
    } else {
        3.0
    }
}

fn rating(score: f64) -> HealthRating {
    if score >= 80.0 {
        HealthRating::Excellent
    } else if score >= 65.0 {
        HealthRating::Good
    } else if score >= 50.0 {
        HealthRating::Fair
    } else if score >= 35.0 {
        HealthRating::Poor
    } else {
        HealthRating::Critical
    }
}

#[derive(Default)]
pub struct WbsHealthScorer;

impl WbsHealthScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score phase and area groups. Activities without a WBS path fall
    /// into no group.
    pub fn score(&self, table: &ActivityTable) -> (WbsHealthReport, Vec<AnalysisWarning>) {
        let mut warnings = Vec::new();
        let phases = score_level(table, 1, &mut warnings);
        let areas = score_level(table, 2, &mut warnings);
        debug!(
            phases = phases.len(),
            areas = areas.len(),
            "scored WBS groups"
        );
        (WbsHealthReport { phases, areas }, warnings)
    }
}

fn score_level(
    table: &ActivityTable,
    depth: usize,
    warnings: &mut Vec<AnalysisWarning>,
) -> Vec<WbsGroupHealth> {
    // BTreeMap keeps the output in group-name order.
    let mut groups: BTreeMap<String, Vec<&Activity>> = BTreeMap::new();
    for activity in table.activities() {
        if activity.wbs_path.len() < depth {
            continue;
        }
        let key = activity.wbs_path[..depth].join(".");
        groups.entry(key).or_default().push(activity);
    }

    let mut scored = Vec::with_capacity(groups.len());
    for (group, members) in groups {
        let floats: Vec<f64> = members.iter().filter_map(|a| a.total_float).collect();
        if floats.is_empty() {
            warnings.push(AnalysisWarning::EmptyGroupSkipped { group });
            continue;
        }
        scored.push(score_group(group, members.len(), &floats));
    }
    scored
}

fn score_group(group: String, activity_count: usize, floats: &[f64]) -> WbsGroupHealth {
    let n = floats.len() as f64;
    let critical_pct = floats.iter().filter(|&&f| f == 0.0).count() as f64 / n * 100.0;
    let negative_pct = floats.iter().filter(|&&f| f < 0.0).count() as f64 / n * 100.0;
    let avg_float = floats.iter().sum::<f64>() / n;

    let components = WbsComponentScores {
        critical: critical_component(critical_pct),
        float: float_component(avg_float),
        negative: negative_component(negative_pct),
        count: count_component(activity_count),
    };
    let score = components.critical + components.float + components.negative + components.count;

    WbsGroupHealth {
        group,
        activity_count,
        critical_pct,
        negative_pct,
        avg_float,
        components,
        score,
        rating: rating(score),
    }
}
