//! Health scoring
//!
//! Two scorers consume the evaluated schedule:
//! - `wbs_health` — a 0-100 score per WBS phase and area, built from
//!   four weighted components with fixed anchor tables.
//! - `composite` — the single schedule-wide 0-100 score, folded from
//!   the metric outcomes as capped deductions with an audit trail.

mod composite;
mod wbs_health;

pub use composite::{CompositeScorer, HealthScore, ScoreAdjustment};
pub use wbs_health::{WbsComponentScores, WbsGroupHealth, WbsHealthReport, WbsHealthScorer};
