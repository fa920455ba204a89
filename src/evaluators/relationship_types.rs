//! Relationship type distribution (DCMA point 5)
//!
//! FS should dominate a well-built network. SS/FF are legitimate but
//! easy to abuse; their combined share is checked against the DCMA
//! target.

use crate::config::AnalysisConfig;
use crate::evaluators::base::{Evaluation, Evaluator, MetricRecord, RelationshipTypeMetrics};
use crate::models::{Issue, MetricStatus, RelType, Severity};
use crate::parsers::ActivityTable;

pub struct RelationshipTypeEvaluator {
    config: AnalysisConfig,
}

impl RelationshipTypeEvaluator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl Evaluator for RelationshipTypeEvaluator {
    fn name(&self) -> &'static str {
        "relationship_types"
    }

    fn description(&self) -> &'static str {
        "FS/FF/SS/SF distribution and the combined SS/FF share"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        if !table.has_relationship_data() || table.total_relationship_count() == 0 {
            return Ok(Evaluation::new(MetricRecord::RelationshipTypes(
                RelationshipTypeMetrics::default(),
            )));
        }

        let mut fs = 0usize;
        let mut ff = 0usize;
        let mut ss = 0usize;
        let mut sf = 0usize;
        let mut ss_ff_ids = Vec::new();
        for activity in table.activities() {
            let mut bears_ss_ff = false;
            for rel in activity.relationships() {
                match rel.rel_type {
                    RelType::FS => fs += 1,
                    RelType::FF => {
                        ff += 1;
                        bears_ss_ff = true;
                    }
                    RelType::SS => {
                        ss += 1;
                        bears_ss_ff = true;
                    }
                    RelType::SF => sf += 1,
                }
            }
            if bears_ss_ff {
                ss_ff_ids.push(activity.id.clone());
            }
        }

        let total = fs + ff + ss + sf;
        let ss_ff_pct = (ss + ff) as f64 / total as f64 * 100.0;
        let status = if ss_ff_pct > self.config.ss_ff_max_pct {
            MetricStatus::Warning
        } else {
            MetricStatus::Good
        };

        let mut issues = Vec::new();
        if ss_ff_pct > self.config.ss_ff_max_pct {
            issues.push(
                Issue::new(
                    Severity::Low,
                    self.name(),
                    "High share of SS/FF relationships",
                    format!(
                        "{ss_ff_pct:.1}% of relationships are Start-to-Start or \
                         Finish-to-Finish ({} of {total}); the target is at most \
                         {:.0}%. Prefer Finish-to-Start links where the work allows.",
                        ss + ff,
                        self.config.ss_ff_max_pct
                    ),
                    ss_ff_ids,
                    ss_ff_pct,
                ),
            );
        }

        Ok(Evaluation::with_issues(
            MetricRecord::RelationshipTypes(RelationshipTypeMetrics {
                fs_count: fs,
                ff_count: ff,
                ss_count: ss,
                sf_count: sf,
                total,
                ss_ff_pct,
                status,
            }),
            issues,
        ))
    }
}
