//! Missing-logic evaluator (DCMA point 1)
//!
//! Every activity should have at least one predecessor and one
//! successor. The schedule's terminal milestones are the expected open
//! ends: a start milestone without predecessors and a finish milestone
//! without successors are excluded, not flagged.

use crate::evaluators::base::{Evaluation, Evaluator, MetricRecord, MissingLogicMetrics};
use crate::models::{ActivityType, Issue, MetricStatus, Severity};
use crate::parsers::ActivityTable;

#[derive(Default)]
pub struct MissingLogicEvaluator;

impl MissingLogicEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for MissingLogicEvaluator {
    fn name(&self) -> &'static str {
        "missing_logic"
    }

    fn description(&self) -> &'static str {
        "Activities with open logic ends, terminal milestones excluded"
    }

    fn evaluate(&self, table: &ActivityTable) -> anyhow::Result<Evaluation> {
        if !table.has_relationship_data() {
            return Ok(Evaluation::new(MetricRecord::MissingLogic(
                MissingLogicMetrics::default(),
            )));
        }

        let mut pred_only = 0usize;
        let mut succ_only = 0usize;
        let mut both = 0usize;
        let mut excluded = 0usize;
        let mut affected_ids = Vec::new();

        for activity in table.activities() {
            // An open end on a terminal milestone is expected.
            let missing_pred = activity.missing_predecessor
                && activity.activity_type != ActivityType::StartMilestone;
            let missing_succ = activity.missing_successor
                && activity.activity_type != ActivityType::FinishMilestone;

            if (activity.missing_predecessor && !missing_pred)
                || (activity.missing_successor && !missing_succ)
            {
                excluded += 1;
            }

            match (missing_pred, missing_succ) {
                (true, true) => both += 1,
                (true, false) => pred_only += 1,
                (false, true) => succ_only += 1,
                (false, false) => continue,
            }
            affected_ids.push(activity.id.clone());
        }

        let missing_any = pred_only + succ_only + both;
        let status = if missing_any == 0 {
            MetricStatus::Good
        } else {
            MetricStatus::Fail
        };

        let mut issues = Vec::new();
        if missing_any > 0 {
            issues.push(Issue::new(
                Severity::High,
                self.name(),
                "Activities with missing logic",
                format!(
                    "{missing_any} activities have an open logic end \
                     ({pred_only} missing a predecessor, {succ_only} missing a \
                     successor, {both} missing both). Open ends break the \
                     network and make float meaningless."
                ),
                affected_ids,
                missing_any as f64,
            ));
        }

        Ok(Evaluation::with_issues(
            MetricRecord::MissingLogic(MissingLogicMetrics {
                missing_any,
                missing_predecessor_only: pred_only,
                missing_successor_only: succ_only,
                missing_both: both,
                excluded_milestones: excluded,
                status,
            }),
            issues,
        ))
    }
}
