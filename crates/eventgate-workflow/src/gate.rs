use eventgate_types::{
    ResolvedWorkflowState, StageIndex, StageRecord, StageStatus, Timestamp, WorkflowStage,
};

use crate::transitions::{gate_outcome, GateOutcome};

/// Stage records in canonical order, one per stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageChain {
    records: Vec<StageRecord>,
}

impl StageChain {
    /// Build from a snapshot. Stages missing from the snapshot are undecided;
    /// if a stage appears twice the first record wins.
    pub fn from_records(records: &[StageRecord]) -> Self {
        let records = WorkflowStage::all()
            .iter()
            .map(|stage| match records.iter().find(|r| r.stage == *stage) {
                Some(record) => record.clone(),
                None => {
                    tracing::debug!(%stage, "stage missing from snapshot, treated as undecided");
                    StageRecord::undecided(*stage)
                }
            })
            .collect();
        StageChain { records }
    }

    pub fn get(&self, stage: WorkflowStage) -> &StageRecord {
        &self.records[stage.index()]
    }

    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }
}

/// Deadline has passed at `now`. Unparsable deadlines count as passed.
pub(crate) fn deadline_passed(record: &StageRecord, now: Timestamp) -> bool {
    match record.parsed_deadline() {
        None => false,
        Some(Ok(deadline)) => now > deadline,
        Some(Err(e)) => {
            tracing::debug!(stage = %record.stage, error = %e, "unreadable deadline treated as passed");
            true
        }
    }
}

/// Computes which submission stages a user may open.
#[derive(Debug, Clone)]
pub struct WorkflowGateResolver {
    chain: StageChain,
}

impl WorkflowGateResolver {
    pub fn new(records: &[StageRecord]) -> Self {
        WorkflowGateResolver {
            chain: StageChain::from_records(records),
        }
    }

    pub fn chain(&self) -> &StageChain {
        &self.chain
    }

    /// Revision is skipped when the full paper was accepted outright
    fn revision_hidden(&self) -> bool {
        self.chain.get(WorkflowStage::FullPaper).status_is(StageStatus::Accepted)
    }

    fn payment_exposed(&self) -> bool {
        self.chain.get(WorkflowStage::CameraReady).status_is(StageStatus::Accepted)
    }

    /// Table outcome plus the Payment-only rules
    fn evaluate(&self, stage: WorkflowStage, now: Timestamp) -> GateOutcome {
        let record = self.chain.get(stage);
        if stage != WorkflowStage::Payment {
            return gate_outcome(stage, record.status);
        }

        if record.has_payment_reference() {
            return GateOutcome::Completed;
        }
        let outcome = gate_outcome(stage, record.status);
        if outcome != GateOutcome::Undecided {
            return outcome;
        }
        if deadline_passed(record, now) {
            return GateOutcome::Failed;
        }
        GateOutcome::Undecided
    }

    pub fn resolve(&self, now: Timestamp) -> ResolvedWorkflowState {
        let mut state = ResolvedWorkflowState {
            payment_exposed: self.payment_exposed(),
            ..Default::default()
        };
        if self.revision_hidden() {
            state.hidden.insert(WorkflowStage::Revision.index());
        }

        // The first failure halts evaluation of everything after it
        for stage in WorkflowStage::all() {
            let index = stage.index();
            if state.is_hidden(index) {
                continue;
            }
            match self.evaluate(*stage, now) {
                outcome if outcome.completes() => {
                    state.completed.insert(index);
                }
                GateOutcome::Failed => {
                    state.failed.insert(index);
                    break;
                }
                _ => {}
            }
        }

        // A failure past the furthest unlocked stage (a Payment deadline missed
        // while an earlier gate is still open) does not widen access
        let unlocked = furthest_unlocked(&state);
        let mut max_allowed = match state.first_failed() {
            Some(failed) => failed.min(unlocked),
            None => unlocked,
        };
        if !state.payment_exposed {
            max_allowed = max_allowed.min(WorkflowStage::CameraReady.index());
        }
        state.max_allowed_stage = max_allowed;

        tracing::trace!(
            %now,
            max_allowed,
            completed = ?state.completed,
            failed = ?state.failed,
            "workflow resolved"
        );
        state
    }
}

/// Walk visible stages while the previous visible stage is completed
fn furthest_unlocked(state: &ResolvedWorkflowState) -> StageIndex {
    let mut furthest = 0;
    let mut previous_completed = true;
    for stage in WorkflowStage::all() {
        let index = stage.index();
        if state.is_hidden(index) {
            continue;
        }
        if !previous_completed {
            break;
        }
        furthest = index;
        previous_completed = state.is_completed(index);
    }
    furthest
}

/// Resolve a stage snapshot at `now`
pub fn resolve_workflow(stages: &[StageRecord], now: Timestamp) -> ResolvedWorkflowState {
    WorkflowGateResolver::new(stages).resolve(now)
}
