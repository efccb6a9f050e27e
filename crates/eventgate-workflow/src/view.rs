use eventgate_types::{ResolvedWorkflowState, StageIndex, StageRecord, Timestamp, WorkflowStage};
use serde::{Deserialize, Serialize};

use crate::gate::{deadline_passed, StageChain};

/// How the stepper renders a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageDisplay {
    Hidden,
    Locked,
    Open,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    pub stage: WorkflowStage,
    pub index: StageIndex,
    pub display: StageDisplay,
    /// Set when a deadline exists and `now` is past it (or it is unreadable)
    pub deadline_passed: bool,
}

/// Per-stage display state for a resolved workflow
pub fn stage_views(
    state: &ResolvedWorkflowState,
    records: &[StageRecord],
    now: Timestamp,
) -> Vec<StageView> {
    let chain = StageChain::from_records(records);

    WorkflowStage::all()
        .iter()
        .map(|stage| {
            let index = stage.index();
            let display = if state.is_hidden(index) {
                StageDisplay::Hidden
            } else if index > state.max_allowed_stage {
                StageDisplay::Locked
            } else if state.is_failed(index) {
                StageDisplay::Failed
            } else if state.is_completed(index) {
                StageDisplay::Completed
            } else {
                StageDisplay::Open
            };

            StageView {
                stage: *stage,
                index,
                display,
                deadline_passed: deadline_passed(chain.get(*stage), now),
            }
        })
        .collect()
}
