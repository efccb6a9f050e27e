use eventgate_types::{ResolvedWorkflowState, StageIndex, WorkflowStage};
use serde::{Deserialize, Serialize};

/// Stage the user is currently looking at.
///
/// Separate from `max_allowed_stage`: the user may step back to finished
/// stages, but never past the gate or onto a hidden stage. The caller owns the
/// cursor and feeds it every freshly resolved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCursor {
    position: StageIndex,
    payment_exposed: bool,
}

impl StageCursor {
    /// Snap to the first stage that is neither completed nor hidden
    pub fn initial(state: &ResolvedWorkflowState) -> Self {
        let first_open = WorkflowStage::all()
            .iter()
            .map(|s| s.index())
            .find(|i| !state.is_completed(*i) && !state.is_hidden(*i))
            .unwrap_or(state.max_allowed_stage);

        StageCursor {
            position: clamp(first_open, state),
            payment_exposed: state.payment_exposed,
        }
    }

    pub fn position(&self) -> StageIndex {
        self.position
    }

    pub fn stage(&self) -> WorkflowStage {
        WorkflowStage::from_index(self.position).unwrap_or(WorkflowStage::Abstract)
    }

    /// Move to `target`, clamped into the reachable range
    pub fn select(&mut self, target: StageIndex, state: &ResolvedWorkflowState) -> StageIndex {
        self.position = clamp(target, state);
        self.position
    }

    /// Re-apply the gate after a data refresh.
    ///
    /// Jumps to Payment the moment CameraReady turns accepted; otherwise keeps
    /// the current position if it is still reachable.
    pub fn refresh(&mut self, state: &ResolvedWorkflowState) -> StageIndex {
        let target = if state.payment_exposed && !self.payment_exposed {
            tracing::debug!("camera-ready accepted, cursor moves to payment");
            WorkflowStage::Payment.index()
        } else {
            self.position
        };
        self.payment_exposed = state.payment_exposed;
        self.select(target, state)
    }
}

/// Clamp to `[0, max_allowed_stage]`, then step off hidden stages: back first,
/// forward if nothing visible lies behind.
fn clamp(target: StageIndex, state: &ResolvedWorkflowState) -> StageIndex {
    let bounded = target.min(state.max_allowed_stage);
    if !state.is_hidden(bounded) {
        return bounded;
    }
    (0..bounded)
        .rev()
        .find(|i| !state.is_hidden(*i))
        .or_else(|| (bounded + 1..=state.max_allowed_stage).find(|i| !state.is_hidden(*i)))
        .unwrap_or(0)
}
