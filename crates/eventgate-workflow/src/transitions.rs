use eventgate_types::{StageStatus, WorkflowStage};
use serde::{Deserialize, Serialize};

/// What a review decision means for the gate of its stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GateOutcome {
    /// No decision yet; the next stage stays locked
    Undecided,
    /// Stage done, next stage unlocks
    Completed,
    /// Stage done and the Revision stage is required
    CompletedWithRevision,
    /// Stage failed; nothing after it is reachable
    Failed,
}

impl GateOutcome {
    pub const fn completes(&self) -> bool {
        matches!(self, GateOutcome::Completed | GateOutcome::CompletedWithRevision)
    }

    pub const fn fails(&self) -> bool {
        matches!(self, GateOutcome::Failed)
    }
}

/// Transition table keyed by `(stage, status)`.
///
/// Payment references and deadlines are not statuses; the gate resolver
/// layers them on top of this table.
pub const fn gate_outcome(stage: WorkflowStage, status: Option<StageStatus>) -> GateOutcome {
    use StageStatus::{Accepted, Pending, Rejected, Revise};
    use WorkflowStage::{Abstract, CameraReady, FullPaper, Payment, Revision};

    match (stage, status) {
        (_, None) => GateOutcome::Undecided,

        (Abstract, Some(Accepted)) => GateOutcome::Completed,
        (Abstract, Some(Rejected)) => GateOutcome::Failed,
        (Abstract, Some(Pending | Revise)) => GateOutcome::Undecided,

        (FullPaper, Some(Accepted)) => GateOutcome::Completed,
        (FullPaper, Some(Revise)) => GateOutcome::CompletedWithRevision,
        (FullPaper, Some(Rejected)) => GateOutcome::Failed,
        (FullPaper, Some(Pending)) => GateOutcome::Undecided,

        (Revision, Some(Accepted)) => GateOutcome::Completed,
        (Revision, Some(Rejected)) => GateOutcome::Failed,
        (Revision, Some(Pending | Revise)) => GateOutcome::Undecided,

        (CameraReady, Some(Accepted)) => GateOutcome::Completed,
        (CameraReady, Some(Rejected)) => GateOutcome::Failed,
        (CameraReady, Some(Pending | Revise)) => GateOutcome::Undecided,

        (Payment, Some(Accepted)) => GateOutcome::Completed,
        (Payment, Some(Rejected)) => GateOutcome::Failed,
        (Payment, Some(Pending | Revise)) => GateOutcome::Undecided,
    }
}

/// Every `(stage, status)` pair with its outcome, in canonical stage order
pub fn transition_table() -> impl Iterator<Item = (WorkflowStage, Option<StageStatus>, GateOutcome)> {
    static STATUSES: [Option<StageStatus>; 5] = [
        None,
        Some(StageStatus::Pending),
        Some(StageStatus::Accepted),
        Some(StageStatus::Rejected),
        Some(StageStatus::Revise),
    ];

    WorkflowStage::all().iter().flat_map(|stage| {
        STATUSES
            .iter()
            .map(move |status| (*stage, *status, gate_outcome(*stage, *status)))
    })
}
