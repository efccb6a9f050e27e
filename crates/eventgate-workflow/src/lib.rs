mod transitions;
mod gate;
mod cursor;
mod view;

pub use transitions::{gate_outcome, transition_table, GateOutcome};
pub use gate::{resolve_workflow, StageChain, WorkflowGateResolver};
pub use cursor::StageCursor;
pub use view::{stage_views, StageDisplay, StageView};
