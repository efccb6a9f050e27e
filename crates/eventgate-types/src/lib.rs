mod price;
mod timestamp;
mod ticket;
mod stage;
mod error;

pub use price::Price;
pub use timestamp::{parse_timestamp, Timestamp};
pub use ticket::{PhaseId, PhaseWindow, PricePhase, ResolvedPhaseInfo, TicketType, TicketTypeId};
pub use stage::{ResolvedWorkflowState, StageIndex, StageRecord, StageStatus, WorkflowStage};
pub use error::{EventGateError, Result};

#[cfg(test)]
mod tests;
