use eventgate_pricing::{PurchaseAffordance, SaleState, TicketOffer};
use eventgate_types::{ResolvedWorkflowState, StageIndex, Timestamp};
use eventgate_workflow::StageView;
use serde::{Deserialize, Serialize};

use crate::hashing::HashRef;

/// Everything resolved at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub tick: usize,
    pub at: Timestamp,
    pub offers: Vec<TicketOffer>,
    pub waitlist_eligible: bool,
    pub affordance: PurchaseAffordance,
    pub workflow: ResolvedWorkflowState,
    pub stages: Vec<StageView>,
    pub cursor: StageIndex,
}

/// A ticket type's sale state changed between two ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTransition {
    pub tick: usize,
    pub at: Timestamp,
    pub ticket_type_id: String,
    pub from: SaleState,
    pub to: SaleState,
}

/// Summary across all ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub total_ticks: usize,
    pub first_waitlist_tick: Option<usize>,
    pub sale_transitions: Vec<SaleTransition>,
    pub final_max_allowed_stage: StageIndex,
    pub final_cursor: StageIndex,
}

/// Replay output with input/output digests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub scenario_name: String,
    pub input_hash: HashRef,
    pub output_hash: HashRef,
    pub summary: ReplaySummary,
    pub ticks: Vec<TickReport>,
}

impl ReplayReport {
    /// Human-readable digest for terminal output
    pub fn render_summary(&self) -> String {
        let mut out = format!(
            "scenario {}: {} ticks, final stage {}, cursor {}\n",
            self.scenario_name,
            self.summary.total_ticks,
            self.summary.final_max_allowed_stage,
            self.summary.final_cursor
        );
        match self.summary.first_waitlist_tick {
            Some(tick) => out.push_str(&format!("waitlist offered from tick {}\n", tick)),
            None => out.push_str("waitlist never offered\n"),
        }
        for t in &self.summary.sale_transitions {
            out.push_str(&format!(
                "  tick {:>4} {} {}: {:?} -> {:?}\n",
                t.tick,
                t.at.format("%Y-%m-%d %H:%M"),
                t.ticket_type_id,
                t.from,
                t.to
            ));
        }
        out.push_str(&format!("input  {}\noutput {}\n", self.input_hash, self.output_hash));
        out
    }
}
