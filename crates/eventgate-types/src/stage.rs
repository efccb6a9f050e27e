use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::timestamp::{parse_timestamp, Timestamp};

/// Position of a stage in the canonical sequence
pub type StageIndex = usize;

/// Submission workflow stages, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStage {
    #[serde(alias = "Abstract")]
    Abstract,
    #[serde(alias = "FullPaper")]
    FullPaper,
    #[serde(alias = "Revision")]
    Revision,
    #[serde(alias = "CameraReady")]
    CameraReady,
    #[serde(alias = "Payment")]
    Payment,
}

impl WorkflowStage {
    pub const COUNT: usize = 5;

    /// All stages in canonical order
    pub const fn all() -> &'static [WorkflowStage] {
        &[
            WorkflowStage::Abstract,
            WorkflowStage::FullPaper,
            WorkflowStage::Revision,
            WorkflowStage::CameraReady,
            WorkflowStage::Payment,
        ]
    }

    pub const fn index(&self) -> StageIndex {
        match self {
            WorkflowStage::Abstract => 0,
            WorkflowStage::FullPaper => 1,
            WorkflowStage::Revision => 2,
            WorkflowStage::CameraReady => 3,
            WorkflowStage::Payment => 4,
        }
    }

    pub fn from_index(index: StageIndex) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub const fn label(&self) -> &'static str {
        match self {
            WorkflowStage::Abstract => "Abstract",
            WorkflowStage::FullPaper => "Full Paper",
            WorkflowStage::Revision => "Revision",
            WorkflowStage::CameraReady => "Camera Ready",
            WorkflowStage::Payment => "Payment",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Review decision recorded for a stage. An absent status means undecided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    #[serde(alias = "Pending")]
    Pending,
    #[serde(alias = "Accepted")]
    Accepted,
    #[serde(alias = "Rejected")]
    Rejected,
    #[serde(alias = "Revise")]
    Revise,
}

/// Server-side record for one stage of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    pub stage: WorkflowStage,
    #[serde(default)]
    pub status: Option<StageStatus>,
    #[serde(default)]
    pub deadline: Option<String>,
    /// Only meaningful for `Payment`
    #[serde(default)]
    pub payment_reference: Option<String>,
}

impl StageRecord {
    pub fn new(stage: WorkflowStage, status: Option<StageStatus>) -> Self {
        StageRecord {
            stage,
            status,
            deadline: None,
            payment_reference: None,
        }
    }

    /// Undecided record, used for stages missing from a snapshot
    pub fn undecided(stage: WorkflowStage) -> Self {
        Self::new(stage, None)
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }

    /// `None` when no deadline is set; `Some(Err)` when it cannot be parsed
    pub fn parsed_deadline(&self) -> Option<Result<Timestamp>> {
        self.deadline.as_deref().map(parse_timestamp)
    }

    /// A non-blank payment reference is present
    pub fn has_payment_reference(&self) -> bool {
        self.payment_reference
            .as_deref()
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn status_is(&self, status: StageStatus) -> bool {
        self.status == Some(status)
    }
}

/// Gate resolution result for a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWorkflowState {
    pub max_allowed_stage: StageIndex,
    pub completed: BTreeSet<StageIndex>,
    pub failed: BTreeSet<StageIndex>,
    pub hidden: BTreeSet<StageIndex>,
    /// CameraReady is accepted, so the Payment stage is shown
    pub payment_exposed: bool,
}

impl ResolvedWorkflowState {
    pub fn is_completed(&self, index: StageIndex) -> bool {
        self.completed.contains(&index)
    }

    pub fn is_failed(&self, index: StageIndex) -> bool {
        self.failed.contains(&index)
    }

    pub fn is_hidden(&self, index: StageIndex) -> bool {
        self.hidden.contains(&index)
    }

    /// Visible and within the gate
    pub fn is_reachable(&self, index: StageIndex) -> bool {
        index <= self.max_allowed_stage && !self.is_hidden(index)
    }

    pub fn first_failed(&self) -> Option<StageIndex> {
        self.failed.iter().next().copied()
    }
}
