use serde::{Deserialize, Serialize};

use crate::error::{EventGateError, Result};
use crate::price::Price;
use crate::timestamp::{parse_timestamp, Timestamp};

/// Price phase identifier
pub type PhaseId = String;

/// Ticket type identifier
pub type TicketTypeId = String;

/// Time-bounded pricing tier with its own capacity and percent modifier.
///
/// Timestamps are kept exactly as the feed sent them; they are parsed when a
/// resolver asks for the [`PhaseWindow`], so one bad row never rejects a
/// whole catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePhase {
    pub id: PhaseId,
    #[serde(default)]
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub total_slots: i64,
    #[serde(default)]
    pub available_slots: i64,
    /// 100 = base price, below 100 = discount, above 100 = surcharge
    #[serde(default)]
    pub percent_multiplier: Option<f64>,
}

/// Parsed half-open interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl PhaseWindow {
    /// `now ∈ [start, end)`
    pub fn contains(&self, now: Timestamp) -> bool {
        self.start <= now && now < self.end
    }

    /// Window opens strictly after `now`
    pub fn is_future(&self, now: Timestamp) -> bool {
        self.start > now
    }

    /// Window has opened at or before `now` (it may also have closed)
    pub fn has_started(&self, now: Timestamp) -> bool {
        self.start <= now
    }
}

impl PricePhase {
    /// Parse the phase's time window.
    ///
    /// Fails with `MalformedTimestamp` for unparsable bounds and `EmptyWindow`
    /// when `end <= start`.
    pub fn window(&self) -> Result<PhaseWindow> {
        let start = parse_timestamp(&self.start_time)?;
        let end = parse_timestamp(&self.end_time)?;
        if end <= start {
            return Err(EventGateError::EmptyWindow(self.id.clone()));
        }
        Ok(PhaseWindow { start, end })
    }

    /// At least one slot left. Non-positive counts mean sold out.
    pub const fn has_capacity(&self) -> bool {
        self.available_slots > 0
    }

    /// Report `available > total` or negative counts. Callers log this; the
    /// resolver never corrects the numbers.
    pub fn check_capacity(&self) -> Result<()> {
        if self.available_slots > self.total_slots || self.available_slots < 0 {
            return Err(EventGateError::InconsistentCapacity {
                phase: self.id.clone(),
                available: self.available_slots,
                total: self.total_slots,
            });
        }
        Ok(())
    }
}

/// A purchasable ticket type with its pricing phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: TicketTypeId,
    pub name: String,
    pub base_price: Price,
    #[serde(default)]
    pub is_author_ticket: bool,
    /// Not guaranteed to be sorted
    #[serde(default)]
    pub phases: Vec<PricePhase>,
}

impl TicketType {
    /// No phases configured at all
    pub fn is_unconfigured(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Outcome of resolving a phase list at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPhaseInfo {
    pub current_phase: Option<PricePhase>,
    pub next_phase: Option<PricePhase>,
    pub is_exhausted: bool,
}

impl ResolvedPhaseInfo {
    /// Result for an empty phase list
    pub fn not_configured() -> Self {
        Self::default()
    }

    /// A phase is on sale right now
    pub fn is_on_sale(&self) -> bool {
        self.current_phase.is_some()
    }
}
